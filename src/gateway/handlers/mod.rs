//! HTTP handlers

pub mod health;
pub mod order;

pub use health::{HealthResponse, health_check};
pub use order::{
    create_order, delete_order, get_order, get_order_by_token, list_orders, update_order,
};
