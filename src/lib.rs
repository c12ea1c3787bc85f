//! Menu Digital - order-taking backend for a digital restaurant menu
//!
//! Clients submit orders (customer name, table number, line items); the
//! server persists them, computes totals, issues lookup tokens, and
//! exposes them over a small REST API.
//!
//! # Modules
//!
//! - [`orders`] - Order model, validation, storage and service
//! - [`gateway`] - Axum HTTP surface
//! - [`db`] - PostgreSQL pool and schema
//! - [`config`] - YAML configuration
//! - [`logging`] - Tracing subscriber setup

pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod orders;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use db::Database;
pub use gateway::state::AppState;
pub use orders::{
    InMemoryOrderRepository, Order, OrderError, OrderItem, OrderItemRequest, OrderRepository,
    OrderRequest, OrderService, OrderStatus, PgOrderRepository,
};
