//! Order management module
//!
//! Orders with their line items, backed by PostgreSQL or an in-memory store.

pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use error::{OrderError, OrderLookup};
pub use memory::InMemoryOrderRepository;
pub use models::{Order, OrderItem, OrderItemRequest, OrderRequest, OrderStatus, compute_total};
pub use repository::{NewOrder, OrderChanges, OrderRepository, PgOrderRepository};
pub use service::{OrderService, generate_token};
pub use validation::validate_request;
