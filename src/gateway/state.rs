use std::sync::Arc;

use crate::db::Database;
use crate::orders::OrderService;

/// Shared gateway state
#[derive(Clone)]
pub struct AppState {
    /// Order lifecycle operations
    pub orders: Arc<OrderService>,
    /// PostgreSQL pool, absent when running on the in-memory store
    pub pg_db: Option<Arc<Database>>,
}

impl AppState {
    pub fn new(orders: Arc<OrderService>, pg_db: Option<Arc<Database>>) -> Self {
        Self { orders, pg_db }
    }
}
