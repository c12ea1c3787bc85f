//! In-memory order store
//!
//! Used by tests and when the server starts without a database URL.
//! Ids come from per-table counters like a serial column would hand them
//! out; the token index mirrors the unique constraint.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use super::error::OrderError;
use super::models::{Order, OrderItem, OrderItemRequest};
use super::repository::{NewOrder, OrderChanges, OrderRepository};

#[derive(Default)]
struct Tables {
    orders: BTreeMap<i64, Order>,
    token_index: HashMap<String, i64>,
    next_order_id: i64,
    next_item_id: i64,
}

impl Tables {
    fn attach_items(&mut self, order_id: i64, items: Vec<OrderItemRequest>) -> Vec<OrderItem> {
        items
            .into_iter()
            .map(|item| {
                self.next_item_id += 1;
                OrderItem {
                    id: self.next_item_id,
                    order_id,
                    name: item.name,
                    price: item.price,
                    quantity: item.quantity,
                }
            })
            .collect()
    }
}

#[derive(Default)]
pub struct InMemoryOrderRepository {
    tables: Mutex<Tables>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, OrderError> {
        self.tables
            .lock()
            .map_err(|_| OrderError::Database("order store lock poisoned".to_string()))
    }

    /// Number of item rows across all orders
    pub fn item_count(&self) -> Result<usize, OrderError> {
        Ok(self.lock()?.orders.values().map(|o| o.items.len()).sum())
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.lock()?.orders.values().cloned().collect())
    }

    async fn insert(&self, order: NewOrder) -> Result<Order, OrderError> {
        let mut tables = self.lock()?;
        if tables.token_index.contains_key(&order.token) {
            return Err(OrderError::DuplicateToken);
        }

        tables.next_order_id += 1;
        let id = tables.next_order_id;
        let items = tables.attach_items(id, order.items);
        let created = Order {
            id,
            customer_name: order.customer_name,
            table_number: order.table_number,
            total: order.total,
            status: order.status,
            token: order.token,
            items,
            created_at: Utc::now(),
        };

        tables.token_index.insert(created.token.clone(), id);
        tables.orders.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, OrderError> {
        Ok(self.lock()?.orders.get(&id).cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Order>, OrderError> {
        let tables = self.lock()?;
        Ok(tables
            .token_index
            .get(token)
            .and_then(|id| tables.orders.get(id))
            .cloned())
    }

    async fn replace(&self, id: i64, changes: OrderChanges) -> Result<Option<Order>, OrderError> {
        let mut tables = self.lock()?;
        if !tables.orders.contains_key(&id) {
            return Ok(None);
        }

        let items = tables.attach_items(id, changes.items);
        let Some(order) = tables.orders.get_mut(&id) else {
            return Ok(None);
        };
        order.customer_name = changes.customer_name;
        order.table_number = changes.table_number;
        order.total = changes.total;
        order.items = items;
        Ok(Some(order.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, OrderError> {
        let mut tables = self.lock()?;
        match tables.orders.remove(&id) {
            Some(order) => {
                tables.token_index.remove(&order.token);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
