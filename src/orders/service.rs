//! Order Service - business logic for order operations
//!
//! Owns the order lifecycle on top of an [`OrderRepository`]: assigns
//! status and token at creation, computes totals, and turns missing rows
//! into [`OrderError::NotFound`].

use std::sync::Arc;

use rust_decimal::Decimal;

use super::error::OrderError;
use super::models::{Order, OrderRequest, OrderStatus, compute_total};
use super::repository::{NewOrder, OrderChanges, OrderRepository};
use super::validation::validate_request;

/// Attempts at inserting with a fresh token before giving up
pub const MAX_TOKEN_ATTEMPTS: usize = 3;

/// Full hyphenated UUID v4
pub fn generate_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Order Service - handles all order-related business logic
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
    next_token: Box<dyn Fn() -> String + Send + Sync>,
}

impl OrderService {
    /// Create a new OrderService with random UUID tokens
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        Self::with_token_generator(repo, generate_token)
    }

    pub fn with_token_generator(
        repo: Arc<dyn OrderRepository>,
        next_token: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            repo,
            next_token: Box::new(next_token),
        }
    }

    /// Name of the storage backend
    pub fn backend(&self) -> &'static str {
        self.repo.name()
    }

    /// List every order
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.repo.list().await
    }

    /// Create a new order
    pub async fn create_order(&self, req: OrderRequest) -> Result<Order, OrderError> {
        validate_request(&req)?;
        let total = total_of(&req)?;

        let mut new_order = NewOrder {
            customer_name: req.customer_name,
            table_number: req.table_number,
            status: OrderStatus::Pending,
            token: String::new(),
            total,
            items: req.items,
        };

        for attempt in 1..=MAX_TOKEN_ATTEMPTS {
            new_order.token = (self.next_token)();
            match self.repo.insert(new_order.clone()).await {
                Ok(order) => {
                    tracing::info!(
                        order_id = order.id,
                        token = %order.token,
                        items = order.items.len(),
                        total = %order.total,
                        "Order created"
                    );
                    return Ok(order);
                }
                Err(OrderError::DuplicateToken) => {
                    tracing::warn!(attempt, "Order token collision, regenerating");
                }
                Err(e) => {
                    tracing::error!("Create order failed: {}", e);
                    return Err(e);
                }
            }
        }

        tracing::error!(
            "Create order failed: no unique token after {} attempts",
            MAX_TOKEN_ATTEMPTS
        );
        Err(OrderError::DuplicateToken)
    }

    /// Get an order by id
    pub async fn get_order(&self, id: i64) -> Result<Order, OrderError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| OrderError::not_found_id(id))
    }

    /// Get an order by its lookup token
    pub async fn get_order_by_token(&self, token: &str) -> Result<Order, OrderError> {
        self.repo
            .find_by_token(token)
            .await?
            .ok_or_else(|| OrderError::not_found_token(token))
    }

    /// Replace names and the whole item set, recomputing the total
    pub async fn update_order(&self, id: i64, req: OrderRequest) -> Result<Order, OrderError> {
        validate_request(&req)?;
        let total = total_of(&req)?;

        let changes = OrderChanges {
            customer_name: req.customer_name,
            table_number: req.table_number,
            total,
            items: req.items,
        };

        let order = self
            .repo
            .replace(id, changes)
            .await?
            .ok_or_else(|| OrderError::not_found_id(id))?;

        tracing::info!(
            order_id = order.id,
            items = order.items.len(),
            total = %order.total,
            "Order updated"
        );
        Ok(order)
    }

    /// Delete an order and its items. Deleting twice is `NotFound`.
    pub async fn delete_order(&self, id: i64) -> Result<(), OrderError> {
        if !self.repo.delete(id).await? {
            return Err(OrderError::not_found_id(id));
        }
        tracing::info!(order_id = id, "Order deleted");
        Ok(())
    }
}

fn total_of(req: &OrderRequest) -> Result<Decimal, OrderError> {
    compute_total(&req.items)
        .ok_or_else(|| OrderError::Validation("order total is too large".to_string()))
}
