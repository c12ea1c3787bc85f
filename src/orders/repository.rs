//! Repository layer for order storage
//!
//! [`OrderRepository`] is the storage seam the service is built on.
//! [`PgOrderRepository`] keeps orders in PostgreSQL; the in-memory
//! implementation lives in [`super::memory`].

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::collections::HashMap;

use super::error::OrderError;
use super::models::{Order, OrderItem, OrderItemRequest, OrderStatus};

/// Order to insert. Token, status and total are already decided.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: Option<String>,
    pub table_number: Option<String>,
    pub status: OrderStatus,
    pub token: String,
    pub total: Decimal,
    pub items: Vec<OrderItemRequest>,
}

/// Replacement of the mutable part of an order
#[derive(Debug, Clone)]
pub struct OrderChanges {
    pub customer_name: Option<String>,
    pub table_number: Option<String>,
    pub total: Decimal,
    pub items: Vec<OrderItemRequest>,
}

/// Storage for orders and their items.
///
/// Items are always written together with their order. `insert` must
/// return [`OrderError::DuplicateToken`] when the token is already taken.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    async fn list(&self) -> Result<Vec<Order>, OrderError>;

    async fn insert(&self, order: NewOrder) -> Result<Order, OrderError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, OrderError>;

    async fn find_by_token(&self, token: &str) -> Result<Option<Order>, OrderError>;

    /// Overwrite names and total and swap the whole item set.
    /// Returns `None` when no order has `id`.
    async fn replace(&self, id: i64, changes: OrderChanges) -> Result<Option<Order>, OrderError>;

    /// Remove the order and its items. Returns `false` when no order has `id`.
    async fn delete(&self, id: i64) -> Result<bool, OrderError>;
}

const ORDER_COLUMNS: &str =
    "id, customer_name, table_number, total, status, token, created_at";

/// PostgreSQL-backed order repository
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_order(row: &PgRow, items: Vec<OrderItem>) -> Result<Order, OrderError> {
        let status: String = row.try_get("status")?;
        Ok(Order {
            id: row.try_get("id")?,
            customer_name: row.try_get("customer_name")?,
            table_number: row.try_get("table_number")?,
            total: row.try_get("total")?,
            status: status.parse::<OrderStatus>().map_err(OrderError::Database)?,
            token: row.try_get("token")?,
            items,
            created_at: row.try_get("created_at")?,
        })
    }

    fn row_to_item(row: &PgRow) -> Result<OrderItem, OrderError> {
        let quantity: i64 = row.try_get("quantity")?;
        Ok(OrderItem {
            id: row.try_get("id")?,
            order_id: row.try_get("order_id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            quantity: u32::try_from(quantity)
                .map_err(|_| OrderError::Database(format!("quantity out of range: {}", quantity)))?,
        })
    }

    /// Read-only transaction whose statements all see one snapshot, so an
    /// order header and its items always come from the same commit.
    async fn begin_snapshot(&self) -> Result<Transaction<'static, Postgres>, OrderError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    async fn items_of(
        tx: &mut Transaction<'_, Postgres>,
        order_id: i64,
    ) -> Result<Vec<OrderItem>, OrderError> {
        let rows = sqlx::query(
            r#"SELECT id, order_id, name, price, quantity
               FROM order_items WHERE order_id = $1 ORDER BY id"#,
        )
        .bind(order_id)
        .fetch_all(&mut **tx)
        .await?;

        rows.iter().map(Self::row_to_item).collect()
    }

    /// Header row plus items, both read inside `tx`
    async fn load_order(
        tx: &mut Transaction<'_, Postgres>,
        row: Option<PgRow>,
    ) -> Result<Option<Order>, OrderError> {
        let Some(row) = row else {
            return Ok(None);
        };
        let id: i64 = row.try_get("id")?;
        let items = Self::items_of(tx, id).await?;
        Ok(Some(Self::row_to_order(&row, items)?))
    }

    async fn insert_items(
        tx: &mut Transaction<'_, Postgres>,
        order_id: i64,
        items: &[OrderItemRequest],
    ) -> Result<Vec<OrderItem>, OrderError> {
        let mut inserted = Vec::with_capacity(items.len());
        for item in items {
            let id: i64 = sqlx::query_scalar(
                r#"INSERT INTO order_items (order_id, name, price, quantity)
                   VALUES ($1, $2, $3, $4) RETURNING id"#,
            )
            .bind(order_id)
            .bind(&item.name)
            .bind(item.price)
            .bind(i64::from(item.quantity))
            .fetch_one(&mut **tx)
            .await?;

            inserted.push(OrderItem {
                id,
                order_id,
                name: item.name.clone(),
                price: item.price,
                quantity: item.quantity,
            });
        }
        Ok(inserted)
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self) -> Result<Vec<Order>, OrderError> {
        let mut tx = self.begin_snapshot().await?;

        let order_rows = sqlx::query(&format!("SELECT {} FROM orders ORDER BY id", ORDER_COLUMNS))
            .fetch_all(&mut *tx)
            .await?;

        // One query for all items instead of one per order
        let item_rows = sqlx::query(
            "SELECT id, order_id, name, price, quantity FROM order_items ORDER BY order_id, id",
        )
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        let mut items_by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        for row in &item_rows {
            let item = Self::row_to_item(row)?;
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        order_rows
            .iter()
            .map(|row| -> Result<Order, OrderError> {
                let id: i64 = row.try_get("id")?;
                Self::row_to_order(row, items_by_order.remove(&id).unwrap_or_default())
            })
            .collect()
    }

    async fn insert(&self, order: NewOrder) -> Result<Order, OrderError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            r#"INSERT INTO orders (customer_name, table_number, total, status, token)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {}"#,
            ORDER_COLUMNS
        ))
        .bind(&order.customer_name)
        .bind(&order.table_number)
        .bind(order.total)
        .bind(order.status.as_str())
        .bind(&order.token)
        .fetch_one(&mut *tx)
        .await?;

        let order_id: i64 = row.try_get("id")?;
        let items = Self::insert_items(&mut tx, order_id, &order.items).await?;
        let created = Self::row_to_order(&row, items)?;

        tx.commit().await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, OrderError> {
        let mut tx = self.begin_snapshot().await?;
        let row = sqlx::query(&format!("SELECT {} FROM orders WHERE id = $1", ORDER_COLUMNS))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let order = Self::load_order(&mut tx, row).await?;
        tx.commit().await?;
        Ok(order)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Order>, OrderError> {
        let mut tx = self.begin_snapshot().await?;
        let row = sqlx::query(&format!(
            "SELECT {} FROM orders WHERE token = $1",
            ORDER_COLUMNS
        ))
        .bind(token)
        .fetch_optional(&mut *tx)
        .await?;

        let order = Self::load_order(&mut tx, row).await?;
        tx.commit().await?;
        Ok(order)
    }

    async fn replace(&self, id: i64, changes: OrderChanges) -> Result<Option<Order>, OrderError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            r#"UPDATE orders SET customer_name = $2, table_number = $3, total = $4
               WHERE id = $1
               RETURNING {}"#,
            ORDER_COLUMNS
        ))
        .bind(id)
        .bind(&changes.customer_name)
        .bind(&changes.table_number)
        .bind(changes.total)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let items = Self::insert_items(&mut tx, id, &changes.items).await?;
        let updated = Self::row_to_order(&row, items)?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: i64) -> Result<bool, OrderError> {
        // order_items rows go with ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
