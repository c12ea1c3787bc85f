//! Database connection management

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::DatabaseConfig;

/// Order tables. Items cascade with their order so a delete never leaves
/// dangling rows.
const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS orders (
        id            BIGSERIAL PRIMARY KEY,
        customer_name VARCHAR(255),
        table_number  VARCHAR(255),
        total         NUMERIC NOT NULL DEFAULT 0,
        status        VARCHAR(32) NOT NULL,
        token         VARCHAR(64) NOT NULL UNIQUE,
        created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS order_items (
        id       BIGSERIAL PRIMARY KEY,
        order_id BIGINT NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
        name     VARCHAR(255) NOT NULL,
        price    NUMERIC NOT NULL CHECK (price >= 0),
        quantity BIGINT NOT NULL CHECK (quantity >= 0)
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_order_items_order_id ON order_items(order_id)",
];

/// PostgreSQL database connection pool
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    pub async fn connect(database_url: &str, config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(database_url)
            .await?;

        tracing::info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Create the order tables if they do not exist yet
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::info!("Order schema ready");
        Ok(())
    }
}
