//! Order Error Types

use std::fmt;
use thiserror::Error;

/// Key an order was looked up by
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderLookup {
    Id(i64),
    Token(String),
}

impl fmt::Display for OrderLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderLookup::Id(id) => write!(f, "id {}", id),
            OrderLookup::Token(token) => write!(f, "token {}", token),
        }
    }
}

/// Order error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrderError {
    #[error("Order not found with {0}")]
    NotFound(OrderLookup),

    #[error("Invalid order: {0}")]
    Validation(String),

    /// Storage rejected the token as already taken
    #[error("Order token already in use")]
    DuplicateToken,

    #[error("Database error: {0}")]
    Database(String),
}

impl OrderError {
    pub fn not_found_id(id: i64) -> Self {
        OrderError::NotFound(OrderLookup::Id(id))
    }

    pub fn not_found_token(token: impl Into<String>) -> Self {
        OrderError::NotFound(OrderLookup::Token(token.into()))
    }

    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            OrderError::NotFound(_) => "ORDER_NOT_FOUND",
            OrderError::Validation(_) => "INVALID_PARAMETER",
            OrderError::DuplicateToken => "DUPLICATE_TOKEN",
            OrderError::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            OrderError::NotFound(_) => 404,
            OrderError::Validation(_) => 400,
            OrderError::DuplicateToken | OrderError::Database(_) => 500,
        }
    }
}

impl From<sqlx::Error> for OrderError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            // token is the only unique column besides the primary key
            sqlx::Error::Database(db) if db.is_unique_violation() => OrderError::DuplicateToken,
            _ => OrderError::Database(e.to_string()),
        }
    }
}
