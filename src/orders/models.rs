//! Order data shapes
//!
//! An [`Order`] owns its [`OrderItem`]s. Each item keeps the id of its
//! owning order as a plain back-link for joined queries; the link is never
//! serialized.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

use super::validation::{validate_non_negative, validate_not_blank};

/// Order lifecycle label
///
/// Orders are created `PENDING` and never transition. `CREATED` is only
/// recognised when reading rows written by the legacy flat order model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Created,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Created => "CREATED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "CREATED" => Ok(OrderStatus::Created),
            other => Err(format!("unknown order status '{}'", other)),
        }
    }
}

/// Persisted order line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    #[schema(example = 1)]
    pub id: i64,
    /// Owning order. Join key only.
    #[serde(skip)]
    pub order_id: i64,
    #[schema(example = "Pizza")]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 30.0)]
    pub price: Decimal,
    #[schema(example = 2)]
    pub quantity: u32,
}

/// Persisted order with its items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Ana")]
    pub customer_name: Option<String>,
    #[schema(example = "5")]
    pub table_number: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 65.0)]
    pub total: Decimal,
    pub status: OrderStatus,
    #[schema(example = "3f2b9c4e-8d1a-4b7e-9f00-2c6d5e4a1b3c")]
    pub token: String,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
}

/// Line item as submitted by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItemRequest {
    #[validate(custom(function = "validate_not_blank"))]
    #[validate(length(max = 255, message = "item name must be at most 255 characters"))]
    #[schema(example = "Pizza")]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_non_negative"))]
    #[schema(value_type = f64, example = 30.0)]
    pub price: Decimal,
    #[schema(example = 2)]
    pub quantity: u32,
}

impl OrderItemRequest {
    pub fn new(name: impl Into<String>, price: Decimal, quantity: u32) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }

    /// `price × quantity`, `None` on decimal overflow
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Create / update payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[validate(length(max = 255, message = "customer name must be at most 255 characters"))]
    #[schema(example = "Ana")]
    pub customer_name: Option<String>,
    #[validate(length(max = 255, message = "table number must be at most 255 characters"))]
    #[schema(example = "5")]
    pub table_number: Option<String>,
    #[validate(length(min = 1, message = "order must contain at least one item"))]
    #[validate(nested)]
    pub items: Vec<OrderItemRequest>,
}

/// Sum of `price × quantity` over `items`. `None` on decimal overflow.
pub fn compute_total(items: &[OrderItemRequest]) -> Option<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.line_total()?))
}
