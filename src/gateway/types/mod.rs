//! Gateway types module
//!
//! - [`OrderPayload`], [`OrderId`]: Axum extractors for order bodies and ids
//! - [`ApiResponse<T>`]: response envelope
//! - [`ApiError`]: handler error rendered as an envelope

pub mod order;
pub mod response;

pub use order::{OrderId, OrderPayload};
pub use response::{ApiError, ApiResponse, ApiResult, error_codes};
