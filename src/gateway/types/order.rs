//! Order request extraction
//!
//! [`OrderPayload`] parses the create/update body and [`OrderId`] the
//! `{id}` path segment. Their rejections (bad JSON, missing field, wrong
//! type, non-numeric id) become the same 400 envelope that field
//! validation produces.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;

use crate::orders::OrderRequest;

use super::response::ApiError;

/// JSON body of `POST /api/orders` and `PUT /api/orders/{id}`
#[derive(Debug)]
pub struct OrderPayload(pub OrderRequest);

impl<S> FromRequest<S> for OrderPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(order) = Json::<OrderRequest>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e.body_text())))?;
        Ok(OrderPayload(order))
    }
}

/// `{id}` segment of `/api/orders/{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderId(pub i64);

impl<S> FromRequestParts<S> for OrderId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid order id: {}", e.body_text())))?;
        Ok(OrderId(id))
    }
}
