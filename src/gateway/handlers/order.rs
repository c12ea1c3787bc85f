//! Order handlers (list, create, get, get by token, update, delete)
//!
//! Each handler forwards to [`crate::orders::OrderService`]; error mapping
//! happens in `From<OrderError> for ApiError`.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::orders::{Order, OrderRequest};

use super::super::state::AppState;
use super::super::types::{ApiResult, OrderId, OrderPayload};

/// List all orders
///
/// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "All orders", body = Vec<Order>)
    ),
    tag = "Orders"
)]
pub async fn list_orders(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Order>>> {
    let orders = state.orders.list_orders().await?;
    Ok(Json(orders))
}

/// Create an order
///
/// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = OrderRequest,
    responses(
        (status = 201, description = "Order created", body = Order),
        (status = 400, description = "Malformed payload")
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    OrderPayload(req): OrderPayload,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let order = state.orders.create_order(req).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Get an order by id
///
/// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 400, description = "Non-numeric id"),
        (status = 404, description = "No order with this id")
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    OrderId(id): OrderId,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.get_order(id).await?))
}

/// Get an order by its lookup token
///
/// GET /api/orders/token/{token}
#[utoipa::path(
    get,
    path = "/api/orders/token/{token}",
    params(("token" = String, Path, description = "Token issued at creation")),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 404, description = "No order with this token")
    ),
    tag = "Orders"
)]
pub async fn get_order_by_token(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.get_order_by_token(&token).await?))
}

/// Replace an order's names and items
///
/// PUT /api/orders/{id}
#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    params(("id" = i64, Path, description = "Order id")),
    request_body = OrderRequest,
    responses(
        (status = 200, description = "Order updated", body = Order),
        (status = 400, description = "Malformed payload or id"),
        (status = 404, description = "No order with this id")
    ),
    tag = "Orders"
)]
pub async fn update_order(
    State(state): State<Arc<AppState>>,
    OrderId(id): OrderId,
    OrderPayload(req): OrderPayload,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.update_order(id, req).await?))
}

/// Delete an order and its items
///
/// DELETE /api/orders/{id}
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 400, description = "Non-numeric id"),
        (status = 404, description = "No order with this id")
    ),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    OrderId(id): OrderId,
) -> ApiResult<StatusCode> {
    state.orders.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
