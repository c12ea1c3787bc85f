//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::HealthResponse;
use crate::orders::{Order, OrderItem, OrderItemRequest, OrderRequest, OrderStatus};

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Menu Digital Orders API",
        version = "1.0.0",
        description = "Order taking for a digital restaurant menu: orders, line items, totals and lookup tokens.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::order::list_orders,
        crate::gateway::handlers::order::create_order,
        crate::gateway::handlers::order::get_order,
        crate::gateway::handlers::order::get_order_by_token,
        crate::gateway::handlers::order::update_order,
        crate::gateway::handlers::order::delete_order,
    ),
    components(
        schemas(
            HealthResponse,
            Order,
            OrderItem,
            OrderStatus,
            OrderRequest,
            OrderItemRequest,
        )
    ),
    tags(
        (name = "Orders", description = "Order creation, lookup, replacement and deletion"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
