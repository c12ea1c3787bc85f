//! API response types and error codes
//!
//! - `ApiResponse<T>`: envelope for errors and system endpoints
//! - `ApiError`: boundary error rendered as `ApiResponse<()>`
//! - `error_codes`: standard error code constants
//!
//! Order endpoints return the order representation itself on success;
//! only failures use the envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::orders::OrderError;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// API response envelope
///
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or absent (error)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

// ============================================================================
// Boundary Error
// ============================================================================

/// Error returned by handlers
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            msg,
        )
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        let status = match e.http_status() {
            400 => StatusCode::BAD_REQUEST,
            404 => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let code = match e.code() {
            "ORDER_NOT_FOUND" => error_codes::ORDER_NOT_FOUND,
            "INVALID_PARAMETER" => error_codes::INVALID_PARAMETER,
            _ => error_codes::INTERNAL_ERROR,
        };

        if status.is_server_error() {
            // storage details stay in the log
            tracing::error!("Order storage failure: {}", e);
            return Self::new(status, code, "Internal server error");
        }
        Self::new(status, code, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ApiResponse::<()>::error(self.code, self.msg)),
        )
            .into_response()
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;

    // Resource errors (4xxx)
    pub const ORDER_NOT_FOUND: i32 = 4001;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from(OrderError::not_found_id(3));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, error_codes::ORDER_NOT_FOUND);
        assert!(err.msg.contains("id 3"));
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = ApiError::from(OrderError::Validation("items: empty".into()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, error_codes::INVALID_PARAMETER);
    }

    #[test]
    fn test_storage_errors_hide_details() {
        let err = ApiError::from(OrderError::Database("password=secret".into()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.msg.contains("secret"));
    }

    #[test]
    fn test_status_follows_order_error_helpers() {
        let errors = [
            OrderError::not_found_id(1),
            OrderError::not_found_token("t"),
            OrderError::Validation("bad".into()),
            OrderError::DuplicateToken,
            OrderError::Database("down".into()),
        ];
        for e in errors {
            let expected = e.http_status();
            let err = ApiError::from(e);
            assert_eq!(err.status.as_u16(), expected);
        }
        assert_eq!(
            ApiError::from(OrderError::DuplicateToken).code,
            error_codes::INTERNAL_ERROR
        );
    }

    #[test]
    fn test_success_envelope_uses_success_code() {
        let json = serde_json::to_value(ApiResponse::success(7)).unwrap();
        assert_eq!(json["code"], error_codes::SUCCESS);
        assert_eq!(json["data"], 7);
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let json = serde_json::to_value(ApiResponse::<()>::error(4001, "missing")).unwrap();
        assert_eq!(json["code"], 4001);
        assert_eq!(json["msg"], "missing");
        assert!(json.get("data").is_none());
    }
}
