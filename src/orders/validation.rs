//! Payload validation for order requests
//!
//! Field rules live on the request types as `validator` attributes. This
//! module holds the custom rules they reference and the conversion of
//! `validator` reports into [`OrderError::Validation`].

use rust_decimal::Decimal;
use validator::{Validate, ValidationError, ValidationErrors};

use super::error::OrderError;
use super::models::OrderRequest;

pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

pub(crate) fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("negative");
        err.message = Some("must not be negative".into());
        return Err(err);
    }
    Ok(())
}

/// Run every field rule on `req`
pub fn validate_request(req: &OrderRequest) -> Result<(), OrderError> {
    req.validate().map_err(into_order_error)
}

fn into_order_error(errors: ValidationErrors) -> OrderError {
    OrderError::Validation(errors.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::models::OrderItemRequest;
    use rust_decimal::dec;

    fn request(items: Vec<OrderItemRequest>) -> OrderRequest {
        OrderRequest {
            customer_name: Some("Ana".to_string()),
            table_number: Some("5".to_string()),
            items,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let req = request(vec![
            OrderItemRequest::new("Pizza", dec!(30.0), 2),
            OrderItemRequest::new("Soda", dec!(5.0), 1),
        ]);
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn test_names_are_optional() {
        let req = OrderRequest {
            customer_name: None,
            table_number: None,
            items: vec![OrderItemRequest::new("Pizza", dec!(30.0), 1)],
        };
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn test_empty_item_list_rejected() {
        let err = validate_request(&request(vec![])).unwrap_err();
        assert!(matches!(err, OrderError::Validation(ref m) if m.contains("at least one item")));
    }

    #[test]
    fn test_blank_item_name_rejected() {
        let err = validate_request(&request(vec![OrderItemRequest::new("  ", dec!(1), 1)]))
            .unwrap_err();
        assert!(matches!(err, OrderError::Validation(ref m) if m.contains("blank")));
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = validate_request(&request(vec![OrderItemRequest::new(
            "Pizza",
            dec!(-0.01),
            1,
        )]))
        .unwrap_err();
        assert!(matches!(err, OrderError::Validation(ref m) if m.contains("negative")));
    }

    #[test]
    fn test_zero_price_allowed() {
        let req = request(vec![OrderItemRequest::new("Water", Decimal::ZERO, 1)]);
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn test_overlong_customer_name_rejected() {
        let mut req = request(vec![OrderItemRequest::new("Pizza", dec!(1), 1)]);
        req.customer_name = Some("x".repeat(256));
        assert!(validate_request(&req).is_err());
        req.customer_name = Some("x".repeat(255));
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn test_not_blank_rule() {
        assert!(validate_not_blank("Pizza").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("\t").is_err());
    }
}
