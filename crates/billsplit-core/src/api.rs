//! # API Module
//!
//! Request/response types and the `calculate` entry point.
//!
//! This is the boundary a transport (HTTP handler, CLI, IPC) talks to. It
//! knows nothing about the transport itself.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CalculateRequest (JSON)                                                │
//! │  { items: [...], tax_percent, discount_percent, tax_amount? }           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  into_bill() ─── add_item() per item ─── set_tax() ─── set_discount()   │
//! │       │                                                                 │
//! │       ├── any rejection → CoreError → ApiError { code, message }        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  summary() + shares()                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CalculateResponse { subtotal, tax_amount, ..., shares: {...} }         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ts_rs::TS;

use crate::bill::Bill;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{BillSummary, DiscountBasis, Item, Shares};

// =============================================================================
// Request / Response
// =============================================================================

/// A bill-calculation request.
///
/// ```json
/// {
///   "items": [{ "name": "Pizza", "rate": 20.0, "quantity": 1,
///               "shared_by": ["Alice", "Bob"] }],
///   "tax_percent": 5.0,
///   "discount_percent": 10.0
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalculateRequest {
    pub items: Vec<Item>,

    #[serde(default)]
    pub tax_percent: f64,

    #[serde(default)]
    pub discount_percent: f64,

    /// Absolute tax for the whole bill. Takes precedence over `tax_percent`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub tax_amount: Option<f64>,
}

/// The computed bill: summary fields flattened next to `shares`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalculateResponse {
    #[serde(flatten)]
    pub summary: BillSummary,
    pub shares: Shares,
}

impl CalculateRequest {
    /// Builds a validated `Bill` from the request.
    ///
    /// Items are added first, then the tax, then the discount.
    pub fn into_bill(&self, basis: DiscountBasis) -> CoreResult<Bill> {
        let mut bill = Bill::with_discount_basis(basis);

        for (index, item) in self.items.iter().enumerate() {
            bill.add_item(item.name.as_str(), item.rate, item.quantity, &item.shared_by)
                .map_err(|source| CoreError::ItemRejected { index, source })?;
        }

        match self.tax_amount {
            Some(amount) => bill.set_tax(amount, false)?,
            None => bill.set_tax(self.tax_percent, true)?,
        }
        bill.set_discount(self.discount_percent)?;

        Ok(bill)
    }
}

/// Computes a bill with the post-tax discount basis.
///
/// ## Example
/// ```rust
/// use billsplit_core::api::{calculate, CalculateRequest};
/// use billsplit_core::Item;
///
/// let request = CalculateRequest {
///     items: vec![Item {
///         name: "Dinner".to_string(),
///         rate: 30.0,
///         quantity: 1,
///         shared_by: vec!["Alice".to_string(), "Bob".to_string()],
///     }],
///     ..Default::default()
/// };
///
/// let response = calculate(&request).unwrap();
/// assert_eq!(response.summary.final_total, 30.0);
/// assert_eq!(response.shares["Alice"], 15.0);
/// ```
pub fn calculate(request: &CalculateRequest) -> CoreResult<CalculateResponse> {
    calculate_with_basis(request, DiscountBasis::AfterTax)
}

/// Computes a bill, applying the discount to `basis`.
pub fn calculate_with_basis(
    request: &CalculateRequest,
    basis: DiscountBasis,
) -> CoreResult<CalculateResponse> {
    if basis == DiscountBasis::Subtotal {
        warn!("Using legacy discount basis: discount applies to the pre-tax subtotal");
    }

    let bill = request.into_bill(basis)?;
    let summary = bill.summary();
    let shares = bill.shares();

    info!(
        items = bill.items().len(),
        participants = shares.len(),
        final_total = summary.final_total,
        "Bill calculated"
    );

    Ok(CalculateResponse { summary, shares })
}

// =============================================================================
// API Error
// =============================================================================

/// Error payload returned to a client.
///
/// ```json
/// {
///   "code": "INVALID_SHARE",
///   "message": "Item #0 rejected: Item 'Pizza' must be shared by at least one person"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Negative or non-finite tax, or one that overflows the bill totals
    InvalidTax,

    /// Empty, blank or duplicated sharing list
    InvalidShare,

    /// Negative quantity, negative or non-finite rate, overflowing line total
    InvalidQuantityOrRate,

    /// Non-finite discount, or one that overflows the bill totals
    InvalidDiscount,
}

impl From<&ValidationError> for ErrorCode {
    fn from(err: &ValidationError) -> Self {
        match err {
            ValidationError::InvalidTax { .. } => ErrorCode::InvalidTax,
            ValidationError::EmptyShare { .. }
            | ValidationError::BlankParticipant { .. }
            | ValidationError::DuplicateParticipant { .. } => ErrorCode::InvalidShare,
            ValidationError::InvalidRate { .. } | ValidationError::InvalidQuantity { .. } => {
                ErrorCode::InvalidQuantityOrRate
            }
            ValidationError::InvalidDiscount { .. } => ErrorCode::InvalidDiscount,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError {
            code: ErrorCode::from(err.validation()),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, rate: f64, quantity: i64, shared_by: &[&str]) -> Item {
        Item {
            name: name.to_string(),
            rate,
            quantity,
            shared_by: shared_by.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_request_defaults_percentages_to_zero() {
        let json = r#"{ "items": [
            { "name": "Pizza", "rate": 20.0, "quantity": 1, "shared_by": ["Alice", "Bob"] }
        ] }"#;
        let request: CalculateRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.tax_percent, 0.0);
        assert_eq!(request.discount_percent, 0.0);
        assert_eq!(request.tax_amount, None);
        assert_eq!(request.items[0].shared_by, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_response_flattens_summary() {
        let request = CalculateRequest {
            items: vec![item("Dinner", 100.0, 1, &["Alice"])],
            tax_percent: 10.0,
            discount_percent: 10.0,
            tax_amount: None,
        };
        let response = calculate(&request).unwrap();
        let value = serde_json::to_value(&response).unwrap();

        for key in [
            "subtotal",
            "tax_amount",
            "tax_percent",
            "discount_amount",
            "discount_percent",
            "final_total",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert!(value.get("summary").is_none());
        assert!(value["shares"]["Alice"].is_number());
    }

    #[test]
    fn test_tax_amount_overrides_tax_percent() {
        let request = CalculateRequest {
            items: vec![item("Dinner", 200.0, 1, &["Alice", "Bob"])],
            tax_percent: 50.0,
            discount_percent: 0.0,
            tax_amount: Some(10.0),
        };
        let response = calculate(&request).unwrap();

        assert!((response.summary.tax_amount - 10.0).abs() < 1e-9);
        assert!((response.summary.tax_percent - 5.0).abs() < 1e-9);
        assert!((response.shares["Bob"] - 105.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejected_item_reports_index() {
        let request = CalculateRequest {
            items: vec![
                item("Pizza", 20.0, 1, &["Alice"]),
                item("Salad", 12.0, 1, &[]),
            ],
            ..Default::default()
        };

        let err = calculate(&request).unwrap_err();
        assert!(matches!(err, CoreError::ItemRejected { index: 1, .. }));
    }

    #[test]
    fn test_api_error_codes() {
        let cases = [
            (
                CalculateRequest {
                    items: vec![item("Pizza", 20.0, 1, &[])],
                    ..Default::default()
                },
                ErrorCode::InvalidShare,
            ),
            (
                CalculateRequest {
                    items: vec![item("Pizza", -20.0, 1, &["Alice"])],
                    ..Default::default()
                },
                ErrorCode::InvalidQuantityOrRate,
            ),
            (
                CalculateRequest {
                    items: vec![item("Pizza", 20.0, 1, &["Alice"])],
                    tax_percent: -5.0,
                    ..Default::default()
                },
                ErrorCode::InvalidTax,
            ),
            (
                CalculateRequest {
                    items: vec![item("Pizza", 20.0, 1, &["Alice"])],
                    discount_percent: f64::INFINITY,
                    ..Default::default()
                },
                ErrorCode::InvalidDiscount,
            ),
        ];

        for (request, code) in cases {
            let err = ApiError::from(calculate(&request).unwrap_err());
            assert_eq!(err.code, code);
        }
    }

    #[test]
    fn test_api_error_serialization() {
        let err = ApiError::from(CoreError::ItemRejected {
            index: 0,
            source: ValidationError::EmptyShare {
                item: "Pizza".to_string(),
            },
        });
        let value = serde_json::to_value(&err).unwrap();

        assert_eq!(value["code"], "INVALID_SHARE");
        assert_eq!(
            value["message"],
            "Item #0 rejected: Item 'Pizza' must be shared by at least one person"
        );
    }

    #[test]
    fn test_absolute_tax_overflow_is_rejected_not_nan() {
        let json = r#"{
            "items": [ { "name": "Mint", "rate": 0.001, "quantity": 1, "shared_by": ["A"] } ],
            "tax_amount": 1e306
        }"#;
        let request: CalculateRequest = serde_json::from_str(json).unwrap();

        let err = ApiError::from(calculate(&request).unwrap_err());
        assert_eq!(err.code, ErrorCode::InvalidTax);
    }

    #[test]
    fn test_item_overflow_reports_rate_error() {
        let request = CalculateRequest {
            items: vec![item("Yacht", 1e308, 10, &["Alice", "Bob"])],
            ..Default::default()
        };

        let err = calculate(&request).unwrap_err();
        assert!(matches!(err, CoreError::ItemRejected { index: 0, .. }));
        assert_eq!(ApiError::from(err).code, ErrorCode::InvalidQuantityOrRate);
    }

    #[test]
    fn test_calculate_with_subtotal_basis() {
        let request = CalculateRequest {
            items: vec![item("Dinner", 100.0, 1, &["Alice"])],
            tax_percent: 10.0,
            discount_percent: 10.0,
            tax_amount: None,
        };

        let legacy = calculate_with_basis(&request, DiscountBasis::Subtotal).unwrap();
        assert!((legacy.summary.final_total - 100.0).abs() < 1e-9);

        let current = calculate(&request).unwrap();
        assert!((current.summary.final_total - 99.0).abs() < 1e-9);
    }
}
