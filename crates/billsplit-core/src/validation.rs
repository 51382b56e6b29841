//! # Validation Module
//!
//! Input checks run by `Bill` at mutation time.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Request decoding (serde)                                      │
//! │  └── Shape and types (quantity must be an integer, ...)                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE, called from add_item / set_tax / set_discount    │
//! │  ├── Rate / quantity ranges, line total within f64 range                │
//! │  ├── Sharing list (non-empty, trimmed, no duplicates)                   │
//! │  └── Tax / discount finiteness                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Bill totals (Bill, after each mutation)                       │
//! │  └── Tax, discount and final total stay finite                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Computation: assumes a well-formed bill, never fails                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Item Validators
// =============================================================================

/// Validates a unit rate.
///
/// ## Rules
/// - Must be finite
/// - Must be non-negative (zero is allowed for free items)
///
/// ## Example
/// ```rust
/// use billsplit_core::validation::validate_rate;
///
/// assert!(validate_rate("Pizza", 20.0).is_ok());
/// assert!(validate_rate("Water", 0.0).is_ok());
/// assert!(validate_rate("Refund", -1.0).is_err());
/// ```
pub fn validate_rate(item: &str, rate: f64) -> ValidationResult<()> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(ValidationError::InvalidRate {
            item: item.to_string(),
            rate,
        });
    }

    Ok(())
}

/// Validates a quantity. Zero is allowed.
pub fn validate_quantity(item: &str, quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::InvalidQuantity {
            item: item.to_string(),
            quantity,
        });
    }

    Ok(())
}

/// Validates that an item's line total, and the bill subtotal once the item
/// is added, are representable.
///
/// `rate` and `quantity` are assumed to have passed [`validate_rate`] and
/// [`validate_quantity`]. An overflow is reported against the rate.
///
/// ## Example
/// ```rust
/// use billsplit_core::validation::validate_line_total;
///
/// assert!(validate_line_total("Pizza", 20.0, 3, 100.0).is_ok());
/// assert!(validate_line_total("Yacht", 1e308, 10, 0.0).is_err());
/// assert!(validate_line_total("Yacht", 1e308, 1, f64::MAX).is_err());
/// ```
pub fn validate_line_total(
    item: &str,
    rate: f64,
    quantity: i64,
    subtotal: f64,
) -> ValidationResult<()> {
    let line_total = rate * quantity as f64;
    if !line_total.is_finite() || !(subtotal + line_total).is_finite() {
        return Err(ValidationError::InvalidRate {
            item: item.to_string(),
            rate,
        });
    }

    Ok(())
}

/// Validates and normalizes an item's sharing list.
///
/// ## Rules
/// - Names are trimmed
/// - A name that is empty after trimming is rejected
/// - The same name may not appear twice
/// - The list may not be empty
///
/// ## Returns
/// The trimmed names, in input order.
///
/// ## Example
/// ```rust
/// use billsplit_core::validation::normalize_shared_by;
///
/// let names = normalize_shared_by("Pizza", [" Alice", "Bob "]).unwrap();
/// assert_eq!(names, vec!["Alice".to_string(), "Bob".to_string()]);
///
/// assert!(normalize_shared_by("Pizza", Vec::<String>::new()).is_err());
/// assert!(normalize_shared_by("Pizza", ["Alice", "Alice "]).is_err());
/// ```
pub fn normalize_shared_by<I, S>(item: &str, shared_by: I) -> ValidationResult<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for name in shared_by {
        let name = name.as_ref().trim();

        if name.is_empty() {
            return Err(ValidationError::BlankParticipant {
                item: item.to_string(),
            });
        }

        if !seen.insert(name.to_string()) {
            return Err(ValidationError::DuplicateParticipant {
                item: item.to_string(),
                participant: name.to_string(),
            });
        }

        names.push(name.to_string());
    }

    if names.is_empty() {
        return Err(ValidationError::EmptyShare {
            item: item.to_string(),
        });
    }

    Ok(names)
}

// =============================================================================
// Bill-level Validators
// =============================================================================

/// Validates a tax value (percentage or absolute amount).
///
/// ## Rules
/// - Must be finite
/// - Must be non-negative
pub fn validate_tax(value: f64) -> ValidationResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidTax { value });
    }

    Ok(())
}

/// Validates a discount percentage.
///
/// Only NaN and infinities are rejected. Negative and >100% discounts are
/// accepted as given.
pub fn validate_discount(percent: f64) -> ValidationResult<()> {
    if !percent.is_finite() {
        return Err(ValidationError::InvalidDiscount { value: percent });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate("a", 0.0).is_ok());
        assert!(validate_rate("a", 12.5).is_ok());

        assert!(validate_rate("a", -0.01).is_err());
        assert!(validate_rate("a", f64::NAN).is_err());
        assert!(validate_rate("a", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity("a", 0).is_ok());
        assert!(validate_quantity("a", 3).is_ok());
        assert_eq!(
            validate_quantity("Soda", -1),
            Err(ValidationError::InvalidQuantity {
                item: "Soda".to_string(),
                quantity: -1
            })
        );
    }

    #[test]
    fn test_validate_line_total_rejects_overflow() {
        assert!(validate_line_total("a", 0.0, i64::MAX, 0.0).is_ok());
        assert!(validate_line_total("a", 1e300, 1000, 0.0).is_ok());

        assert_eq!(
            validate_line_total("Yacht", 1e308, 10, 0.0),
            Err(ValidationError::InvalidRate {
                item: "Yacht".to_string(),
                rate: 1e308
            })
        );
        // Fits alone, overflows the running subtotal.
        assert!(validate_line_total("Yacht", 1e308, 1, 1e307).is_ok());
        assert!(validate_line_total("Yacht", 1e308, 1, 1e308).is_err());
    }

    #[test]
    fn test_normalize_shared_by_trims_and_keeps_order() {
        let names = normalize_shared_by("Pizza", ["Charlie ", " Alice", "Bob"]).unwrap();
        assert_eq!(names, vec!["Charlie", "Alice", "Bob"]);
    }

    #[test]
    fn test_normalize_shared_by_rejects_empty_list() {
        let err = normalize_shared_by("Pizza", Vec::<&str>::new()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptyShare {
                item: "Pizza".to_string()
            }
        );
    }

    #[test]
    fn test_normalize_shared_by_rejects_blank_name() {
        let err = normalize_shared_by("Pizza", ["Alice", "   "]).unwrap_err();
        assert!(matches!(err, ValidationError::BlankParticipant { .. }));
    }

    #[test]
    fn test_normalize_shared_by_rejects_duplicates_after_trim() {
        let err = normalize_shared_by("Pizza", ["Alice", " Alice"]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateParticipant {
                item: "Pizza".to_string(),
                participant: "Alice".to_string()
            }
        );
    }

    #[test]
    fn test_validate_tax() {
        assert!(validate_tax(0.0).is_ok());
        assert!(validate_tax(8.25).is_ok());
        assert!(validate_tax(-1.0).is_err());
        assert!(validate_tax(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_discount_accepts_any_finite_value() {
        assert!(validate_discount(0.0).is_ok());
        assert!(validate_discount(-10.0).is_ok());
        assert!(validate_discount(150.0).is_ok());
        assert!(validate_discount(f64::NAN).is_err());
        assert!(validate_discount(f64::NEG_INFINITY).is_err());
    }
}
