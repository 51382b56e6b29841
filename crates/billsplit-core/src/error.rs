//! # Error Types
//!
//! Domain-specific error types for billsplit-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  billsplit-core errors (this file)                                      │
//! │  ├── ValidationError  - A single input was rejected at mutation time   │
//! │  └── CoreError        - A whole request was rejected                   │
//! │                                                                         │
//! │  api module                                                             │
//! │  └── ApiError         - What a client sees (serialized)                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Client                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Computation (`subtotal`, `summary`, `shares`) never fails. Every error in
//! this file is raised while a bill is being built.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors raised by `Bill::add_item`, `Bill::set_tax` and
/// `Bill::set_discount`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Tax value is negative, NaN, infinite, or overflows the bill totals.
    #[error("Tax must be a non-negative number within range, got {value}")]
    InvalidTax { value: f64 },

    /// Item has nobody to split its cost between.
    ///
    /// ## When This Occurs
    /// ```text
    /// add_item("Pizza", 20.0, 1, [])
    ///      │
    ///      ▼
    /// per-person share = 20.0 / 0  ← never allowed to happen
    ///      │
    ///      ▼
    /// EmptyShare { item: "Pizza" }
    /// ```
    #[error("Item '{item}' must be shared by at least one person")]
    EmptyShare { item: String },

    /// A participant name is empty after trimming.
    #[error("Item '{item}' has a blank participant name")]
    BlankParticipant { item: String },

    /// The same participant appears twice in one item's sharing list.
    #[error("Item '{item}' lists '{participant}' more than once")]
    DuplicateParticipant { item: String, participant: String },

    /// Rate is negative, NaN, infinite, or its line total overflows.
    #[error("Item '{item}' has invalid rate {rate}")]
    InvalidRate { item: String, rate: f64 },

    /// Quantity is negative.
    #[error("Item '{item}' has negative quantity {quantity}")]
    InvalidQuantity { item: String, quantity: i64 },

    /// Discount is NaN, infinite, or overflows the bill totals.
    #[error("Discount must be a finite percentage within range, got {value}")]
    InvalidDiscount { value: f64 },
}

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by the request-level entry points in [`crate::api`].
#[derive(Debug, Error)]
pub enum CoreError {
    /// One of the request's items was rejected.
    ///
    /// `index` is the zero-based position of the item in the request.
    #[error("Item #{index} rejected: {source}")]
    ItemRejected {
        index: usize,
        #[source]
        source: ValidationError,
    },

    /// Validation error outside of item insertion (tax, discount).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns the underlying validation failure.
    pub fn validation(&self) -> &ValidationError {
        match self {
            CoreError::ItemRejected { source, .. } => source,
            CoreError::Validation(err) => err,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
