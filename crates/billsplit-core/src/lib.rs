//! # billsplit-core: Pure Business Logic for the Bill Splitter
//!
//! Splits a shared bill (e.g. a restaurant check) between the people who
//! shared each item, spreading tax and discount in proportion to what each
//! person consumed.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Bill Splitter Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Front-ends (CLI, web handler, ...)                     │   │
//! │  │    read request ──► calculate() ──► render response            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CalculateRequest                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ billsplit-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   bill    │  │    api    │  │ validation│  │   │
//! │  │   │   Item    │  │   Bill    │  │ calculate │  │   rules   │  │   │
//! │  │   │  Summary  │  │  shares   │  │ ApiError  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, BillSummary, Shares, ...)
//! - [`bill`] - The `Bill` calculator
//! - [`api`] - Request/response types and `calculate`
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use billsplit_core::Bill;
//!
//! let mut bill = Bill::new();
//! bill.add_item("Pizza", 20.0, 1, ["Alice", "Bob", "Charlie"]).unwrap();
//! bill.add_item("Salad", 12.0, 1, ["Alice", "Bob"]).unwrap();
//! bill.add_item("Soda", 3.0, 2, ["Charlie"]).unwrap();
//! bill.set_tax(5.0, true).unwrap();
//! bill.set_discount(10.0).unwrap();
//!
//! let summary = bill.summary();
//! assert!((summary.final_total - 35.91).abs() < 1e-9);
//!
//! let owed: f64 = bill.shares().values().sum();
//! assert!((owed - summary.final_total).abs() < 1e-9);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod api;
pub mod bill;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use api::{calculate, calculate_with_basis, ApiError, CalculateRequest, CalculateResponse};
pub use bill::Bill;
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;
