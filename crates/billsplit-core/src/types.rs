//! # Domain Types
//!
//! Core domain types used throughout the bill splitter.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │   BillSummary   │   │     Shares      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  subtotal       │   │  participant →  │       │
//! │  │  rate           │   │  tax_amount     │   │    amount owed  │       │
//! │  │  quantity       │   │  discount_amount│   │                 │       │
//! │  │  shared_by      │   │  final_total    │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   TaxSetting    │   │  DiscountBasis  │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Percent(f64)   │   │  AfterTax       │                             │
//! │  │  Amount(f64)    │   │  Subtotal       │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts are plain `f64`. No rounding is applied anywhere in the core.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Item
// =============================================================================

/// One purchased line entry and the people splitting its cost evenly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Display name. Not required to be unique across items.
    pub name: String,

    /// Price per unit.
    pub rate: f64,

    /// Number of units ordered.
    pub quantity: i64,

    /// Who shared this item, in input order.
    pub shared_by: Vec<String>,
}

impl Item {
    /// Line total before tax and discount (rate × quantity).
    #[inline]
    pub fn total(&self) -> f64 {
        self.rate * self.quantity as f64
    }

    /// Amount each sharer owes for this line before tax and discount.
    ///
    /// Items stored in a `Bill` always have at least one sharer.
    #[inline]
    pub fn per_person(&self) -> f64 {
        self.total() / self.shared_by.len() as f64
    }
}

// =============================================================================
// Tax Setting
// =============================================================================

/// How the tax was supplied.
///
/// An absolute amount is turned into a percentage of the subtotal when the
/// bill is computed, so it always refers to the finished item list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaxSetting {
    /// Tax percentage (5.0 = 5%).
    Percent(f64),
    /// Absolute tax amount for the whole bill.
    Amount(f64),
}

impl TaxSetting {
    /// Resolves the setting to a percentage of `subtotal`.
    ///
    /// An absolute amount on a zero subtotal resolves to 0%.
    pub fn percent_of(&self, subtotal: f64) -> f64 {
        match *self {
            TaxSetting::Percent(percent) => percent,
            TaxSetting::Amount(amount) if subtotal > 0.0 => amount / subtotal * 100.0,
            TaxSetting::Amount(_) => 0.0,
        }
    }
}

impl Default for TaxSetting {
    fn default() -> Self {
        TaxSetting::Percent(0.0)
    }
}

// =============================================================================
// Discount Basis
// =============================================================================

/// Which amount the discount percentage applies to.
///
/// ```text
/// AfterTax (default)                  Subtotal (legacy)
/// ──────────────────                  ─────────────────
/// subtotal        100                 subtotal        100
/// + tax 10%        10                 + tax 10%        10
/// = after tax     110                 - disc 10%       10  (of subtotal)
/// - disc 10%       11  (of 110)       = total         100
/// = total          99
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountBasis {
    /// Discount is taken off the post-tax amount.
    #[default]
    AfterTax,
    /// Discount is taken off the pre-tax subtotal.
    Subtotal,
}

// =============================================================================
// Bill Summary
// =============================================================================

/// Totals for a whole bill.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillSummary {
    pub subtotal: f64,
    pub tax_amount: f64,
    /// Effective tax percentage (resolved if the tax was given as an amount).
    pub tax_percent: f64,
    pub discount_amount: f64,
    pub discount_percent: f64,
    pub final_total: f64,
}

// =============================================================================
// Shares
// =============================================================================

/// Amount owed per participant, tax and discount included.
///
/// Key order is alphabetical and carries no meaning.
pub type Shares = BTreeMap<String, f64>;

// =============================================================================
// Unit Tests
// =============================================================================
