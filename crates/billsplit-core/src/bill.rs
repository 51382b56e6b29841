//! # Bill Module
//!
//! The bill-share calculator.
//!
//! ## Allocation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Summary (whole bill)                                 │
//! │                                                                         │
//! │  subtotal         = Σ rate × quantity                                   │
//! │  tax_amount       = subtotal × tax% / 100                               │
//! │  amount_after_tax = subtotal + tax_amount                               │
//! │  discount_amount  = amount_after_tax × discount% / 100                  │
//! │  final_total      = amount_after_tax − discount_amount                  │
//! │                                                                         │
//! │                    Shares (per participant)                             │
//! │                                                                         │
//! │  S  = Σ item_total / |shared_by|          over items they shared        │
//! │  S += tax_amount × S / subtotal                                         │
//! │  S −= discount_amount × S / amount_after_tax   (S already includes tax) │
//! │                                                                         │
//! │  Σ S == final_total                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With [`DiscountBasis::Subtotal`] the discount is a percentage of the
//! subtotal and both adjustments use the same pre-tax ratio `S / subtotal`.

use std::collections::BTreeSet;

use tracing::debug;

use crate::types::{BillSummary, DiscountBasis, Item, Shares, TaxSetting};
use crate::error::ValidationError;
use crate::validation::{
    normalize_shared_by, validate_discount, validate_line_total, validate_quantity, validate_rate,
    validate_tax, ValidationResult,
};

// =============================================================================
// Bill
// =============================================================================

/// A bill under construction.
///
/// ## Lifecycle
/// ```text
/// Bill::new() ──► add_item()* ──► set_tax() / set_discount() ──► summary()
///                                                                shares()
/// ```
///
/// All validation happens in the mutating methods. Once a value is stored it
/// is known to be well-formed, so the query methods never fail.
#[derive(Debug, Clone, Default)]
pub struct Bill {
    items: Vec<Item>,
    participants: BTreeSet<String>,
    tax: TaxSetting,
    discount_percent: f64,
    discount_basis: DiscountBasis,
}

/// Intermediate totals shared by `summary` and `shares`.
#[derive(Debug, Clone, Copy)]
struct Totals {
    subtotal: f64,
    tax_percent: f64,
    tax_amount: f64,
    amount_after_tax: f64,
    discount_amount: f64,
    final_total: f64,
}

impl Bill {
    /// Creates an empty bill with 0% tax, 0% discount and the post-tax
    /// discount basis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty bill that applies the discount to `basis`.
    pub fn with_discount_basis(basis: DiscountBasis) -> Self {
        Bill {
            discount_basis: basis,
            ..Self::default()
        }
    }

    /// Appends an item and registers its sharers as participants.
    ///
    /// Participant names are trimmed. Items with the same name are kept as
    /// separate lines.
    ///
    /// ## Errors
    /// - `InvalidRate` for a negative or non-finite rate, or a line total
    ///   (or resulting subtotal) outside the `f64` range
    /// - `InvalidQuantity` for a negative quantity
    /// - `EmptyShare`, `BlankParticipant`, `DuplicateParticipant` for a bad
    ///   sharing list
    /// - `InvalidTax` / `InvalidDiscount` when the new subtotal would make
    ///   the stored tax or discount overflow
    ///
    /// On error the bill is left unchanged.
    ///
    /// ## Example
    /// ```rust
    /// use billsplit_core::Bill;
    ///
    /// let mut bill = Bill::new();
    /// bill.add_item("Pizza", 20.0, 1, ["Alice", "Bob"]).unwrap();
    /// assert!(bill.add_item("Ghost", 5.0, 1, Vec::<String>::new()).is_err());
    /// assert_eq!(bill.items().len(), 1);
    /// ```
    pub fn add_item<I, S>(
        &mut self,
        name: impl Into<String>,
        rate: f64,
        quantity: i64,
        shared_by: I,
    ) -> ValidationResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();

        let subtotal = self.subtotal();
        let shared_by = validate_rate(&name, rate)
            .and_then(|_| validate_quantity(&name, quantity))
            .and_then(|_| validate_line_total(&name, rate, quantity, subtotal))
            .and_then(|_| {
                let subtotal = subtotal + rate * quantity as f64;
                self.check_totals(subtotal, self.tax, self.discount_percent)
            })
            .and_then(|_| normalize_shared_by(&name, shared_by))
            .map_err(|err| {
                debug!(item = %name, error = %err, "Rejected item");
                err
            })?;

        debug!(item = %name, rate, quantity, sharers = shared_by.len(), "Adding item");

        self.participants.extend(shared_by.iter().cloned());
        self.items.push(Item {
            name,
            rate,
            quantity,
            shared_by,
        });

        Ok(())
    }

    /// Sets the tax, either as a percentage or as an absolute amount.
    ///
    /// An absolute amount is converted to a percentage of the subtotal when
    /// the bill is computed, not when this method is called. Calling it
    /// before or after the items are added gives the same result.
    ///
    /// A tax that would overflow the current bill's totals is rejected with
    /// `InvalidTax`, e.g. a huge absolute amount on a tiny subtotal.
    ///
    /// ## Example
    /// ```rust
    /// use billsplit_core::Bill;
    ///
    /// let mut bill = Bill::new();
    /// bill.set_tax(10.0, false).unwrap(); // $10 of tax
    /// bill.add_item("Dinner", 200.0, 1, ["Alice"]).unwrap();
    /// assert!((bill.tax_percent() - 5.0).abs() < 1e-9);
    ///
    /// assert!(bill.set_tax(-1.0, true).is_err());
    /// ```
    pub fn set_tax(&mut self, value: f64, is_percentage: bool) -> ValidationResult<()> {
        let tax = if is_percentage {
            TaxSetting::Percent(value)
        } else {
            TaxSetting::Amount(value)
        };

        validate_tax(value)
            .and_then(|_| self.check_totals(self.subtotal(), tax, self.discount_percent))
            .map_err(|err| {
                debug!(value, is_percentage, "Rejected tax");
                err
            })?;

        self.tax = tax;
        debug!(tax = ?self.tax, "Tax set");

        Ok(())
    }

    /// Sets the discount percentage.
    ///
    /// The value is stored as given, negative and >100% included. Non-finite
    /// values are rejected, as are values that would overflow the discount
    /// amount.
    pub fn set_discount(&mut self, percent: f64) -> ValidationResult<()> {
        validate_discount(percent)
            .and_then(|_| self.check_totals(self.subtotal(), self.tax, percent))
            .map_err(|err| {
                debug!(percent, "Rejected discount");
                err
            })?;

        self.discount_percent = percent;
        Ok(())
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Everyone who shares at least one item.
    pub fn participants(&self) -> &BTreeSet<String> {
        &self.participants
    }

    /// Effective tax percentage for the current items.
    pub fn tax_percent(&self) -> f64 {
        self.tax.percent_of(self.subtotal())
    }

    pub fn discount_percent(&self) -> f64 {
        self.discount_percent
    }

    pub fn discount_basis(&self) -> DiscountBasis {
        self.discount_basis
    }

    /// Σ rate × quantity over all items.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(Item::total).sum()
    }

    /// Computes the whole-bill totals.
    ///
    /// ## Example
    /// ```rust
    /// use billsplit_core::Bill;
    ///
    /// let mut bill = Bill::new();
    /// bill.add_item("Dinner", 100.0, 1, ["Alice", "Bob"]).unwrap();
    /// bill.set_tax(10.0, true).unwrap();
    /// bill.set_discount(10.0).unwrap();
    ///
    /// let summary = bill.summary();
    /// assert!((summary.tax_amount - 10.0).abs() < 1e-9);
    /// assert!((summary.discount_amount - 11.0).abs() < 1e-9);
    /// assert!((summary.final_total - 99.0).abs() < 1e-9);
    /// ```
    pub fn summary(&self) -> BillSummary {
        let totals = self.totals();

        BillSummary {
            subtotal: totals.subtotal,
            tax_amount: totals.tax_amount,
            tax_percent: totals.tax_percent,
            discount_amount: totals.discount_amount,
            discount_percent: self.discount_percent,
            final_total: totals.final_total,
        }
    }

    /// Computes what each participant owes.
    ///
    /// Tax and discount are spread in proportion to each participant's
    /// running share. On a zero subtotal every share stays 0.
    pub fn shares(&self) -> Shares {
        let mut shares: Shares = self
            .participants
            .iter()
            .map(|person| (person.clone(), 0.0))
            .collect();

        for item in &self.items {
            let per_person = item.per_person();
            for person in &item.shared_by {
                *shares.entry(person.clone()).or_insert(0.0) += per_person;
            }
        }

        let totals = self.totals();
        if totals.subtotal > 0.0 {
            for share in shares.values_mut() {
                match self.discount_basis {
                    DiscountBasis::AfterTax => {
                        *share += totals.tax_amount * (*share / totals.subtotal);
                        *share -= totals.discount_amount * (*share / totals.amount_after_tax);
                    }
                    DiscountBasis::Subtotal => {
                        let ratio = *share / totals.subtotal;
                        *share += totals.tax_amount * ratio;
                        *share -= totals.discount_amount * ratio;
                    }
                }
            }
        }

        shares
    }

    fn totals(&self) -> Totals {
        self.totals_with(self.subtotal(), self.tax, self.discount_percent)
    }

    /// Rejects a candidate state whose totals leave the `f64` range.
    fn check_totals(
        &self,
        subtotal: f64,
        tax: TaxSetting,
        discount_percent: f64,
    ) -> ValidationResult<()> {
        let totals = self.totals_with(subtotal, tax, discount_percent);

        let taxed = [totals.tax_percent, totals.tax_amount, totals.amount_after_tax];
        if !taxed.iter().all(|value| value.is_finite()) {
            let (TaxSetting::Percent(value) | TaxSetting::Amount(value)) = tax;
            return Err(ValidationError::InvalidTax { value });
        }

        if !(totals.discount_amount.is_finite() && totals.final_total.is_finite()) {
            return Err(ValidationError::InvalidDiscount {
                value: discount_percent,
            });
        }

        Ok(())
    }

    fn totals_with(&self, subtotal: f64, tax: TaxSetting, discount_percent: f64) -> Totals {
        let tax_percent = tax.percent_of(subtotal);
        let tax_amount = subtotal * (tax_percent / 100.0);
        let amount_after_tax = subtotal + tax_amount;

        let (discount_amount, final_total) = match self.discount_basis {
            DiscountBasis::AfterTax => {
                let discount = amount_after_tax * (discount_percent / 100.0);
                (discount, amount_after_tax - discount)
            }
            DiscountBasis::Subtotal => {
                let discount = subtotal * (discount_percent / 100.0);
                (discount, subtotal + tax_amount - discount)
            }
        };

        Totals {
            subtotal,
            tax_percent,
            tax_amount,
            amount_after_tax,
            discount_amount,
            final_total,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
