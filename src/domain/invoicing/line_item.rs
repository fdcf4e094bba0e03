//! Invoice line items and amount reconciliation.
//!
//! All invoice amounts are f64 currency values compared within a
//! single absolute tolerance. This module is the only place that
//! tolerance lives; every arithmetic check routes through it.

use serde::{Deserialize, Serialize};

use super::InvoicingError;

/// Absolute tolerance for comparing currency amounts.
pub const AMOUNT_TOLERANCE: f64 = 0.01;

/// One line on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
}

impl LineItem {
    pub fn new(
        description: impl Into<String>,
        quantity: f64,
        unit_price: f64,
        total: f64,
    ) -> Self {
        LineItem {
            description: description.into(),
            quantity,
            unit_price,
            total,
        }
    }

    /// Whether the item's own arithmetic holds: quantity times unit
    /// price matches the stated total.
    pub fn is_consistent(&self) -> bool {
        amounts_match(self.quantity * self.unit_price, self.total)
    }
}

/// True when two currency amounts are equal within [`AMOUNT_TOLERANCE`].
pub fn amounts_match(a: f64, b: f64) -> bool {
    (a - b).abs() <= AMOUNT_TOLERANCE
}

/// Checks that every item's arithmetic holds, the item totals sum to
/// the subtotal, and subtotal plus tax matches the total.
pub fn validate_amounts(
    items: &[LineItem],
    subtotal: f64,
    tax: f64,
    total: f64,
) -> Result<(), InvoicingError> {
    if items.is_empty() {
        return Err(InvoicingError::validation(
            "items",
            "invoice must have at least one line item",
        ));
    }

    for item in items {
        if item.description.trim().is_empty() {
            return Err(InvoicingError::validation(
                "items",
                "line item description must not be empty",
            ));
        }
        if item.quantity <= 0.0 {
            return Err(InvoicingError::validation(
                "items",
                format!("Line item '{}' has non-positive quantity", item.description),
            ));
        }
        if !item.is_consistent() {
            return Err(InvoicingError::item_mismatch(&item.description));
        }
    }

    let item_sum: f64 = items.iter().map(|item| item.total).sum();
    if !amounts_match(item_sum, subtotal) {
        return Err(InvoicingError::subtotal_mismatch());
    }

    if !amounts_match(subtotal + tax, total) {
        return Err(InvoicingError::total_mismatch());
    }

    Ok(())
}
