//! Invoicing domain: bills, line items, and amount reconciliation.
//!
//! Invoices carry their line items as a JSON list and must reconcile
//! arithmetically before they persist: each item's quantity times unit
//! price matches its total, item totals sum to the subtotal, and
//! subtotal plus tax matches the grand total, all within a single
//! currency tolerance. Each invoice also carries a random public token
//! so clients can view and pay it without an account.

mod errors;
mod invoice;
mod line_item;
mod public_token;
mod status;

pub use errors::InvoicingError;
pub use invoice::Invoice;
pub use line_item::{amounts_match, validate_amounts, LineItem, AMOUNT_TOLERANCE};
pub use public_token::PublicToken;
pub use status::InvoiceStatus;
