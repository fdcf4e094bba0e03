//! Invoicing handlers: drafting, sending, and the public pay path.

mod create_invoice;
mod get_invoice;
mod get_public_invoice;
mod list_invoices;
mod pay_public_invoice;
mod send_invoice;

pub use create_invoice::{CreateInvoiceCommand, CreateInvoiceHandler};
pub use get_invoice::{GetInvoiceHandler, GetInvoiceQuery};
pub use get_public_invoice::{GetPublicInvoiceHandler, GetPublicInvoiceQuery, PublicInvoiceView};
pub use list_invoices::{ListInvoicesHandler, ListInvoicesQuery};
pub use pay_public_invoice::{
    PayPublicInvoiceCommand, PayPublicInvoiceHandler, PayPublicInvoiceResult,
};
pub use send_invoice::{SendInvoiceCommand, SendInvoiceHandler, SendInvoiceResult};
