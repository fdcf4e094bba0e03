//! Axum routers for invoicing endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{
    create_invoice, get_invoice, get_public_invoice, list_invoices, pay_public_invoice,
    send_invoice,
};

/// Create the member-facing invoicing router.
///
/// # Routes
/// - `POST /clinics/:id/invoices` - Draft an invoice
/// - `GET /clinics/:id/invoices` - List invoices
/// - `GET /clinics/:id/invoices/:iid` - Fetch one invoice
/// - `POST /clinics/:id/invoices/:iid/send` - Email the invoice
pub fn invoicing_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/clinics/:clinic_id/invoices",
            post(create_invoice).get(list_invoices),
        )
        .route("/clinics/:clinic_id/invoices/:invoice_id", get(get_invoice))
        .route(
            "/clinics/:clinic_id/invoices/:invoice_id/send",
            post(send_invoice),
        )
}

/// Create the public invoice router.
///
/// No session auth; the capability is the unguessable token in the
/// URL.
///
/// # Routes
/// - `GET /public/invoices/:token` - View an invoice
/// - `POST /public/invoices/:token/pay` - Start paying an invoice
pub fn public_invoice_routes() -> Router<AppState> {
    Router::new()
        .route("/public/invoices/:token", get(get_public_invoice))
        .route("/public/invoices/:token/pay", post(pay_public_invoice))
}
