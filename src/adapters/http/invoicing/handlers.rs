//! HTTP handlers for invoicing, including the public pay path.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::invoicing::{
    CreateInvoiceCommand, CreateInvoiceHandler, GetInvoiceHandler, GetInvoiceQuery,
    GetPublicInvoiceHandler, GetPublicInvoiceQuery, ListInvoicesHandler, ListInvoicesQuery,
    PayPublicInvoiceCommand, PayPublicInvoiceHandler, SendInvoiceCommand, SendInvoiceHandler,
};
use crate::domain::foundation::{ClientId, ClinicId, DomainError, InvoiceId};
use crate::domain::invoicing::LineItem;

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    CreateInvoiceRequest, InvoiceResponse, InvoicesResponse, ListInvoicesParams,
    PayInvoiceResponse, PublicInvoiceResponse, SendInvoiceResponse,
};

/// POST /api/clinics/:id/invoices - Draft an invoice
pub async fn create_invoice(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(clinic_id): Path<ClinicId>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.require_member(&clinic_id, &user.id).await?;

    let client_id: ClientId = request
        .client_id
        .parse()
        .map_err(|_| DomainError::validation("client_id", "must be a UUID"))?;

    let handler = CreateInvoiceHandler::new(state.invoices.clone(), state.clients.clone());
    let cmd = CreateInvoiceCommand {
        clinic_id,
        client_id,
        items: request.items.into_iter().map(LineItem::from).collect(),
        subtotal: request.subtotal,
        tax: request.tax,
        total: request.total,
        due_date: request
            .due_date
            .map(crate::domain::foundation::Timestamp::from_datetime),
        notes: request.notes,
    };

    let invoice = handler.handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(InvoiceResponse::from(invoice))))
}

/// GET /api/clinics/:id/invoices - List invoices, optionally per client
pub async fn list_invoices(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(clinic_id): Path<ClinicId>,
    Query(params): Query<ListInvoicesParams>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.require_member(&clinic_id, &user.id).await?;

    let handler = ListInvoicesHandler::new(state.invoices.clone());
    let query = ListInvoicesQuery {
        clinic_id,
        client_id: params.client_id,
    };

    let invoices = handler.handle(query).await?;

    let response = InvoicesResponse {
        invoices: invoices.into_iter().map(InvoiceResponse::from).collect(),
    };

    Ok(Json(response))
}

/// GET /api/clinics/:id/invoices/:iid - Fetch one invoice
pub async fn get_invoice(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((clinic_id, invoice_id)): Path<(ClinicId, InvoiceId)>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.require_member(&clinic_id, &user.id).await?;

    let handler = GetInvoiceHandler::new(state.invoices.clone());
    let invoice = handler
        .handle(GetInvoiceQuery {
            clinic_id,
            invoice_id,
        })
        .await?;

    Ok(Json(InvoiceResponse::from(invoice)))
}

/// POST /api/clinics/:id/invoices/:iid/send - Email the invoice
///
/// Gated on the plan's email invoicing feature.
pub async fn send_invoice(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((clinic_id, invoice_id)): Path<(ClinicId, InvoiceId)>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.require_member(&clinic_id, &user.id).await?;

    let handler = SendInvoiceHandler::new(
        state.invoices.clone(),
        state.clients.clone(),
        state.clinics.clone(),
        state.subscriptions.clone(),
        state.plans.clone(),
        state.email.clone(),
        state.frontend_base_url.clone(),
    );
    let cmd = SendInvoiceCommand {
        clinic_id,
        invoice_id,
    };

    let result = handler.handle(cmd).await?;

    let response = SendInvoiceResponse {
        invoice: InvoiceResponse::from(result.invoice),
        delivered_to: result.delivered_to,
    };

    Ok(Json(response))
}

/// GET /api/public/invoices/:token - View an invoice without a session
pub async fn get_public_invoice(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = GetPublicInvoiceHandler::new(
        state.invoices.clone(),
        state.clinics.clone(),
        state.clients.clone(),
    );
    let view = handler.handle(GetPublicInvoiceQuery { token }).await?;

    Ok(Json(PublicInvoiceResponse::from(view)))
}

/// POST /api/public/invoices/:token/pay - Start paying an invoice
pub async fn pay_public_invoice(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = PayPublicInvoiceHandler::new(state.invoices.clone(), state.payments.clone());
    let result = handler.handle(PayPublicInvoiceCommand { token }).await?;

    let response = PayInvoiceResponse {
        payment_intent_id: result.payment_intent_id,
        client_secret: result.client_secret,
        amount: result.amount,
    };

    Ok(Json(response))
}
