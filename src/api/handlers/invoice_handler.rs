//! Invoice handlers: listing, form support data and form actions.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::extractors::FormInput;
use crate::api::AppState;
use crate::domain::{Customer, Invoice, InvoiceForm, InvoiceView};
use crate::errors::{AppResult, OptionExt};
use crate::types::{FormOutcome, FormState, InvoicePage, InvoiceQuery, Paginated};

/// Data for the create-invoice form
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateInvoicePage {
    pub customers: Vec<Customer>,
}

/// Data for the edit-invoice form
#[derive(Debug, Serialize, ToSchema)]
pub struct EditInvoicePage {
    pub invoice: Invoice,
    pub customers: Vec<Customer>,
}

/// Create invoice routes
pub fn invoice_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/invoices", get(list_invoices).post(create_invoice))
        .route("/dashboard/invoices/create", get(create_invoice_page))
        .route("/dashboard/invoices/:id", post(update_invoice))
        .route("/dashboard/invoices/:id/edit", get(edit_invoice_page))
        .route("/dashboard/invoices/:id/delete", post(delete_invoice))
}

/// List invoices matching a search query
#[utoipa::path(
    get,
    path = "/dashboard/invoices",
    tag = "Invoices",
    params(InvoiceQuery),
    responses(
        (status = 200, description = "Page of invoices", body = InvoicePage),
        (status = 307, description = "Not signed in; redirected to sign-in")
    ),
    security(("session_cookie" = []))
)]
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(query): Query<InvoiceQuery>,
) -> AppResult<Json<Paginated<InvoiceView>>> {
    let page = state.invoice_service.list(query).await?;
    Ok(Json(page))
}

/// Create an invoice
#[utoipa::path(
    post,
    path = "/dashboard/invoices",
    tag = "Invoices",
    request_body(content = InvoiceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirected to the listing"),
        (status = 422, description = "Form rejected", body = FormState),
        (status = 500, description = "Database error", body = FormState)
    ),
    security(("session_cookie" = []))
)]
pub async fn create_invoice(
    State(state): State<AppState>,
    FormInput(form): FormInput<InvoiceForm>,
) -> AppResult<FormOutcome> {
    state.invoice_service.create(form).await
}

/// Customers for the create form
#[utoipa::path(
    get,
    path = "/dashboard/invoices/create",
    tag = "Invoices",
    responses(
        (status = 200, description = "Form data", body = CreateInvoicePage)
    ),
    security(("session_cookie" = []))
)]
pub async fn create_invoice_page(State(state): State<AppState>) -> AppResult<Json<CreateInvoicePage>> {
    let customers = state.invoice_service.customers().await?;
    Ok(Json(CreateInvoicePage { customers }))
}

/// Invoice and customers for the edit form
#[utoipa::path(
    get,
    path = "/dashboard/invoices/{id}/edit",
    tag = "Invoices",
    params(("id" = String, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Form data", body = EditInvoicePage),
        (status = 404, description = "Invoice not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn edit_invoice_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<EditInvoicePage>> {
    let (invoice, customers) = tokio::try_join!(
        state.invoice_service.find(&id),
        state.invoice_service.customers(),
    )?;

    Ok(Json(EditInvoicePage {
        invoice: invoice.ok_or_not_found()?,
        customers,
    }))
}

/// Update an invoice
#[utoipa::path(
    post,
    path = "/dashboard/invoices/{id}",
    tag = "Invoices",
    params(("id" = String, Path, description = "Invoice ID")),
    request_body(content = InvoiceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirected to the listing"),
        (status = 422, description = "Form rejected", body = FormState),
        (status = 500, description = "Database error", body = FormState)
    ),
    security(("session_cookie" = []))
)]
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormInput(form): FormInput<InvoiceForm>,
) -> AppResult<FormOutcome> {
    state.invoice_service.update(&id, form).await
}

/// Delete an invoice
#[utoipa::path(
    post,
    path = "/dashboard/invoices/{id}/delete",
    tag = "Invoices",
    params(("id" = String, Path, description = "Invoice ID")),
    responses(
        (status = 303, description = "Deleted (or already absent); redirected to the listing")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<FormOutcome> {
    state.invoice_service.delete(&id).await
}
