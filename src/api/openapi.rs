//! OpenAPI documentation configuration.
//!
//! Served through Swagger UI at `/api/docs`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, dashboard_handler, invoice_handler};
use crate::api::routes;
use crate::config::SESSION_COOKIE_NAME;
use crate::domain::{Customer, Identity, Invoice, InvoiceForm, InvoiceStatus, InvoiceView};
use crate::services::DashboardSummary;
use crate::types::{FormState, InvoicePage, PaginationMeta};

/// OpenAPI documentation for the invoice dashboard
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Invoice Dashboard",
        version = "0.1.0",
        description = "Session-gated invoice management with cached listings",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        routes::health,
        // Authentication endpoints
        auth_handler::login_page,
        auth_handler::authenticate,
        auth_handler::sign_out,
        // Dashboard
        dashboard_handler::dashboard,
        // Invoice endpoints
        invoice_handler::list_invoices,
        invoice_handler::create_invoice,
        invoice_handler::create_invoice_page,
        invoice_handler::edit_invoice_page,
        invoice_handler::update_invoice,
        invoice_handler::delete_invoice,
    ),
    components(
        schemas(
            // Domain types
            Invoice,
            InvoiceStatus,
            InvoiceView,
            InvoiceForm,
            Customer,
            Identity,
            // Shared types
            FormState,
            InvoicePage,
            PaginationMeta,
            DashboardSummary,
            // Handler types
            auth_handler::LoginPage,
            auth_handler::LoginForm,
            dashboard_handler::DashboardPage,
            invoice_handler::CreateInvoicePage,
            invoice_handler::EditInvoicePage,
            routes::HealthResponse,
            routes::ServiceHealth,
            routes::ServiceStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Sign-in and sign-out"),
        (name = "Dashboard", description = "Dashboard overview"),
        (name = "Invoices", description = "Invoice listing and form actions"),
        (name = "Health", description = "Dependency health")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for the session cookie
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    SESSION_COOKIE_NAME,
                    "Session token set by POST /login",
                ))),
            );
        }
    }
}
