//! Invoice service - form actions, listing and dashboard figures.
//!
//! Every mutating action ends in one of three states: a redirect to the
//! invoice listing (after the cached listing was dropped), the rejected
//! form with per-field messages, or a generic failure message. Nothing is
//! persisted unless the whole form is valid.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::INVOICES_PATH;
use crate::domain::{Customer, Invoice, InvoiceForm, InvoiceStatus, InvoiceView};
use crate::errors::{AppError, AppResult};
use crate::infra::{UnitOfWork, ViewCache};
use crate::types::{FormOutcome, FormState, InvoiceQuery, Paginated};

pub const CREATE_MISSING_FIELDS: &str = "Missing Fields. Failed to Create Invoice.";
pub const UPDATE_MISSING_FIELDS: &str = "Missing Fields. Failed to Update Invoice.";
pub const CREATE_DATABASE_ERROR: &str = "Database Error: Failed to Create Invoice.";
pub const UPDATE_DATABASE_ERROR: &str = "Database Error: Failed to Update Invoice.";

/// Figures shown on the dashboard landing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub invoices: u64,
    pub paid: u64,
    pub pending: u64,
    pub customers: u64,
}

/// Invoice service trait for dependency injection.
#[async_trait]
pub trait InvoiceService: Send + Sync {
    /// Validate the form and insert a new invoice dated today (UTC)
    async fn create(&self, form: InvoiceForm) -> AppResult<FormOutcome>;

    /// Validate the form and overwrite customer, amount and status of `id`
    async fn update(&self, id: &str, form: InvoiceForm) -> AppResult<FormOutcome>;

    /// Delete `id`; an unknown id is not an error
    async fn delete(&self, id: &str) -> AppResult<FormOutcome>;

    /// Paginated invoice listing, served through the view cache
    async fn list(&self, query: InvoiceQuery) -> AppResult<Paginated<InvoiceView>>;

    /// Find one invoice
    async fn find(&self, id: &str) -> AppResult<Option<Invoice>>;

    /// Customers an invoice can be billed to
    async fn customers(&self) -> AppResult<Vec<Customer>>;

    /// Invoice and customer counts
    async fn summary(&self) -> AppResult<DashboardSummary>;
}

/// Concrete implementation of InvoiceService using Unit of Work.
pub struct InvoiceManager<U: UnitOfWork> {
    uow: Arc<U>,
    cache: Arc<dyn ViewCache>,
}

impl<U: UnitOfWork> InvoiceManager<U> {
    pub fn new(uow: Arc<U>, cache: Arc<dyn ViewCache>) -> Self {
        Self { uow, cache }
    }

    /// Drop the cached listing, then navigate to it.
    async fn revalidate_and_redirect(&self) -> AppResult<FormOutcome> {
        self.cache.revalidate(INVOICES_PATH).await?;
        Ok(FormOutcome::redirect(INVOICES_PATH))
    }

    async fn load_listing(&self, query: &InvoiceQuery) -> AppResult<Paginated<InvoiceView>> {
        let params = query.pagination();
        let (data, total) = self
            .uow
            .invoices()
            .search(query.query.trim(), &params)
            .await?;
        Ok(Paginated::new(data, params.page, params.limit(), total))
    }
}

#[async_trait]
impl<U: UnitOfWork> InvoiceService for InvoiceManager<U> {
    async fn create(&self, form: InvoiceForm) -> AppResult<FormOutcome> {
        let draft = match form.parse() {
            Ok(draft) => draft,
            Err(errors) => {
                let fields: Vec<&str> = errors.fields().collect();
                tracing::info!(?fields, "Invoice form rejected");
                return Ok(FormOutcome::Invalid(FormState::invalid(
                    errors,
                    CREATE_MISSING_FIELDS,
                )));
            }
        };

        let today = Utc::now().date_naive();
        match self.uow.invoices().create(draft, today).await {
            Ok(invoice) => tracing::info!(invoice_id = %invoice.id, "Invoice created"),
            Err(e) => {
                tracing::error!(error = ?e, "Failed to create invoice");
                return Ok(FormOutcome::Failed(FormState::message(CREATE_DATABASE_ERROR)));
            }
        }

        self.revalidate_and_redirect().await
    }

    async fn update(&self, id: &str, form: InvoiceForm) -> AppResult<FormOutcome> {
        let draft = match form.parse() {
            Ok(draft) => draft,
            Err(errors) => {
                let fields: Vec<&str> = errors.fields().collect();
                tracing::info!(?fields, "Invoice form rejected");
                return Ok(FormOutcome::Invalid(FormState::invalid(
                    errors,
                    UPDATE_MISSING_FIELDS,
                )));
            }
        };

        match self.uow.invoices().update(id, draft).await {
            Ok(rows) => tracing::info!(invoice_id = id, rows, "Invoice updated"),
            Err(e) => {
                tracing::error!(invoice_id = id, error = ?e, "Failed to update invoice");
                return Ok(FormOutcome::Failed(FormState::message(UPDATE_DATABASE_ERROR)));
            }
        }

        self.revalidate_and_redirect().await
    }

    async fn delete(&self, id: &str) -> AppResult<FormOutcome> {
        let rows = self.uow.invoices().delete(id).await?;
        tracing::info!(invoice_id = id, rows, "Invoice deleted");

        self.revalidate_and_redirect().await
    }

    async fn list(&self, query: InvoiceQuery) -> AppResult<Paginated<InvoiceView>> {
        let key = query.view_key(INVOICES_PATH);

        match self.cache.get_view(&key).await {
            Ok(Some(body)) => match serde_json::from_str(&body) {
                Ok(page) => return Ok(page),
                Err(e) => tracing::warn!(key, "Discarding unreadable cached view: {}", e),
            },
            Ok(None) => {}
            Err(e) => tracing::warn!(key, "View cache read failed: {}", e),
        }

        // Read before the rows so a revalidation during the load is detected
        let generation = match self.cache.generation(INVOICES_PATH).await {
            Ok(generation) => Some(generation),
            Err(e) => {
                tracing::warn!(key, "View cache read failed: {}", e);
                None
            }
        };

        let page = self.load_listing(&query).await?;

        let Some(generation) = generation else {
            return Ok(page);
        };
        let body = serde_json::to_string(&page)
            .map_err(|e| AppError::internal(format!("Failed to serialize view: {}", e)))?;
        match self
            .cache
            .put_view(INVOICES_PATH, &key, body, generation)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(key, "Listing changed while rendering, view not cached")
            }
            Err(e) => tracing::warn!(key, "View cache write failed: {}", e),
        }

        Ok(page)
    }

    async fn find(&self, id: &str) -> AppResult<Option<Invoice>> {
        self.uow.invoices().find_by_id(id).await
    }

    async fn customers(&self) -> AppResult<Vec<Customer>> {
        self.uow.customers().list().await
    }

    async fn summary(&self) -> AppResult<DashboardSummary> {
        let invoices = self.uow.invoices();
        let customers = self.uow.customers();

        let (total, paid, pending, customers) = tokio::try_join!(
            invoices.count(None),
            invoices.count(Some(InvoiceStatus::Paid)),
            invoices.count(Some(InvoiceStatus::Pending)),
            customers.count(),
        )?;

        Ok(DashboardSummary {
            invoices: total,
            paid,
            pending,
            customers,
        })
    }
}
