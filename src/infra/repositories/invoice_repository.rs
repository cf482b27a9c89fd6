//! Invoice repository implementation.
//!
//! Every statement goes through the SeaORM query builder, so values are
//! always bound as parameters.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    sea_query::{extension::postgres::PgExpr, Expr},
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::customer::{self, Entity as CustomerEntity};
use super::entities::invoice::{self, ActiveModel, Entity as InvoiceEntity};
use crate::domain::{Invoice, InvoiceDraft, InvoiceStatus, InvoiceView};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Invoice repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Insert a new invoice dated `date`
    async fn create(&self, draft: InvoiceDraft, date: NaiveDate) -> AppResult<Invoice>;

    /// Overwrite customer, amount and status of an invoice; returns rows affected
    async fn update(&self, id: &str, draft: InvoiceDraft) -> AppResult<u64>;

    /// Delete an invoice by ID; returns rows affected
    async fn delete(&self, id: &str) -> AppResult<u64>;

    /// Find invoice by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Invoice>>;

    /// Search invoices by customer name, customer email or status, newest first.
    /// Returns the requested page and the total number of matches.
    async fn search(
        &self,
        query: &str,
        params: &PaginationParams,
    ) -> AppResult<(Vec<InvoiceView>, u64)>;

    /// Count invoices, optionally restricted to one status
    async fn count(&self, status: Option<InvoiceStatus>) -> AppResult<u64>;
}

/// Concrete implementation of InvoiceRepository
pub struct InvoiceStore {
    db: DatabaseConnection,
}

impl InvoiceStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InvoiceRepository for InvoiceStore {
    async fn create(&self, draft: InvoiceDraft, date: NaiveDate) -> AppResult<Invoice> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            customer_id: Set(draft.customer_id),
            amount: Set(draft.amount_in_cents),
            status: Set(draft.status.as_str().to_string()),
            date: Set(date),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Invoice::try_from(model)
    }

    async fn update(&self, id: &str, draft: InvoiceDraft) -> AppResult<u64> {
        let result = InvoiceEntity::update_many()
            .col_expr(invoice::Column::CustomerId, Expr::value(draft.customer_id))
            .col_expr(invoice::Column::Amount, Expr::value(draft.amount_in_cents))
            .col_expr(invoice::Column::Status, Expr::value(draft.status.as_str()))
            .filter(invoice::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: &str) -> AppResult<u64> {
        let result = InvoiceEntity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Invoice>> {
        InvoiceEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .map(Invoice::try_from)
            .transpose()
    }

    async fn search(
        &self,
        query: &str,
        params: &PaginationParams,
    ) -> AppResult<(Vec<InvoiceView>, u64)> {
        let mut select = InvoiceEntity::find().find_also_related(CustomerEntity);

        let query = query.trim();
        if !query.is_empty() {
            let pattern = contains_pattern(query);
            select = select.filter(
                Condition::any()
                    .add(Expr::col((CustomerEntity, customer::Column::Name)).ilike(pattern.clone()))
                    .add(Expr::col((CustomerEntity, customer::Column::Email)).ilike(pattern.clone()))
                    .add(Expr::col((InvoiceEntity, invoice::Column::Status)).ilike(pattern)),
            );
        }

        let paginator = select
            .order_by_desc(invoice::Column::Date)
            .order_by_asc(invoice::Column::Id)
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let Some(index) = params.page_index(total) else {
            return Ok((Vec::new(), total));
        };
        let rows = paginator.fetch_page(index).await?;

        let views = rows
            .into_iter()
            .map(|(model, customer)| {
                let invoice = Invoice::try_from(model)?;
                Ok(InvoiceView {
                    id: invoice.id,
                    customer_id: invoice.customer_id,
                    name: customer.as_ref().map(|c| c.name.clone()),
                    email: customer.as_ref().map(|c| c.email.clone()),
                    image_url: customer.map(|c| c.image_url),
                    amount: invoice.amount,
                    status: invoice.status,
                    date: invoice.date,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok((views, total))
    }

    async fn count(&self, status: Option<InvoiceStatus>) -> AppResult<u64> {
        let mut select = InvoiceEntity::find();
        if let Some(status) = status {
            select = select.filter(invoice::Column::Status.eq(status.as_str()));
        }
        select.count(&self.db).await.map_err(AppError::from)
    }
}

/// `LIKE` pattern matching `query` anywhere, with its own wildcards taken literally.
fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_wraps_query() {
        assert_eq!(contains_pattern("Amy"), "%Amy%");
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("%"), "%\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c:\\x"), "%c:\\\\x%");
    }
}
