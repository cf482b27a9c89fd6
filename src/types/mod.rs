//! Shared types: pagination and form action results.

mod form;
mod pagination;

pub use form::{FormOutcome, FormState};
pub use pagination::{InvoicePage, InvoiceQuery, Paginated, PaginationMeta, PaginationParams};
