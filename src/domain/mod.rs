//! Domain layer - Core business entities and logic
//!
//! Invoices, customers, users and the rules that apply to them,
//! independent of HTTP, database and cache concerns.

pub mod access;
pub mod credentials;
pub mod customer;
pub mod invoice;
pub mod invoice_form;
pub mod password;
pub mod user;

pub use access::{authorize_route, is_protected, AccessDecision};
pub use credentials::Credentials;
pub use customer::{Customer, NewCustomer};
pub use invoice::{Invoice, InvoiceDraft, InvoiceStatus, InvoiceView};
pub use invoice_form::{FieldErrors, InvoiceForm};
pub use password::Password;
pub use user::{Identity, User};
