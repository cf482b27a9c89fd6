//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod customer_repository;
pub(crate) mod entities;
mod invoice_repository;
mod user_repository;

pub use customer_repository::{CustomerRepository, CustomerStore};
pub use invoice_repository::{InvoiceRepository, InvoiceStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use customer_repository::MockCustomerRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use invoice_repository::MockInvoiceRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
