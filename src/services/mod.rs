//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
pub mod container;
mod invoice_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, Session};
pub use invoice_service::{
    DashboardSummary, InvoiceManager, InvoiceService, CREATE_DATABASE_ERROR,
    CREATE_MISSING_FIELDS, UPDATE_DATABASE_ERROR, UPDATE_MISSING_FIELDS,
};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
