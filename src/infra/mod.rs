//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - Redis view cache
//! - Unit of Work for repository access

use async_trait::async_trait;

use crate::errors::AppResult;

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::{Cache, ViewCache};
pub use db::{Database, Migrator};
pub use repositories::{
    CustomerRepository, CustomerStore, InvoiceRepository, InvoiceStore, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use cache::MockViewCache;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockCustomerRepository, MockInvoiceRepository, MockUserRepository};

/// Connectivity check used by the health endpoint.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> AppResult<()>;
}
