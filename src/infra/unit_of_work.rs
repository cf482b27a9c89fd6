//! Unit of Work - centralized repository access.
//!
//! Every statement in this application runs on its own; the pool hands out
//! a connection per statement and there are no multi-statement
//! transactions. The Unit of Work therefore only groups the repositories
//! that share one connection pool.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    CustomerRepository, CustomerStore, InvoiceRepository, InvoiceStore, UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get invoice repository
    fn invoices(&self) -> Arc<dyn InvoiceRepository>;

    /// Get customer repository
    fn customers(&self) -> Arc<dyn CustomerRepository>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    user_repo: Arc<UserStore>,
    invoice_repo: Arc<InvoiceStore>,
    customer_repo: Arc<CustomerStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            invoice_repo: Arc::new(InvoiceStore::new(db.clone())),
            customer_repo: Arc::new(CustomerStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn invoices(&self) -> Arc<dyn InvoiceRepository> {
        self.invoice_repo.clone()
    }

    fn customers(&self) -> Arc<dyn CustomerRepository> {
        self.customer_repo.clone()
    }
}
