//! Service Container - centralized service access.
//!
//! Handlers depend on the service traits only; the container wires the
//! concrete implementations to one shared persistence layer and cache.

use std::sync::Arc;

use super::{AuthService, InvoiceService};
use crate::config::Config;
use crate::infra::{Persistence, ViewCache};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get invoice service
    fn invoices(&self) -> Arc<dyn InvoiceService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    invoice_service: Arc<dyn InvoiceService>,
}

impl Services {
    /// Create a service container from already built services
    pub fn new(auth_service: Arc<dyn AuthService>, invoice_service: Arc<dyn InvoiceService>) -> Self {
        Self {
            auth_service,
            invoice_service,
        }
    }

    /// Create service container from database connection, cache and config
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        cache: Arc<dyn ViewCache>,
        config: Config,
    ) -> Self {
        use super::{Authenticator, InvoiceManager};

        let uow = Arc::new(Persistence::new(db));
        let auth_service = Arc::new(Authenticator::new(uow.clone(), config));
        let invoice_service = Arc::new(InvoiceManager::new(uow, cache));

        Self {
            auth_service,
            invoice_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn invoices(&self) -> Arc<dyn InvoiceService> {
        self.invoice_service.clone()
    }
}
