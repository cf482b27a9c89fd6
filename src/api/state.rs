//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and the
//! infrastructure probes used by the health endpoint.

use std::sync::Arc;

use crate::config::{Config, DEFAULT_STATIC_DIR};
use crate::infra::{Cache, Database, HealthProbe, ViewCache};
use crate::services::{AuthService, InvoiceService, ServiceContainer, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Invoice service
    pub invoice_service: Arc<dyn InvoiceService>,
    /// Database connectivity probe
    pub database: Arc<dyn HealthProbe>,
    /// Redis connectivity probe
    pub cache: Arc<dyn HealthProbe>,
    /// Set the `Secure` attribute on the session cookie
    pub secure_cookies: bool,
    /// Directory served under `/static`
    pub static_dir: String,
}

impl AppState {
    /// Create application state from live infrastructure and config.
    pub fn from_config(database: Arc<Database>, cache: Arc<Cache>, config: Config) -> Self {
        let secure_cookies = config.session_cookie_secure;
        let static_dir = config.static_dir.clone();
        let view_cache: Arc<dyn ViewCache> = cache.clone();
        let container = Services::from_connection(database.get_connection(), view_cache, config);

        Self {
            auth_service: container.auth(),
            invoice_service: container.invoices(),
            database,
            cache,
            secure_cookies,
            static_dir,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        invoice_service: Arc<dyn InvoiceService>,
        database: Arc<dyn HealthProbe>,
        cache: Arc<dyn HealthProbe>,
    ) -> Self {
        Self {
            auth_service,
            invoice_service,
            database,
            cache,
            secure_cookies: false,
            static_dir: DEFAULT_STATIC_DIR.to_string(),
        }
    }
}
