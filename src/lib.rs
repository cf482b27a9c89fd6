//! Invoice Dashboard - session-gated invoice management service
//!
//! Signed-in users list, search, create, edit and delete invoices. Every
//! mutation drops the cached invoice listing so the next read is fresh.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and rules (form validation, access policy)
//! - **services**: Application use cases
//! - **infra**: Database, Redis view cache and repositories
//! - **api**: HTTP handlers, session middleware and routes
//! - **types**: Shared types (pagination, form outcomes)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Create a sign-in user with demo customers
//! cargo run -- seed --email user@nextmail.com --password 123456 --with-customers
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Invoice, InvoiceForm, Password, User};
pub use errors::{AppError, AppResult, AuthError};
pub use infra::Cache;
