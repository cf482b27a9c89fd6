//! HTTP request handlers.

pub mod auth_handler;
pub mod dashboard_handler;
pub mod invoice_handler;

pub use auth_handler::auth_routes;
pub use dashboard_handler::dashboard_routes;
pub use invoice_handler::invoice_routes;
