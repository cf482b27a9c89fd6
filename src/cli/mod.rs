//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `seed` - Sign-in user and demo customers

pub mod args;

pub use args::{Cli, Commands};
