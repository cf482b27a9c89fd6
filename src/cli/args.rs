//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Invoice Dashboard - session-gated invoice management
#[derive(Parser, Debug)]
#[command(name = "invoice-dashboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Create a sign-in user and optional demo customers
    Seed(SeedArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to (defaults to SERVER_HOST)
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on (defaults to SERVER_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Email of the user to create
    #[arg(long, env = "SEED_EMAIL")]
    pub email: String,

    /// Plain-text password (at least 6 characters)
    #[arg(long, env = "SEED_PASSWORD")]
    pub password: String,

    /// Display name
    #[arg(long, default_value = "User")]
    pub name: String,

    /// Also insert demo customers when the customers table is empty
    #[arg(long)]
    pub with_customers: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed() {
        let cli = Cli::parse_from([
            "invoice-dashboard",
            "seed",
            "--email",
            "user@nextmail.com",
            "--password",
            "123456",
            "--with-customers",
        ]);
        let Commands::Seed(args) = cli.command else {
            panic!("expected seed command");
        };
        assert_eq!(args.email, "user@nextmail.com");
        assert_eq!(args.name, "User");
        assert!(args.with_customers);
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["invoice-dashboard", "-v", "serve", "--port", "8080"]);
        assert!(cli.verbose);
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(args.port, Some(8080));
        assert!(args.host.is_none());
    }
}
