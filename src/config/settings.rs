//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_SESSION_EXPIRATION_HOURS, DEFAULT_STATIC_DIR, DEFAULT_VIEW_CACHE_TTL_SECONDS,
    MAX_SESSION_EXPIRATION_HOURS, MIN_SESSION_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    session_secret: String,
    pub session_expiration_hours: i64,
    pub session_cookie_secure: bool,
    pub view_cache_ttl_seconds: u64,
    pub server_host: String,
    pub server_port: u16,
    pub static_dir: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("session_secret", &"[REDACTED]")
            .field("session_expiration_hours", &self.session_expiration_hours)
            .field("session_cookie_secure", &self.session_cookie_secure)
            .field("view_cache_ttl_seconds", &self.view_cache_ttl_seconds)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Fails if SESSION_SECRET is missing in a release build or is too short,
    /// or if SESSION_EXPIRATION_HOURS is outside `1..=MAX_SESSION_EXPIRATION_HOURS`.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let session_secret = match env::var("SESSION_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("SESSION_SECRET not set, using insecure default for development");
                "dev-session-secret-minimum-32-chars!".to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "SESSION_SECRET environment variable must be set in production",
                ))
            }
        };

        let session_expiration_hours = check_session_expiration(
            parse_env("SESSION_EXPIRATION_HOURS").unwrap_or(DEFAULT_SESSION_EXPIRATION_HOURS),
        )?;

        Self::builder(session_secret)
            .map(|config| Self {
                database_url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
                redis_url: env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
                session_expiration_hours,
                session_cookie_secure: parse_env("SESSION_COOKIE_SECURE").unwrap_or(false),
                view_cache_ttl_seconds: parse_env("VIEW_CACHE_TTL_SECONDS")
                    .unwrap_or(DEFAULT_VIEW_CACHE_TTL_SECONDS),
                server_host: env::var("SERVER_HOST")
                    .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                server_port: parse_env("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
                static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string()),
                ..config
            })
    }

    /// Build a configuration with defaults for everything but the secret.
    ///
    /// Used by `from_env` and by tests that need a signing key without
    /// touching the process environment.
    pub fn builder(session_secret: impl Into<String>) -> AppResult<Self> {
        let session_secret = session_secret.into();
        if session_secret.len() < MIN_SESSION_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "SESSION_SECRET must be at least {} characters long",
                MIN_SESSION_SECRET_LENGTH
            )));
        }

        Ok(Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            session_secret,
            session_expiration_hours: DEFAULT_SESSION_EXPIRATION_HOURS,
            session_cookie_secure: false,
            view_cache_ttl_seconds: DEFAULT_VIEW_CACHE_TTL_SECONDS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            static_dir: DEFAULT_STATIC_DIR.to_string(),
        })
    }

    /// Get session secret bytes for token signing/verification.
    pub fn session_secret_bytes(&self) -> &[u8] {
        self.session_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn check_session_expiration(hours: i64) -> AppResult<i64> {
    if !(1..=MAX_SESSION_EXPIRATION_HOURS).contains(&hours) {
        return Err(AppError::internal(format!(
            "SESSION_EXPIRATION_HOURS must be between 1 and {}",
            MAX_SESSION_EXPIRATION_HOURS
        )));
    }
    Ok(hours)
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
