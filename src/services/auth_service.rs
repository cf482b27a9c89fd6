//! Authentication service - credential checks and session tokens.
//!
//! The credential check itself never fails loudly: malformed input, an
//! unknown email and a wrong password all come back as "no user". Only a
//! fault while looking the user up surfaces as an error, and `sign_in`
//! turns that into [`AuthError::CallbackRoute`].

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR};
use crate::domain::{Credentials, Password, User};
use crate::errors::{AppError, AppResult, AuthError};
use crate::infra::UnitOfWork;

/// Session token payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub name: String,
    pub exp: i64,
    pub iat: i64,
}

/// Signed session issued after a successful sign-in
#[derive(Debug, Clone)]
pub struct Session {
    /// Signed token stored in the session cookie
    pub token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials against the user store.
    ///
    /// Returns `Ok(None)` for malformed input, an unknown email or a wrong
    /// password. Errors only when the user lookup itself fails.
    async fn authorize(&self, credentials: &Credentials) -> AppResult<Option<User>>;

    /// Check credentials and issue a session.
    ///
    /// Fails with [`AuthError::CredentialsSignin`] when the credentials do
    /// not identify a user and [`AuthError::CallbackRoute`] when the check
    /// could not be carried out.
    async fn sign_in(&self, credentials: Credentials) -> AppResult<Session>;

    /// Verify a session token and extract its claims
    fn verify_session(&self, token: &str) -> AppResult<Claims>;
}

fn issue_session(user: &User, config: &Config) -> AppResult<Session> {
    let now = Utc::now();
    let expires_at = Duration::try_hours(config.session_expiration_hours)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| AppError::internal("Session lifetime out of range"))?;

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.session_secret_bytes()),
    )?;

    Ok(Session {
        token,
        expires_in: config.session_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn authorize(&self, credentials: &Credentials) -> AppResult<Option<User>> {
        if !credentials.is_well_formed() {
            tracing::info!("Invalid credentials");
            return Ok(None);
        }

        let Some(user) = self.uow.users().find_by_email(&credentials.email).await? else {
            tracing::info!("Invalid credentials");
            return Ok(None);
        };

        if Password::from_hash(user.password_hash.clone()).verify(&credentials.password) {
            Ok(Some(user))
        } else {
            tracing::info!("Invalid credentials");
            Ok(None)
        }
    }

    async fn sign_in(&self, credentials: Credentials) -> AppResult<Session> {
        let user = match self.authorize(&credentials).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(AuthError::CredentialsSignin.into()),
            Err(e) => {
                tracing::error!("Failed to fetch user: {}", e);
                return Err(AuthError::CallbackRoute(e.to_string()).into());
            }
        };

        tracing::info!(user_id = %user.id, "User signed in");
        issue_session(&user, &self.config)
    }

    fn verify_session(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.session_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
