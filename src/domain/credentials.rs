//! Sign-in credentials.

use serde::Deserialize;
use validator::Validate;

use crate::config::MIN_PASSWORD_LENGTH;

/// Email and password pair submitted to the sign-in form.
///
/// A value that fails validation is treated exactly like wrong credentials.
#[derive(Clone, Default, Deserialize, Validate)]
pub struct Credentials {
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = MIN_PASSWORD_LENGTH))]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Whether the credentials are well-formed enough to be checked.
    pub fn is_well_formed(&self) -> bool {
        self.validate().is_ok()
    }
}

// Don't expose the password in debug output
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
