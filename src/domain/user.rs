//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(id: Uuid, name: String, email: String, password_hash: String) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Signed-in principal as seen by request handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    /// Unique user identifier
    #[schema(example = "410544b2-4001-4271-9855-fec4b6a6442a")]
    pub id: Uuid,
    /// User display name
    #[schema(example = "User")]
    pub name: String,
    /// User email address
    #[schema(example = "user@nextmail.com")]
    pub email: String,
}
