//! Customer domain entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Customer an invoice is billed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    #[schema(example = "cc27c14a-0acf-4f4a-a6c9-d45682c144b9")]
    pub id: String,
    #[schema(example = "Amy Burns")]
    pub name: String,
    #[schema(example = "amy@burns.com")]
    pub email: String,
    #[schema(example = "/customers/amy-burns.png")]
    pub image_url: String,
}

/// Customer creation data (used by the seed command)
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub image_url: String,
}
