//! Invoice domain entity and related types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AppError;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_PAID: &str = "paid";

/// Invoice status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => STATUS_PENDING,
            InvoiceStatus::Paid => STATUS_PAID,
        }
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_PENDING => Ok(InvoiceStatus::Pending),
            STATUS_PAID => Ok(InvoiceStatus::Paid),
            other => Err(AppError::validation(format!("Unknown invoice status: {}", other))),
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invoice domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Invoice {
    #[schema(example = "3958dc9e-712f-4377-85e9-fec4b6a6442a")]
    pub id: String,
    #[schema(example = "cc27c14a-0acf-4f4a-a6c9-d45682c144b9")]
    pub customer_id: String,
    /// Amount in minor units (cents)
    #[schema(example = 4999)]
    pub amount: i64,
    pub status: InvoiceStatus,
    #[schema(value_type = String, example = "2024-06-01")]
    pub date: NaiveDate,
}

/// Invoice row as shown in the listing, joined with its customer.
///
/// Customer fields are optional because the customer reference is not
/// enforced by a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InvoiceView {
    pub id: String,
    pub customer_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image_url: Option<String>,
    pub amount: i64,
    pub status: InvoiceStatus,
    #[schema(value_type = String, example = "2024-06-01")]
    pub date: NaiveDate,
}

/// Validated, typed invoice fields ready to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub customer_id: String,
    /// Amount in minor units (cents)
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [InvoiceStatus::Pending, InvoiceStatus::Paid] {
            assert_eq!(status.as_str().parse::<InvoiceStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!("overdue".parse::<InvoiceStatus>().is_err());
        assert!("Paid".parse::<InvoiceStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&InvoiceStatus::Paid).unwrap();
        assert_eq!(json, "\"paid\"");
    }
}
