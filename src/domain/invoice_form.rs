//! Invoice form schema.
//!
//! Raw form submissions arrive as strings. `InvoiceForm::parse` checks every
//! field at once and either yields an [`InvoiceDraft`] or the full set of
//! per-field messages; there is no partial success.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use super::invoice::{InvoiceDraft, InvoiceStatus};

pub const FIELD_CUSTOMER_ID: &str = "customerId";
pub const FIELD_AMOUNT: &str = "amount";
pub const FIELD_STATUS: &str = "status";

pub const CUSTOMER_MESSAGE: &str = "Please select a customer.";
pub const AMOUNT_MESSAGE: &str = "Please enter an amount greater than $0.";
pub const STATUS_MESSAGE: &str = "Please select an invoice status.";

/// Raw invoice form as submitted by the browser.
///
/// Missing fields deserialize as empty strings so they fail validation
/// instead of rejecting the whole request.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct InvoiceForm {
    /// Selected customer identifier
    #[serde(default, rename = "customerId")]
    #[validate(custom(function = "validate_customer_id"))]
    #[schema(example = "cc27c14a-0acf-4f4a-a6c9-d45682c144b9")]
    pub customer_id: String,
    /// Amount in major units (dollars), e.g. "49.99"
    #[serde(default)]
    #[validate(custom(function = "validate_amount"))]
    #[schema(example = "49.99")]
    pub amount: String,
    /// `pending` or `paid`
    #[serde(default)]
    #[validate(custom(function = "validate_status"))]
    #[schema(example = "pending")]
    pub status: String,
}

impl InvoiceForm {
    pub fn new(
        customer_id: impl Into<String>,
        amount: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            amount: amount.into(),
            status: status.into(),
        }
    }

    /// Validate all fields and convert them into typed invoice data.
    pub fn parse(&self) -> Result<InvoiceDraft, FieldErrors> {
        self.validate()?;

        let amount_in_cents = coerce_amount(&self.amount)
            .and_then(to_minor_units)
            .ok_or_else(|| FieldErrors::single(FIELD_AMOUNT, AMOUNT_MESSAGE))?;
        let status = self
            .status
            .parse::<InvoiceStatus>()
            .map_err(|_| FieldErrors::single(FIELD_STATUS, STATUS_MESSAGE))?;

        Ok(InvoiceDraft {
            customer_id: self.customer_id.trim().to_string(),
            amount_in_cents,
            status,
        })
    }
}

/// Per-field validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.to_string(), vec![message.to_string()]);
        Self(errors)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Names of the rejected fields
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("{} is invalid", field))
                    })
                    .collect();
                (form_field_name(&field), messages)
            })
            .collect();
        Self(fields)
    }
}

/// Map a struct field name back to the name used in the submitted form.
fn form_field_name(field: &str) -> String {
    match field {
        "customer_id" => FIELD_CUSTOMER_ID.to_string(),
        other => other.to_string(),
    }
}

/// Coerce a form value to a number the way a browser form library would:
/// surrounding whitespace is ignored and an empty value counts as zero.
fn coerce_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Convert a positive major-unit amount to minor units, rounding to the
/// nearest cent. Amounts that round to zero cents are rejected.
fn to_minor_units(amount: f64) -> Option<i64> {
    if amount <= 0.0 {
        return None;
    }
    let cents = (amount * 100.0).round();
    if cents < 1.0 || cents > i64::MAX as f64 {
        return None;
    }
    Some(cents as i64)
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_customer_id(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("customer_id", CUSTOMER_MESSAGE));
    }
    Ok(())
}

fn validate_amount(value: &str) -> Result<(), ValidationError> {
    coerce_amount(value)
        .and_then(to_minor_units)
        .map(|_| ())
        .ok_or_else(|| invalid("amount", AMOUNT_MESSAGE))
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<InvoiceStatus>()
        .map(|_| ())
        .map_err(|_| invalid("status", STATUS_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form_parses_to_cents() {
        let draft = InvoiceForm::new("abc", "49.99", "pending").parse().unwrap();
        assert_eq!(draft.customer_id, "abc");
        assert_eq!(draft.amount_in_cents, 4999);
        assert_eq!(draft.status, InvoiceStatus::Pending);
    }

    #[test]
    fn test_amounts_round_to_nearest_cent() {
        let cases = [("0.01", 1), ("1", 100), ("19.999", 2000), (" 250.5 ", 25050), ("1e2", 10000)];
        for (raw, expected) in cases {
            let draft = InvoiceForm::new("c1", raw, "paid").parse().unwrap();
            assert_eq!(draft.amount_in_cents, expected, "amount {raw}");
        }
    }

    #[test]
    fn test_non_positive_amounts_fail() {
        for raw in ["0", "-1", "-0.01", "", "   ", "abc", "NaN", "inf", "0.001"] {
            let errors = InvoiceForm::new("c1", raw, "paid").parse().unwrap_err();
            assert_eq!(errors.get(FIELD_AMOUNT), Some(&[AMOUNT_MESSAGE.to_string()][..]), "amount {raw:?}");
            assert_eq!(errors.fields().count(), 1);
        }
    }

    #[test]
    fn test_status_must_be_known() {
        for raw in ["", "bad", "PAID", "overdue"] {
            let errors = InvoiceForm::new("c1", "10", raw).parse().unwrap_err();
            assert_eq!(errors.get(FIELD_STATUS), Some(&[STATUS_MESSAGE.to_string()][..]));
        }
        for raw in ["pending", "paid"] {
            assert!(InvoiceForm::new("c1", "10", raw).parse().is_ok());
        }
    }

    #[test]
    fn test_all_invalid_fields_are_reported_together() {
        let errors = InvoiceForm::new("", "0", "bad").parse().unwrap_err();
        assert_eq!(errors.fields().count(), 3);
        assert_eq!(errors.get(FIELD_CUSTOMER_ID), Some(&[CUSTOMER_MESSAGE.to_string()][..]));
        assert!(errors.get(FIELD_AMOUNT).is_some());
        assert!(errors.get(FIELD_STATUS).is_some());
    }

    #[test]
    fn test_field_errors_serialize_as_map() {
        let errors = FieldErrors::single(FIELD_CUSTOMER_ID, CUSTOMER_MESSAGE);
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["customerId"][0], CUSTOMER_MESSAGE);
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let form: InvoiceForm = serde_json::from_str(r#"{"amount":"12"}"#).unwrap();
        assert!(form.customer_id.is_empty());
        assert!(form.status.is_empty());
        assert_eq!(form.parse().unwrap_err().fields().count(), 2);
    }
}
