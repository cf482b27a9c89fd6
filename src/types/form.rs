//! Form action results.
//!
//! A form action either navigates (`303 See Other`) or hands the form
//! state back to the caller so it can show the messages.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::FieldErrors;

/// State returned to a form after a failed action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct FormState {
    /// Messages per form field
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>, example = json!({"amount": ["Please enter an amount greater than $0."]}))]
    pub errors: Option<FieldErrors>,
    /// Summary message
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Missing Fields. Failed to Create Invoice.")]
    pub message: Option<String>,
}

impl FormState {
    pub fn invalid(errors: FieldErrors, message: impl Into<String>) -> Self {
        Self {
            errors: Some(errors),
            message: Some(message.into()),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            errors: None,
            message: Some(message.into()),
        }
    }
}

/// Terminal state of a form action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Success: navigate to the given path
    Redirect(String),
    /// Input was rejected before anything was persisted
    Invalid(FormState),
    /// Persisting failed; nothing to retry automatically
    Failed(FormState),
}

impl FormOutcome {
    pub fn redirect(path: impl Into<String>) -> Self {
        FormOutcome::Redirect(path.into())
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, FormOutcome::Redirect(_))
    }
}

impl IntoResponse for FormOutcome {
    fn into_response(self) -> Response {
        match self {
            FormOutcome::Redirect(path) => Redirect::to(&path).into_response(),
            FormOutcome::Invalid(state) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(state)).into_response()
            }
            FormOutcome::Failed(state) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(state)).into_response()
            }
        }
    }
}
