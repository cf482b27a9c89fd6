//! Form extractor with application error rejection.

use axum::{
    async_trait,
    extract::{rejection::FormRejection, FromRequest, Request},
    Form,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// URL-encoded form body.
///
/// Field-level checks are left to the handler's service so that invalid
/// values come back as form state. Only a body that cannot be decoded at
/// all is rejected here.
///
/// # Example
///
/// ```rust,ignore
/// use invoice_dashboard::api::extractors::FormInput;
/// use invoice_dashboard::domain::InvoiceForm;
///
/// async fn create_invoice(FormInput(form): FormInput<InvoiceForm>) {
///     let draft = form.parse();
/// }
/// ```
pub struct FormInput<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormInput<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Form<T>: FromRequest<S, Rejection = FormRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        Ok(FormInput(value))
    }
}
