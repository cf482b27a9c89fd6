//! Sign-in and sign-out handlers.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::extractors::FormInput;
use crate::api::AppState;
use crate::config::{DASHBOARD_PATH, SESSION_COOKIE_NAME, SIGN_IN_PATH};
use crate::domain::Credentials;
use crate::errors::{AppError, AppResult};
use crate::types::FormState;

/// Query string of the sign-in page
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoginQuery {
    /// Page to return to after signing in
    #[serde(rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

/// What the sign-in form needs to render
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginPage {
    /// Where the form posts to
    #[schema(example = "/login")]
    pub action: &'static str,
    /// Echoed back by the form as a hidden field
    #[serde(rename = "callbackUrl")]
    #[schema(example = "/dashboard/invoices")]
    pub callback_url: String,
}

/// Sign-in form submission
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    #[schema(example = "user@nextmail.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "123456")]
    pub password: String,
    #[serde(default, rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(SIGN_IN_PATH, get(login_page).post(authenticate))
        .route("/api/auth/signout", post(sign_out))
}

/// Only same-origin absolute paths are followed after sign-in.
pub fn sanitize_callback(raw: Option<&str>) -> String {
    match raw {
        Some(url) if url.starts_with('/') && !url.starts_with("//") && !url.contains('\\') => {
            url.to_string()
        }
        _ => DASHBOARD_PATH.to_string(),
    }
}

/// Sign-in form descriptor
#[utoipa::path(
    get,
    path = "/login",
    tag = "Authentication",
    params(LoginQuery),
    responses(
        (status = 200, description = "Sign-in form descriptor", body = LoginPage),
        (status = 307, description = "Already signed in; redirected to the dashboard")
    )
)]
pub async fn login_page(Query(query): Query<LoginQuery>) -> Json<LoginPage> {
    Json(LoginPage {
        action: SIGN_IN_PATH,
        callback_url: sanitize_callback(query.callback_url.as_deref()),
    })
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in; session cookie set"),
        (status = 401, description = "Invalid credentials.", body = FormState),
        (status = 500, description = "Something went wrong.", body = FormState)
    )
)]
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    FormInput(form): FormInput<LoginForm>,
) -> AppResult<Response> {
    let target = sanitize_callback(form.callback_url.as_deref());
    let credentials = Credentials::new(form.email, form.password);

    match state.auth_service.sign_in(credentials).await {
        Ok(session) => {
            let cookie = Cookie::build((SESSION_COOKIE_NAME, session.token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(state.secure_cookies);

            Ok((jar.add(cookie), Redirect::to(&target)).into_response())
        }
        Err(err @ AppError::Auth(_)) => {
            let status = err.status();
            Ok((status, Json(FormState::message(err.user_message()))).into_response())
        }
        Err(err) => Err(err),
    }
}

/// Sign out and return to the sign-in page
#[utoipa::path(
    post,
    path = "/api/auth/signout",
    tag = "Authentication",
    responses(
        (status = 303, description = "Session cookie cleared")
    )
)]
pub async fn sign_out(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE_NAME).path("/"));
    (jar, Redirect::to(SIGN_IN_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_callback_is_kept() {
        assert_eq!(
            sanitize_callback(Some("/dashboard/invoices?page=2")),
            "/dashboard/invoices?page=2"
        );
    }

    #[test]
    fn test_foreign_callback_falls_back_to_dashboard() {
        assert_eq!(sanitize_callback(Some("https://evil.example")), DASHBOARD_PATH);
        assert_eq!(sanitize_callback(Some("//evil.example")), DASHBOARD_PATH);
        assert_eq!(sanitize_callback(Some("/\\evil.example")), DASHBOARD_PATH);
        assert_eq!(sanitize_callback(None), DASHBOARD_PATH);
    }
}
