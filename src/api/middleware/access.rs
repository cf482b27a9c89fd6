//! Session middleware enforcing the access policy.
//!
//! Runs on every request. Requests the route matcher leaves ungated pass
//! straight through; all others have their session cookie verified and
//! are then allowed, sent to sign-in, or sent to the dashboard.

use axum::{
    extract::{Request, State},
    http::Uri,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::api::AppState;
use crate::config::{
    CALLBACK_URL_PARAM, SESSION_COOKIE_NAME, SIGN_IN_PATH, UNGATED_FILE_SUFFIX,
    UNGATED_SEGMENT_PREFIXES,
};
use crate::domain::{authorize_route, AccessDecision, Identity};
use crate::services::Claims;

/// Signed-in user extracted from the session cookie
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
        }
    }
}

impl From<CurrentUser> for Identity {
    fn from(user: CurrentUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Whether the access policy applies to `path`.
///
/// Paths whose first segment starts with one of the ungated prefixes, and
/// image files, are served without looking at the session.
pub fn is_gated_path(path: &str) -> bool {
    let first_segment = path.trim_start_matches('/').split('/').next().unwrap_or_default();
    if UNGATED_SEGMENT_PREFIXES
        .iter()
        .any(|prefix| first_segment.starts_with(prefix))
    {
        return false;
    }
    !path.ends_with(UNGATED_FILE_SUFFIX)
}

/// Sign-in URL that returns to `uri` afterwards
pub fn sign_in_url(uri: &Uri) -> String {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    format!(
        "{}?{}={}",
        SIGN_IN_PATH,
        CALLBACK_URL_PARAM,
        urlencoding::encode(target)
    )
}

/// Access policy middleware.
///
/// An invalid or expired session cookie counts as no session. On `Allow`
/// the [`CurrentUser`] is inserted into the request extensions.
pub async fn access_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    if !is_gated_path(&path) {
        return next.run(request).await;
    }

    let current_user = jar.get(SESSION_COOKIE_NAME).and_then(|cookie| {
        match state.auth_service.verify_session(cookie.value()) {
            Ok(claims) => Some(CurrentUser::from(claims)),
            Err(e) => {
                tracing::debug!("Ignoring invalid session cookie: {}", e);
                None
            }
        }
    });

    match authorize_route(&path, current_user.is_some()) {
        AccessDecision::Allow => {
            if let Some(user) = current_user {
                request.extensions_mut().insert(user);
            }
            next.run(request).await
        }
        AccessDecision::Deny => Redirect::temporary(&sign_in_url(request.uri())).into_response(),
        AccessDecision::Redirect(to) => Redirect::temporary(to).into_response(),
    }
}
