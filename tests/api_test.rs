//! Integration tests for API endpoints.
//!
//! These tests use mock services to drive the router without requiring
//! actual database or Redis connections.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        Request, StatusCode,
    },
    Router,
};
use chrono::{NaiveDate, Utc};
use jsonwebtoken::errors::ErrorKind;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use invoice_dashboard::api::{create_router, AppState};
use invoice_dashboard::domain::{
    Credentials, Customer, Invoice, InvoiceForm, InvoiceStatus, InvoiceView, User,
};
use invoice_dashboard::errors::{AppError, AppResult, AuthError};
use invoice_dashboard::infra::HealthProbe;
use invoice_dashboard::services::{
    AuthService, Claims, DashboardSummary, InvoiceService, Session, CREATE_MISSING_FIELDS,
    UPDATE_MISSING_FIELDS,
};
use invoice_dashboard::types::{FormOutcome, FormState, InvoiceQuery, Paginated};

const VALID_SESSION: &str = "valid-session";
const FORM: &str = "application/x-www-form-urlencoded";

// =============================================================================
// Mock Services for Testing
// =============================================================================

/// Accepts exactly one user; `broken@nextmail.com` simulates a lookup fault
struct MockAuthService;

#[async_trait]
impl AuthService for MockAuthService {
    async fn authorize(&self, _credentials: &Credentials) -> AppResult<Option<User>> {
        Ok(None)
    }

    async fn sign_in(&self, credentials: Credentials) -> AppResult<Session> {
        match (credentials.email.as_str(), credentials.password.as_str()) {
            ("user@nextmail.com", "123456") => Ok(Session {
                token: VALID_SESSION.to_string(),
                expires_in: 86400,
            }),
            ("broken@nextmail.com", _) => {
                Err(AuthError::CallbackRoute("connection refused".into()).into())
            }
            _ => Err(AuthError::CredentialsSignin.into()),
        }
    }

    fn verify_session(&self, token: &str) -> AppResult<Claims> {
        if token == VALID_SESSION {
            Ok(Claims {
                sub: Uuid::new_v4(),
                email: "user@nextmail.com".to_string(),
                name: "User".to_string(),
                exp: Utc::now().timestamp() + 3600,
                iat: Utc::now().timestamp(),
            })
        } else {
            Err(AppError::Jwt(ErrorKind::InvalidToken.into()))
        }
    }
}

/// Invoice service that validates forms and records every mutation
#[derive(Default)]
struct MockInvoiceService {
    calls: Mutex<Vec<String>>,
}

impl MockInvoiceService {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InvoiceService for MockInvoiceService {
    async fn create(&self, form: InvoiceForm) -> AppResult<FormOutcome> {
        match form.parse() {
            Ok(draft) => {
                self.record(format!("create {} {}", draft.customer_id, draft.amount_in_cents));
                Ok(FormOutcome::redirect("/dashboard/invoices"))
            }
            Err(errors) => Ok(FormOutcome::Invalid(FormState::invalid(
                errors,
                CREATE_MISSING_FIELDS,
            ))),
        }
    }

    async fn update(&self, id: &str, form: InvoiceForm) -> AppResult<FormOutcome> {
        match form.parse() {
            Ok(draft) => {
                self.record(format!("update {} {}", id, draft.amount_in_cents));
                Ok(FormOutcome::redirect("/dashboard/invoices"))
            }
            Err(errors) => Ok(FormOutcome::Invalid(FormState::invalid(
                errors,
                UPDATE_MISSING_FIELDS,
            ))),
        }
    }

    async fn delete(&self, id: &str) -> AppResult<FormOutcome> {
        self.record(format!("delete {}", id));
        Ok(FormOutcome::redirect("/dashboard/invoices"))
    }

    async fn list(&self, query: InvoiceQuery) -> AppResult<Paginated<InvoiceView>> {
        Ok(Paginated::new(vec![], query.page, query.per_page, 0))
    }

    async fn find(&self, id: &str) -> AppResult<Option<Invoice>> {
        Ok((id == "known").then(|| Invoice {
            id: "known".to_string(),
            customer_id: "abc".to_string(),
            amount: 4999,
            status: InvoiceStatus::Pending,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }))
    }

    async fn customers(&self) -> AppResult<Vec<Customer>> {
        Ok(vec![Customer {
            id: "abc".to_string(),
            name: "Amy Burns".to_string(),
            email: "amy@burns.com".to_string(),
            image_url: "/customers/amy-burns.png".to_string(),
        }])
    }

    async fn summary(&self) -> AppResult<DashboardSummary> {
        Ok(DashboardSummary {
            invoices: 3,
            paid: 1,
            pending: 2,
            customers: 1,
        })
    }
}

struct MockProbe {
    healthy: bool,
}

#[async_trait]
impl HealthProbe for MockProbe {
    async fn ping(&self) -> AppResult<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(AppError::internal("unreachable"))
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn test_app_with(invoices: Arc<MockInvoiceService>, redis_healthy: bool) -> Router {
    let state = AppState::new(
        Arc::new(MockAuthService),
        invoices,
        Arc::new(MockProbe { healthy: true }),
        Arc::new(MockProbe {
            healthy: redis_healthy,
        }),
    );
    create_router(state)
}

fn test_app() -> Router {
    test_app_with(Arc::new(MockInvoiceService::default()), true)
}

fn get(uri: &str, session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = session {
        builder = builder.header(COOKIE, format!("session={}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, session: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, FORM);
    if let Some(token) = session {
        builder = builder.header(COOKIE, format!("session={}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response.headers()[LOCATION].to_str().unwrap()
}

// =============================================================================
// Access policy
// =============================================================================

#[tokio::test]
async fn test_anonymous_dashboard_request_redirects_to_sign_in() {
    let response = test_app()
        .oneshot(get("/dashboard/invoices?page=2", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        location(&response),
        "/login?callbackUrl=%2Fdashboard%2Finvoices%3Fpage%3D2"
    );
}

#[tokio::test]
async fn test_invalid_session_counts_as_anonymous() {
    let response = test_app()
        .oneshot(get("/dashboard", Some("forged")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert!(location(&response).starts_with("/login?callbackUrl="));
}

#[tokio::test]
async fn test_signed_in_user_is_sent_to_dashboard() {
    for path in ["/", "/login"] {
        let response = test_app()
            .oneshot(get(path, Some(VALID_SESSION)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{}", path);
        assert_eq!(location(&response), "/dashboard");
    }
}

#[tokio::test]
async fn test_anonymous_user_sees_public_pages() {
    let response = test_app().oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = test_app()
        .oneshot(get("/login?callbackUrl=%2Fdashboard%2Finvoices", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["action"], "/login");
    assert_eq!(body["callbackUrl"], "/dashboard/invoices");
}

#[tokio::test]
async fn test_api_routes_bypass_policy_for_signed_in_user() {
    let response = test_app()
        .oneshot(get("/api/health", Some(VALID_SESSION)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_dashboard_shows_current_user() {
    let response = test_app()
        .oneshot(get("/dashboard", Some(VALID_SESSION)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["user"]["email"], "user@nextmail.com");
    assert_eq!(body["summary"]["pending"], 2);
}

// =============================================================================
// Sign-in
// =============================================================================

#[tokio::test]
async fn test_login_sets_session_cookie_and_redirects() {
    let response = test_app()
        .oneshot(post_form(
            "/login",
            None,
            "email=user%40nextmail.com&password=123456",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("session=valid-session"));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_login_follows_local_callback_only() {
    let response = test_app()
        .oneshot(post_form(
            "/login",
            None,
            "email=user%40nextmail.com&password=123456&callbackUrl=%2Fdashboard%2Finvoices",
        ))
        .await
        .unwrap();
    assert_eq!(location(&response), "/dashboard/invoices");

    let response = test_app()
        .oneshot(post_form(
            "/login",
            None,
            "email=user%40nextmail.com&password=123456&callbackUrl=https%3A%2F%2Fevil.example",
        ))
        .await
        .unwrap();
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_login_with_unknown_email_reports_invalid_credentials() {
    let response = test_app()
        .oneshot(post_form(
            "/login",
            None,
            "email=nobody%40nextmail.com&password=123456",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(SET_COOKIE).is_none());
    let body = json_body(response).await;
    assert_eq!(body["message"], "Invalid credentials.");
}

#[tokio::test]
async fn test_login_fault_reports_generic_message() {
    let response = test_app()
        .oneshot(post_form(
            "/login",
            None,
            "email=broken%40nextmail.com&password=123456",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Something went wrong.");
}

#[tokio::test]
async fn test_sign_out_clears_cookie() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/signout")
        .header(COOKIE, format!("session={}", VALID_SESSION))
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("session="));
    assert!(!cookie.contains(VALID_SESSION));
}

// =============================================================================
// Invoices
// =============================================================================

#[tokio::test]
async fn test_create_invoice_redirects_to_listing() {
    let invoices = Arc::new(MockInvoiceService::default());
    let response = test_app_with(invoices.clone(), true)
        .oneshot(post_form(
            "/dashboard/invoices",
            Some(VALID_SESSION),
            "customerId=abc&amount=49.99&status=pending",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard/invoices");
    assert_eq!(invoices.calls(), vec!["create abc 4999".to_string()]);
}

#[tokio::test]
async fn test_invalid_invoice_returns_field_errors() {
    let invoices = Arc::new(MockInvoiceService::default());
    let response = test_app_with(invoices.clone(), true)
        .oneshot(post_form(
            "/dashboard/invoices",
            Some(VALID_SESSION),
            "customerId=&amount=0&status=bad",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["message"], CREATE_MISSING_FIELDS);
    assert_eq!(body["errors"]["customerId"][0], "Please select a customer.");
    assert_eq!(
        body["errors"]["amount"][0],
        "Please enter an amount greater than $0."
    );
    assert_eq!(body["errors"]["status"][0], "Please select an invoice status.");
    assert!(invoices.calls().is_empty());
}

#[tokio::test]
async fn test_update_invoice_by_id() {
    let invoices = Arc::new(MockInvoiceService::default());
    let response = test_app_with(invoices.clone(), true)
        .oneshot(post_form(
            "/dashboard/invoices/known",
            Some(VALID_SESSION),
            "customerId=abc&amount=10&status=paid",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(invoices.calls(), vec!["update known 1000".to_string()]);
}

#[tokio::test]
async fn test_delete_unknown_invoice_still_redirects() {
    let invoices = Arc::new(MockInvoiceService::default());
    let response = test_app_with(invoices.clone(), true)
        .oneshot(post_form(
            "/dashboard/invoices/does-not-exist/delete",
            Some(VALID_SESSION),
            "",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard/invoices");
    assert_eq!(invoices.calls(), vec!["delete does-not-exist".to_string()]);
}

#[tokio::test]
async fn test_anonymous_delete_is_not_performed() {
    let invoices = Arc::new(MockInvoiceService::default());
    let response = test_app_with(invoices.clone(), true)
        .oneshot(post_form("/dashboard/invoices/abc/delete", None, ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert!(invoices.calls().is_empty());
}

#[tokio::test]
async fn test_edit_page_for_missing_invoice_is_not_found() {
    let response = test_app()
        .oneshot(get("/dashboard/invoices/missing/edit", Some(VALID_SESSION)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = test_app()
        .oneshot(get("/dashboard/invoices/known/edit", Some(VALID_SESSION)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["invoice"]["amount"], 4999);
    assert_eq!(body["customers"][0]["name"], "Amy Burns");
}

#[tokio::test]
async fn test_listing_uses_default_page_size() {
    let response = test_app()
        .oneshot(get("/dashboard/invoices?query=amy", Some(VALID_SESSION)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["per_page"], 6);
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_degraded_when_redis_down() {
    let response = test_app_with(Arc::new(MockInvoiceService::default()), false)
        .oneshot(get("/api/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["database"]["status"], "healthy");
    assert_eq!(body["services"]["redis"]["status"], "unhealthy");
}
