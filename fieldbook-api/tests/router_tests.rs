/// Router-level tests for the Fieldbook API
///
/// These tests drive the full router (middleware stack included) and cover
/// everything that runs before the first database query:
/// - Bearer-token authentication on protected routes
/// - Admin-only role enforcement
/// - Request body validation
/// - Pagination parameter validation

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Duration;
use common::{TestContext, TEST_SECRET};
use fieldbook_shared::auth::jwt::{create_token, Claims};
use fieldbook_shared::models::user::Role;
use serde_json::json;
use tower::Service as _;
use uuid::Uuid;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn authed(method: &str, uri: &str, auth: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", auth)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_protected_route_without_token_is_unauthorized() {
    let mut ctx = TestContext::new();

    let response = ctx.app.call(get("/users")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_bearer_authorization_is_bad_request() {
    let mut ctx = TestContext::new();

    let request = Request::builder()
        .method("GET")
        .uri("/tasks")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.call(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let mut ctx = TestContext::new();

    let request = Request::builder()
        .method("GET")
        .uri("/customers")
        .header("authorization", "Bearer not.a.token")
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.call(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let mut ctx = TestContext::new();

    let claims = Claims::with_expiration(Uuid::new_v4(), Role::Admin, Duration::seconds(-3600));
    let token = create_token(&claims, TEST_SECRET).unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/users")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.call(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_with_wrong_secret_is_unauthorized() {
    let mut ctx = TestContext::new();

    let claims = Claims::new(Uuid::new_v4(), Role::Admin);
    let token = create_token(&claims, "a-completely-different-signing-secret!").unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/users")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.call(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_employee_cannot_change_roles() {
    let mut ctx = TestContext::new();
    let auth = ctx.employee_auth_header(Uuid::new_v4());

    let request = authed(
        "PATCH",
        &format!("/users/{}", Uuid::new_v4()),
        &auth,
        json!({ "role": "ADMIN" }),
    );

    let response = ctx.app.call(request).await.unwrap();

    // Role check runs before any database access
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_pagination_rejects_non_positive_page() {
    let mut ctx = TestContext::new();
    let auth = ctx.admin_auth_header();

    let request = Request::builder()
        .method("GET")
        .uri("/customers?page=0&limit=10")
        .header("authorization", auth)
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.call(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pagination_rejects_out_of_range_page() {
    let mut ctx = TestContext::new();
    let auth = ctx.admin_auth_header();

    // i64::MAX as page must fail cleanly instead of overflowing the offset
    let request = Request::builder()
        .method("GET")
        .uri("/customers?page=9223372036854775807&limit=10")
        .header("authorization", auth)
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.call(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_customer_rejects_invalid_email() {
    let mut ctx = TestContext::new();
    let auth = ctx.admin_auth_header();

    let request = authed(
        "POST",
        "/customers",
        &auth,
        json!({
            "name": "Acme Corporation",
            "email": "not-an-email",
            "phone": "+1234567890"
        }),
    );

    let response = ctx.app.call(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_task_rejects_empty_title() {
    let mut ctx = TestContext::new();
    let auth = ctx.admin_auth_header();

    let request = authed(
        "POST",
        "/tasks",
        &auth,
        json!({
            "title": "",
            "assigned_to": Uuid::new_v4(),
            "customer_id": Uuid::new_v4()
        }),
    );

    let response = ctx.app.call(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let mut ctx = TestContext::new();

    let request = Request::builder()
        .method("POST")
        .uri("/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "name": "John Doe",
                "email": "john@example.com",
                "password": "short",
                "role": "EMPLOYEE"
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.call(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_security_headers_present() {
    let mut ctx = TestContext::new();

    let response = ctx.app.call(get("/users")).await.unwrap();

    assert_eq!(
        response.headers().get("X-Content-Type-Options").unwrap(),
        "nosniff"
    );
    assert_eq!(response.headers().get("X-Frame-Options").unwrap(), "DENY");
}
