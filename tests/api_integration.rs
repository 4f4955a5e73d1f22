//! API integration tests.
//!
//! Behavior is verified through the full Router (middleware chain included)
//! via `tower::ServiceExt::oneshot`, without binding a listener.

use std::net::SocketAddr;
use std::str::FromStr;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use base64::Engine as _;
use serde_json::{Value, json};
use tower::ServiceExt;

use demo_api::{
    app,
    config::{AppEnv, Config},
    state::AppState,
};

fn test_config() -> Config {
    Config {
        addr: SocketAddr::from_str("127.0.0.1:0").unwrap(),
        app_env: AppEnv::Testing,
        app_name: "demo-api".to_string(),
        version: "0.0.0-test",
        debug: true,
        cors_allowed_origins: Vec::new(),
        log_level: "info".to_string(),
        // Small limit so the body-limit test stays cheap.
        request_body_limit_bytes: 4096,
        request_timeout_seconds: 5,
    }
}

fn test_app() -> Router {
    app::build_router(AppState::new(test_config()))
}

/// Structurally valid JWT with a garbage signature segment. The backend never
/// verifies signatures, so this is all a test needs.
fn forged_token(payload: Value) -> String {
    let engine = &base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let header = engine.encode(json!({"alg": "RS256", "typ": "JWT"}).to_string());
    let body = engine.encode(payload.to_string());
    format!("{header}.{body}.forged-signature")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn get_with_auth(uri: &str, authorization: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", authorization)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("content-length", body.len())
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("body should be valid json")
}

// ============================================================================
// Basic surface
// ============================================================================

#[tokio::test]
async fn health_returns_healthy() {
    let response = test_app().oneshot(get("/api/v1/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["message"], "API is running");
}

#[tokio::test]
async fn welcome_includes_name_and_version() {
    let response = test_app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Welcome to demo-api!");
    assert_eq!(json["version"], "0.0.0-test");
    assert_eq!(json["environment"], "testing");
}

#[tokio::test]
async fn unknown_routes_get_the_json_envelope() {
    let response = test_app().oneshot(get("/no/such/route")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "RESOURCE_NOT_FOUND");
}

// ============================================================================
// Request-id middleware
// ============================================================================

#[tokio::test]
async fn responses_carry_a_request_id() {
    let first = test_app().oneshot(get("/")).await.unwrap();
    let second = test_app().oneshot(get("/")).await.unwrap();

    let id_a = first.headers().get("x-request-id").unwrap().to_str().unwrap().to_string();
    let id_b = second.headers().get("x-request-id").unwrap().to_str().unwrap().to_string();
    uuid::Uuid::parse_str(&id_a).expect("request id should be a uuid");
    assert_ne!(id_a, id_b, "request ids must be unique per request");
}

#[tokio::test]
async fn client_supplied_request_ids_are_propagated() {
    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/me")
        .header("x-request-id", "client-chosen-id")
        .body(Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "client-chosen-id"
    );

    let json = body_json(response).await;
    assert_eq!(json["request_id"], "client-chosen-id");
}

// ============================================================================
// Timeout middleware
// ============================================================================

#[tokio::test]
async fn slow_requests_time_out_with_the_json_envelope() {
    let mut config = test_config();
    config.request_timeout_seconds = 1;

    let slow = axum::routing::get(|| async {
        tokio::time::sleep(std::time::Duration::from_secs(10)).await;
        "done"
    });
    let router =
        demo_api::middleware::http::apply(Router::new().route("/slow", slow), &config);

    let response = router.oneshot(get("/slow")).await.unwrap();
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "REQUEST_TIMEOUT");
    assert!(json["error"]["message"].is_string());
    assert!(json["error"]["timestamp"].is_string());
}

// ============================================================================
// Error mapping table
// ============================================================================

#[tokio::test]
async fn error_routes_follow_the_mapping_table() {
    let cases = [
        ("/api/v1/errors/validation", 422, "VALIDATION_ERROR"),
        ("/api/v1/errors/business-logic", 400, "BUSINESS_LOGIC_ERROR"),
        ("/api/v1/errors/resource-not-found", 404, "RESOURCE_NOT_FOUND"),
        ("/api/v1/errors/database", 500, "DATABASE_ERROR"),
        ("/api/v1/errors/external-service", 502, "EXTERNAL_SERVICE_ERROR"),
        ("/api/v1/errors/unexpected", 500, "INTERNAL_SERVER_ERROR"),
    ];

    for (uri, status, code) in cases {
        let response = test_app().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status().as_u16(), status, "{}", uri);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], code, "{}", uri);
        assert!(json["error"]["message"].is_string(), "{}", uri);
        assert!(json["error"]["timestamp"].is_string(), "{}", uri);
    }
}

#[tokio::test]
async fn error_details_are_included_when_present() {
    let response = test_app()
        .oneshot(get("/api/v1/errors/validation"))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["error"]["details"]["field"], "demo_field");
}

#[tokio::test]
async fn internal_errors_do_not_leak_causes() {
    let response = test_app()
        .oneshot(get("/api/v1/errors/unexpected"))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["error"]["message"], "an unexpected error occurred");
    assert!(json["error"]["message"].as_str().unwrap().find("divide").is_none());
}

#[tokio::test]
async fn pick_selects_a_variant_by_query() {
    let response = test_app()
        .oneshot(get("/api/v1/errors/pick?kind=database"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"]["code"], "DATABASE_ERROR");

    // Defaults to validation when no kind is given.
    let response = test_app().oneshot(get("/api/v1/errors/pick")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Unknown kinds are the unexpected-error path.
    let response = test_app()
        .oneshot(get("/api/v1/errors/pick?kind=bogus"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await["error"]["code"],
        "INTERNAL_SERVER_ERROR"
    );
}

// ============================================================================
// Payload validation
// ============================================================================

#[tokio::test]
async fn valid_payload_passes() {
    let body = json!({"name": "Alice", "email": "alice@example.com", "age": 30});
    let response = test_app()
        .oneshot(post_json("/api/v1/errors/payload", body.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "validation passed");
    assert_eq!(json["data"]["name"], "Alice");
}

#[tokio::test]
async fn malformed_json_becomes_a_validation_error() {
    let response = test_app()
        .oneshot(post_json("/api/v1/errors/payload", "{not json".to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert!(json["error"]["details"]["reason"].is_string());
}

#[tokio::test]
async fn field_violations_come_back_with_details() {
    let body = json!({"name": "", "email": "nope", "age": 200});
    let response = test_app()
        .oneshot(post_json("/api/v1/errors/payload", body.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    let errors = json["error"]["details"]["validation_errors"]
        .as_array()
        .expect("field errors");
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0]["field"], "name");
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    // test config caps bodies at 4 KiB
    let big = "x".repeat(8192);
    let body = json!({"name": big, "email": "a@b.c", "age": 1});
    let response = test_app()
        .oneshot(post_json("/api/v1/errors/payload", body.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

// ============================================================================
// JWT claim extraction (fail-open)
// ============================================================================

#[tokio::test]
async fn me_without_a_token_is_anonymous() {
    let response = test_app().oneshot(get("/api/v1/me")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["authenticated"], false);
    assert_eq!(json["user_id"], Value::Null);
    assert_eq!(json["roles"], json!([]));
    assert_eq!(json["permissions"], json!([]));
    assert!(json["request_id"].is_string());
}

#[tokio::test]
async fn me_with_a_token_reflects_the_claims() {
    let token = forged_token(json!({
        "sub": "user-1",
        "preferred_username": "alice",
        "email": "alice@example.com",
        "realm_access": {"roles": ["editor", "viewer"]},
        "scope": "openid profile",
        "typ": "access",
        "exp": 4_102_444_800u64,
    }));

    let response = test_app()
        .oneshot(get_with_auth("/api/v1/me", &format!("Bearer {token}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["authenticated"], true);
    assert_eq!(json["user_id"], "user-1");
    assert_eq!(json["username"], "alice");
    assert_eq!(json["email"], "alice@example.com");
    assert_eq!(json["roles"], json!(["editor", "viewer"]));
    assert_eq!(json["permissions"], json!(["openid", "profile"]));
    assert_eq!(json["token_type"], "access");
}

#[tokio::test]
async fn garbage_tokens_fail_open() {
    for authorization in [
        "Bearer not-a-jwt",
        "Bearer a.b",
        "Bearer ",
        "Basic dXNlcjpwYXNz",
        "Bearer !!!.!!!.!!!",
    ] {
        let response = test_app()
            .oneshot(get_with_auth("/api/v1/me", authorization))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", authorization);

        let json = body_json(response).await;
        assert_eq!(json["authenticated"], false, "{}", authorization);
    }
}

#[tokio::test]
async fn expired_tokens_are_not_rejected() {
    // exp long in the past; lifetime enforcement belongs to the gateway
    let token = forged_token(json!({"sub": "user-1", "exp": 1}));
    let response = test_app()
        .oneshot(get_with_auth("/api/v1/me", &format!("Bearer {token}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["authenticated"], true);
    assert_eq!(json["expires_at"], 1);
}

#[tokio::test]
async fn health_ignores_unusable_tokens() {
    // health sits on the middleware skip list; a garbage token must not matter
    let response = test_app()
        .oneshot(get_with_auth("/api/v1/health", "Bearer !!!not-a-jwt!!!"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn admin_area_is_role_gated() {
    // Anonymous callers are rejected before the role check.
    let response = test_app().oneshot(get("/api/v1/admin")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Authenticated but without the admin role.
    let token = forged_token(json!({"sub": "user-1", "roles": ["editor"]}));
    let response = test_app()
        .oneshot(get_with_auth("/api/v1/admin", &format!("Bearer {token}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"]["code"], "FORBIDDEN");

    // With the admin role.
    let token = forged_token(json!({"sub": "user-1", "roles": ["admin"]}));
    let response = test_app()
        .oneshot(get_with_auth("/api/v1/admin", &format!("Bearer {token}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user_id"], "user-1");
}

#[tokio::test]
async fn claims_route_requires_authentication() {
    let response = test_app().oneshot(get("/api/v1/me/claims")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"]["code"], "UNAUTHORIZED");

    let token = forged_token(json!({"sub": "user-1", "team": "growth"}));
    let response = test_app()
        .oneshot(get_with_auth("/api/v1/me/claims", &format!("Bearer {token}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["claims"]["sub"], "user-1");
    assert_eq!(json["claims"]["team"], "growth");
}
