//! API integration tests for serving URL creation and deletion.
//!
//! Tests verify:
//! - HTTP status codes and exact response bodies
//! - Two-stage deletion ordering against the recording fake
//! - 404 dispatch for unsupported methods on /servingUrl

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use serving_url_gateway::server::{create_router, RouterConfig};

use super::test_utils::MockProvider;

fn test_router(provider: MockProvider) -> axum::Router {
    create_router(provider, RouterConfig::default().with_tracing(false))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// =============================================================================
// Serving URL Creation
// =============================================================================

#[tokio::test]
async fn test_create_serving_url_success() {
    let provider = MockProvider::new().with_serving_url("https://example/served/foo");
    let router = test_router(provider.clone());

    let request = Request::builder()
        .uri("/servingUrl?imageLocation=foo.png")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Body is exactly the provider-returned URL, no extra formatting
    assert_eq!(body_string(response).await, "https://example/served/foo");
    assert_eq!(provider.issue_calls(), 1);
}

#[tokio::test]
async fn test_create_missing_param_returns_400_empty_body() {
    let provider = MockProvider::new();
    let router = test_router(provider.clone());

    let request = Request::builder()
        .uri("/servingUrl")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(response).await, "");

    // The provider is never consulted for an invalid request
    assert_eq!(provider.issue_calls(), 0);
}

#[tokio::test]
async fn test_create_empty_param_returns_400() {
    let provider = MockProvider::new();
    let router = test_router(provider);

    let request = Request::builder()
        .uri("/servingUrl?imageLocation=")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(response).await, "");
}

#[tokio::test]
async fn test_create_provider_failure_returns_404() {
    let provider = MockProvider::new().failing_issue();
    let router = test_router(provider);

    let request = Request::builder()
        .uri("/servingUrl?imageLocation=foo.png")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Body names the image but does not leak upstream error detail
    let body = body_string(response).await;
    assert!(body.contains("foo.png"));
    assert!(!body.contains("status 500"));
}

// =============================================================================
// Serving URL Deletion
// =============================================================================

#[tokio::test]
async fn test_delete_success() {
    let provider = MockProvider::new();
    let router = test_router(provider.clone());

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/servingUrl?imageLocation=foo.png")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("deleted"));

    // Both stages ran exactly once
    assert_eq!(provider.revoke_calls(), 1);
    assert_eq!(provider.delete_calls(), 1);
}

#[tokio::test]
async fn test_delete_missing_param_returns_400() {
    let provider = MockProvider::new();
    let router = test_router(provider.clone());

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/servingUrl")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_string(response).await,
        "No image location in request query\n"
    );
    assert_eq!(provider.revoke_calls(), 0);
    assert_eq!(provider.delete_calls(), 0);
}

#[tokio::test]
async fn test_delete_revoke_failure_skips_object_deletion() {
    let provider = MockProvider::new().failing_revoke();
    let router = test_router(provider.clone());

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/servingUrl?imageLocation=foo.png")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_string(response).await;
    assert!(body.contains("foo.png"));
    assert!(body.contains("retry"));

    // Stage 2 must never run after a stage 1 failure
    assert_eq!(provider.revoke_calls(), 1);
    assert_eq!(provider.delete_calls(), 0);
}

#[tokio::test]
async fn test_delete_object_failure_after_successful_revoke() {
    let provider = MockProvider::new().failing_delete();
    let router = test_router(provider.clone());

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/servingUrl?imageLocation=foo.png")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_string(response).await;
    assert!(body.contains("foo.png"));
    assert!(body.contains("retry"));

    // Stage 1 succeeded and is not compensated
    assert_eq!(provider.revoke_calls(), 1);
    assert_eq!(provider.delete_calls(), 1);
}

// =============================================================================
// Method Dispatch
// =============================================================================

#[tokio::test]
async fn test_unsupported_methods_return_404() {
    for method in [Method::POST, Method::PUT, Method::PATCH] {
        let provider = MockProvider::new();
        let router = test_router(provider.clone());

        let request = Request::builder()
            .method(method.clone())
            .uri("/servingUrl?imageLocation=foo.png")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::NOT_FOUND,
            "expected 404 for {}",
            method
        );
        assert_eq!(provider.issue_calls(), 0);
        assert_eq!(provider.revoke_calls(), 0);
        assert_eq!(provider.delete_calls(), 0);
    }
}

#[tokio::test]
async fn test_unknown_path_returns_404() {
    let router = test_router(MockProvider::new());

    let request = Request::builder()
        .uri("/nope")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
