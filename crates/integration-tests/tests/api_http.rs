//! Cross-cutting HTTP behavior: caching headers, health, request IDs.

use axum::http::Method;

use goodwill_integration_tests::TestApp;

#[tokio::test]
async fn test_api_responses_are_not_cacheable() {
    let app = TestApp::seeded().await;

    for uri in ["/api/products", "/api/blogs", "/api/testimonials", "/api/nope"] {
        let resp = app.get(uri).await;
        let headers = &resp.headers;
        assert_eq!(
            headers["cache-control"],
            "no-store, no-cache, must-revalidate, proxy-revalidate",
            "{uri}"
        );
        assert_eq!(headers["pragma"], "no-cache");
        assert_eq!(headers["expires"], "0");
        assert_eq!(headers["surrogate-control"], "no-store");
    }
}

#[tokio::test]
async fn test_unknown_api_path_is_json_404() {
    let app = TestApp::new();

    let resp = app.get("/api/orders").await;
    assert_eq!(resp.status, 404);
    assert_eq!(resp.body["message"], "Not Found");
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new();

    assert_eq!(app.get("/health").await.status, 200);
    assert_eq!(app.get("/health/ready").await.status, 200);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = TestApp::new();

    let resp = app
        .request(
            Method::GET,
            "/api/products",
            None,
            &[("x-request-id", "req-123")],
        )
        .await;
    assert_eq!(resp.headers["x-request-id"], "req-123");

    let resp = app.get("/health").await;
    assert!(resp.headers.contains_key("x-request-id"));
}
