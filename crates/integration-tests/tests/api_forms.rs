//! Contact and quote form endpoints. Email is disabled in these tests, so a
//! 200 also shows the response does not depend on delivery.

use axum::http::Method;
use serde_json::{Value, json};

use goodwill_integration_tests::TestApp;

fn quote_body() -> Value {
    json!({
        "companyName": "Italia Foods",
        "contactPerson": "Elena Rossi",
        "email": "elena@italiafoods.it",
        "phone": "+39 02 1234 5678",
        "country": "Italy",
        "productInterest": "Premium Saffron Threads",
        "estimatedQuantity": "2",
        "frequency": "Quarterly"
    })
}

#[tokio::test]
async fn test_contact_succeeds_without_email_configured() {
    let app = TestApp::new();

    let resp = app
        .post(
            "/api/contact",
            &json!({
                "name": "David Chen",
                "email": "david@asianrice.com",
                "message": "Please share your basmati specifications."
            }),
        )
        .await;

    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, json!({ "message": "Email sent successfully" }));
}

#[tokio::test]
async fn test_contact_missing_fields() {
    let app = TestApp::new();

    let resp = app
        .post("/api/contact", &json!({ "name": "David Chen" }))
        .await;

    assert_eq!(resp.status, 400);
    assert_eq!(resp.body["message"], "Missing required fields");
    assert_eq!(resp.body["missing"], json!(["email", "message"]));
}

#[tokio::test]
async fn test_contact_invalid_email() {
    let app = TestApp::new();

    let resp = app
        .post(
            "/api/contact",
            &json!({ "name": "David", "email": "david@", "message": "Hi" }),
        )
        .await;

    assert_eq!(resp.status, 400);
    assert_eq!(resp.body["message"], "Please enter a valid email address.");
}

#[tokio::test]
async fn test_quote_succeeds() {
    let app = TestApp::new();

    let resp = app.post("/api/quote", &quote_body()).await;
    assert_eq!(resp.status, 200);
    assert_eq!(
        resp.body,
        json!({ "message": "Quote request sent successfully" })
    );
}

#[tokio::test]
async fn test_quote_missing_fields() {
    let app = TestApp::new();
    let mut body = quote_body();
    body["country"] = json!("");
    body.as_object_mut().unwrap().remove("productInterest");

    let resp = app.post("/api/quote", &body).await;
    assert_eq!(resp.status, 400);
    assert_eq!(resp.body["missing"], json!(["country", "productInterest"]));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();

    let resp = app
        .request(
            Method::POST,
            "/api/contact",
            None,
            &[("content-type", "application/json")],
        )
        .await;
    assert_eq!(resp.status, 400);
    assert!(resp.body["message"].is_string());
}

#[tokio::test]
async fn test_forms_are_rate_limited_per_client() {
    let app = TestApp::with_env(&[]);
    let body = quote_body();
    let client = [("x-forwarded-for", "203.0.113.50")];

    let mut statuses = Vec::new();
    for _ in 0..6 {
        let resp = app
            .request(Method::POST, "/api/quote", Some(&body), &client)
            .await;
        statuses.push(resp.status.as_u16());
    }
    assert_eq!(statuses[..5], [200; 5]);
    assert_eq!(statuses[5], 429);

    let other = app
        .request(
            Method::POST,
            "/api/quote",
            Some(&body),
            &[("x-forwarded-for", "198.51.100.9")],
        )
        .await;
    assert_eq!(other.status, 200);
}

#[tokio::test]
async fn test_quote_accepts_numeric_quantity() {
    let app = TestApp::new();
    let mut body = quote_body();
    body["estimatedQuantity"] = json!(40);

    let resp = app.post("/api/quote", &body).await;
    assert_eq!(resp.status, 200);
}
