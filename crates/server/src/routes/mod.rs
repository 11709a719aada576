//! HTTP route handlers for the catalog API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Liveness check
//! GET    /health/ready           - Readiness check (storage round trip)
//!
//! # Catalog
//! GET    /api/products           - All products with category names
//! POST   /api/products           - Create product (category created on demand)
//! DELETE /api/products/{id}      - Delete product
//!
//! # Content
//! GET    /api/blogs              - All blog posts
//! POST   /api/blogs              - Create blog post
//! DELETE /api/blogs/{id}         - Delete blog post
//! GET    /api/testimonials       - All testimonials
//! POST   /api/testimonials       - Create testimonial
//! DELETE /api/testimonials/{id}  - Delete testimonial
//!
//! # Forms (rate limited)
//! POST   /api/contact            - Contact inquiry email
//! POST   /api/quote              - Quote request email
//!
//! # Everything else
//! GET    /*                      - SPA from STATIC_DIR, index.html fallback
//! ```

pub mod blogs;
pub mod contact;
pub mod health;
pub mod products;
pub mod testimonials;

use axum::{
    Json, Router,
    body::Body,
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Request, StatusCode},
    middleware,
    routing::{delete, get, post},
};
use chrono::{DateTime, Utc};
use serde_json::json;
use tower_http::{
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::middleware::{forms_rate_limiter, request_id_middleware};
use crate::state::AppState;

/// Largest accepted request body. Images arrive inline as data URLs.
pub const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Create the catalog and content routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index).post(products::create))
        .route("/products/{id}", delete(products::destroy))
        .route("/blogs", get(blogs::index).post(blogs::create))
        .route("/blogs/{id}", delete(blogs::destroy))
        .route(
            "/testimonials",
            get(testimonials::index).post(testimonials::create),
        )
        .route("/testimonials/{id}", delete(testimonials::destroy))
}

/// Create the form submission routes router.
pub fn form_routes(rate_limited: bool) -> Router<AppState> {
    let router = Router::new()
        .route("/contact", post(contact::contact))
        .route("/quote", post(contact::quote));

    if rate_limited {
        router.layer(forms_rate_limiter())
    } else {
        router
    }
}

/// Create all `/api` routes. Every response is marked uncacheable.
pub fn api_routes(rate_limited: bool) -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .merge(form_routes(rate_limited))
        .fallback(api_not_found)
        .layer(no_cache("cache-control", "no-store, no-cache, must-revalidate, proxy-revalidate"))
        .layer(no_cache("pragma", "no-cache"))
        .layer(no_cache("expires", "0"))
        .layer(no_cache("surrogate-control", "no-store"))
}

fn no_cache(name: &'static str, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

async fn api_not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" })))
}

/// Build the complete application router.
///
/// Sentry layers are added by the binary so tests can run without a hub.
pub fn app(state: AppState) -> Router {
    let rate_limited = state.config().forms_rate_limit;
    let static_dir = state.config().static_dir.clone();

    let mut router = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes(rate_limited));

    if let Some(dir) = static_dir {
        let index = dir.join("index.html");
        router = router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    router
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Format a timestamp the way the site displays dates (`M/D/YYYY`).
#[must_use]
pub fn display_date(at: &DateTime<Utc>) -> String {
    at.format("%-m/%-d/%Y").to_string()
}

/// Leading-integer parse: optional sign, then digits; trailing text ignored.
///
/// Returns `None` when no digits lead the (trimmed) input or the value
/// does not fit in an `i32`.
pub(crate) fn parse_leading_int(input: &str) -> Option<i32> {
    let s = input.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1_i64, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    i32::try_from(sign * magnitude).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_display_date_has_no_padding() {
        let at = Utc.with_ymd_and_hms(2025, 3, 7, 15, 0, 0).unwrap();
        assert_eq!(display_date(&at), "3/7/2025");

        let at = Utc.with_ymd_and_hms(2024, 12, 25, 0, 0, 0).unwrap();
        assert_eq!(display_date(&at), "12/25/2024");
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  7 tonnes"), Some(7));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("12.9"), Some(12));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999"), None);
    }
}
