//! HTTP middleware stack for the API server.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, capture errors)
//! 2. `TraceLayer` (request span with an empty `request_id` field)
//! 3. Request ID (fills the span field, echoes `x-request-id`)
//! 4. No-cache headers on `/api`
//! 5. Rate limiting (governor) on the form endpoints only

pub mod rate_limit;
pub mod request_id;

pub use rate_limit::forms_rate_limiter;
pub use request_id::request_id_middleware;
