//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//! Every error body is JSON with at least a `message` field.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::storage::StorageError;

/// One rejected field in a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Field name as it appears on the wire (camelCase).
    pub path: String,
    /// Machine-readable rule name, e.g. `required`.
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            path: to_camel_case(path),
            code: code.to_owned(),
            message: message.into(),
        }
    }
}

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body failed field validation.
    #[error("Validation failed: {} issue(s)", .0.len())]
    Validation(Vec<ValidationIssue>),

    /// Form submission is missing required fields.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut issues: Vec<ValidationIssue> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map_or_else(|| default_message(&err.code), ToString::to_string);
                    ValidationIssue::new(&field, &err.code, message)
                })
            })
            .collect();
        issues.sort_by(|a, b| a.path.cmp(&b.path));
        Self::Validation(issues)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if let JsonRejection::JsonDataError(ref err) = rejection
            && let Some(issue) = field_type_issue(&err.body_text())
        {
            return Self::Validation(vec![issue]);
        }
        Self::BadRequest(rejection.body_text())
    }
}

/// Turn a typed-body rejection (`...target type: name: invalid type: ...`)
/// into an issue for the named field. Errors without a field path yield `None`.
fn field_type_issue(text: &str) -> Option<ValidationIssue> {
    let (_, detail) = text.split_once(": ")?;
    let (path, reason) = detail.split_once(": ")?;
    if path.is_empty() || path == "." || path.contains(char::is_whitespace) {
        return None;
    }

    let reason = reason
        .rsplit_once(" at line ")
        .map_or(reason, |(message, _)| message);
    let code = if reason.starts_with("invalid type") {
        "invalid_type"
    } else {
        "invalid"
    };
    Some(ValidationIssue::new(path, code, reason))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Storage(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let (status, body) = match self {
            Self::Validation(issues) => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "Validation failed", "issues": issues }),
            ),
            Self::MissingFields(missing) => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "Missing required fields", "missing": missing }),
            ),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, json!({ "message": message })),
            Self::Storage(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": "Internal Server Error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

fn default_message(code: &str) -> String {
    match code {
        "required" => "Required".to_string(),
        "length" => "Must not be empty".to_string(),
        other => format!("Invalid value ({other})"),
    }
}

/// `image_url` -> `imageUrl`. Already camelCase input is returned unchanged.
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;
    use validator::Validate;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[derive(Validate)]
    struct Probe {
        #[validate(required, length(min = 1))]
        image_url: Option<String>,
        #[validate(required)]
        title: Option<String>,
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");

        let err = AppError::MissingFields(vec!["name".to_string(), "email".to_string()]);
        assert_eq!(err.to_string(), "Missing required fields: name, email");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("image_url"), "imageUrl");
        assert_eq!(to_camel_case("additional_requirements"), "additionalRequirements");
        assert_eq!(to_camel_case("imageUrl"), "imageUrl");
        assert_eq!(to_camel_case("title"), "title");
    }

    #[test]
    fn test_validation_errors_become_sorted_camel_case_issues() {
        let probe = Probe {
            image_url: Some(String::new()),
            title: None,
        };
        let AppError::Validation(issues) = AppError::from(probe.validate().unwrap_err()) else {
            panic!("expected validation error");
        };

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].path, "imageUrl");
        assert_eq!(issues[0].code, "length");
        assert_eq!(issues[1].path, "title");
        assert_eq!(issues[1].code, "required");
    }

    #[test]
    fn test_field_type_error_becomes_issue() {
        let issue = field_type_issue(
            "Failed to deserialize the JSON body into the target type: name: invalid type: \
             integer `5`, expected a string at line 1 column 10",
        )
        .unwrap();
        assert_eq!(issue.path, "name");
        assert_eq!(issue.code, "invalid_type");
        assert_eq!(issue.message, "invalid type: integer `5`, expected a string");

        let issue = field_type_issue(
            "Failed to deserialize the JSON body into the target type: gallery[1]: \
             invalid type: null, expected a string at line 1 column 40",
        )
        .unwrap();
        assert_eq!(issue.path, "gallery[1]");
    }

    #[test]
    fn test_root_type_error_has_no_field() {
        assert!(
            field_type_issue(
                "Failed to deserialize the JSON body into the target type: invalid type: \
                 sequence, expected struct CreateBlogRequest at line 1 column 0",
            )
            .is_none()
        );
    }

    #[tokio::test]
    async fn test_validation_body() {
        let response =
            AppError::Validation(vec![ValidationIssue::new("title", "required", "Required")])
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["issues"][0]["path"], "title");
    }

    #[tokio::test]
    async fn test_missing_fields_body() {
        let response = AppError::MissingFields(vec!["message".to_string()]).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Missing required fields");
        assert_eq!(body["missing"], json!(["message"]));
    }

    #[tokio::test]
    async fn test_server_errors_hide_details() {
        let response = AppError::Storage(StorageError::Poisoned).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Internal Server Error" })
        );

        let response = AppError::Internal("pool exhausted".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(!body.to_string().contains("pool exhausted"));
    }
}
