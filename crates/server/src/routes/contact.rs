//! Contact and quote form route handlers.
//!
//! Both endpoints validate the submission, hand it to the notifier, and
//! answer immediately. Delivery happens in the background and its outcome
//! never changes the response.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;
use tracing::instrument;

use goodwill_core::{ContactInquiry, Email, QuoteRequest};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

const INVALID_EMAIL: &str = "Please enter a valid email address.";

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// Quote request form data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteForm {
    pub company_name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub phone: Option<String>,
    pub country: Option<String>,
    pub product_interest: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub estimated_quantity: Option<String>,
    pub frequency: Option<String>,
    pub additional_requirements: Option<String>,
}

/// Accept a JSON string or number; numbers keep their JSON text.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "invalid type: {other}, expected a string or number"
        ))),
    }
}

/// Response for form submission.
#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub message: &'static str,
}

/// Collects required fields, remembering which ones were blank.
struct Required {
    missing: Vec<String>,
}

impl Required {
    const fn new() -> Self {
        Self {
            missing: Vec::new(),
        }
    }

    fn take(&mut self, wire_name: &str, value: Option<String>) -> String {
        match value {
            Some(v) if !v.trim().is_empty() => v.trim().to_owned(),
            _ => {
                self.missing.push(wire_name.to_owned());
                String::new()
            }
        }
    }

    fn finish(self) -> Result<()> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::MissingFields(self.missing))
        }
    }
}

fn parse_email(raw: &str) -> Result<Email> {
    Email::parse(raw).map_err(|_| AppError::BadRequest(INVALID_EMAIL.to_string()))
}

impl ContactForm {
    /// Check required fields and the email address.
    ///
    /// # Errors
    ///
    /// `MissingFields` lists every blank field; a malformed address is a
    /// `BadRequest`.
    pub fn into_inquiry(self) -> Result<ContactInquiry> {
        let mut required = Required::new();
        let name = required.take("name", self.name);
        let email = required.take("email", self.email);
        let message = required.take("message", self.message);
        required.finish()?;

        Ok(ContactInquiry {
            name,
            email: parse_email(&email)?,
            message,
        })
    }
}

impl QuoteForm {
    /// Check required fields and the email address.
    ///
    /// # Errors
    ///
    /// `MissingFields` lists every blank field except
    /// `additionalRequirements`; a malformed address is a `BadRequest`.
    pub fn into_request(self) -> Result<QuoteRequest> {
        let mut required = Required::new();
        let company_name = required.take("companyName", self.company_name);
        let contact_person = required.take("contactPerson", self.contact_person);
        let email = required.take("email", self.email);
        let phone = required.take("phone", self.phone);
        let country = required.take("country", self.country);
        let product_interest = required.take("productInterest", self.product_interest);
        let estimated_quantity = required.take("estimatedQuantity", self.estimated_quantity);
        let frequency = required.take("frequency", self.frequency);
        required.finish()?;

        Ok(QuoteRequest {
            company_name,
            contact_person,
            email: parse_email(&email)?,
            phone,
            country,
            product_interest,
            estimated_quantity,
            frequency,
            additional_requirements: self
                .additional_requirements
                .filter(|s| !s.trim().is_empty()),
        })
    }
}

/// Submit a contact inquiry.
///
/// POST /api/contact
#[instrument(skip(state, body))]
pub async fn contact(
    State(state): State<AppState>,
    body: std::result::Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<FormResponse>> {
    let Json(form) = body?;
    let inquiry = form.into_inquiry()?;

    add_breadcrumb("forms", "Contact inquiry received", None);
    tracing::info!(domain = %inquiry.email.domain(), "Contact inquiry accepted");
    drop(state.notifier().dispatch_contact(inquiry));

    Ok(Json(FormResponse {
        message: "Email sent successfully",
    }))
}

/// Submit a quote request.
///
/// POST /api/quote
#[instrument(skip(state, body))]
pub async fn quote(
    State(state): State<AppState>,
    body: std::result::Result<Json<QuoteForm>, JsonRejection>,
) -> Result<Json<FormResponse>> {
    let Json(form) = body?;
    let request = form.into_request()?;

    add_breadcrumb(
        "forms",
        "Quote request received",
        Some(&[("country", request.country.as_str())]),
    );
    tracing::info!(company = %request.company_name, "Quote request accepted");
    drop(state.notifier().dispatch_quote(request));

    Ok(Json(FormResponse {
        message: "Quote request sent successfully",
    }))
}
