//! Validated form submissions that trigger notification emails.

use serde::Serialize;

use super::email::Email;

/// A general inquiry from the contact page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactInquiry {
    pub name: String,
    pub email: Email,
    pub message: String,
}

/// A B2B quote request from the quote page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub company_name: String,
    pub contact_person: String,
    pub email: Email,
    pub phone: String,
    /// Destination country for the shipment.
    pub country: String,
    pub product_interest: String,
    /// Quantity in metric tonnes, as typed by the buyer.
    pub estimated_quantity: String,
    pub frequency: String,
    pub additional_requirements: Option<String>,
}
