//! Email service for form notifications.
//!
//! Uses SMTP via lettre for delivery with Askama HTML templates. Each form
//! submission produces two messages: the inquiry itself, sent to the
//! business inbox, and an acknowledgement sent back to the submitter.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use goodwill_core::{ContactInquiry, QuoteRequest};

use crate::config::{BUSINESS_NAME, EmailConfig};

/// HTML template for a contact inquiry.
#[derive(Template)]
#[template(path = "email/contact_inquiry.html")]
struct ContactInquiryHtml<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

/// Plain text template for a contact inquiry.
#[derive(Template)]
#[template(path = "email/contact_inquiry.txt")]
struct ContactInquiryText<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

/// HTML template for a quote request.
#[derive(Template)]
#[template(path = "email/quote_request.html")]
struct QuoteRequestHtml<'a> {
    company_name: &'a str,
    contact_person: &'a str,
    email: &'a str,
    phone: &'a str,
    country: &'a str,
    product_interest: &'a str,
    estimated_quantity: &'a str,
    frequency: &'a str,
    additional_requirements: &'a str,
}

/// Plain text template for a quote request.
#[derive(Template)]
#[template(path = "email/quote_request.txt")]
struct QuoteRequestText<'a> {
    company_name: &'a str,
    contact_person: &'a str,
    email: &'a str,
    phone: &'a str,
    country: &'a str,
    product_interest: &'a str,
    estimated_quantity: &'a str,
    frequency: &'a str,
    additional_requirements: &'a str,
}

/// HTML template for the submitter acknowledgement.
#[derive(Template)]
#[template(path = "email/auto_reply.html")]
struct AutoReplyHtml<'a> {
    name: &'a str,
    business_name: &'a str,
}

/// Plain text template for the submitter acknowledgement.
#[derive(Template)]
#[template(path = "email/auto_reply.txt")]
struct AutoReplyText<'a> {
    name: &'a str,
    business_name: &'a str,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// A rendered message, ready to address and send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Render the inbox copy of a contact inquiry.
///
/// # Errors
///
/// Returns `EmailError::Template` if rendering fails.
pub fn render_contact_inquiry(inquiry: &ContactInquiry) -> Result<RenderedEmail, EmailError> {
    let (name, email, message) = (
        inquiry.name.as_str(),
        inquiry.email.as_str(),
        inquiry.message.as_str(),
    );
    Ok(RenderedEmail {
        subject: format!("New Contact Inquiry: {name}"),
        text: ContactInquiryText {
            name,
            email,
            message,
        }
        .render()?,
        html: ContactInquiryHtml {
            name,
            email,
            message,
        }
        .render()?,
    })
}

/// Render the inbox copy of a quote request.
///
/// # Errors
///
/// Returns `EmailError::Template` if rendering fails.
pub fn render_quote_request(quote: &QuoteRequest) -> Result<RenderedEmail, EmailError> {
    let additional_requirements = quote
        .additional_requirements
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("None");

    let html = QuoteRequestHtml {
        company_name: &quote.company_name,
        contact_person: &quote.contact_person,
        email: quote.email.as_str(),
        phone: &quote.phone,
        country: &quote.country,
        product_interest: &quote.product_interest,
        estimated_quantity: &quote.estimated_quantity,
        frequency: &quote.frequency,
        additional_requirements,
    }
    .render()?;
    let text = QuoteRequestText {
        company_name: &quote.company_name,
        contact_person: &quote.contact_person,
        email: quote.email.as_str(),
        phone: &quote.phone,
        country: &quote.country,
        product_interest: &quote.product_interest,
        estimated_quantity: &quote.estimated_quantity,
        frequency: &quote.frequency,
        additional_requirements,
    }
    .render()?;

    Ok(RenderedEmail {
        subject: format!("New Quote Request: {}", quote.company_name),
        text,
        html,
    })
}

/// Render the acknowledgement sent back to a submitter.
///
/// # Errors
///
/// Returns `EmailError::Template` if rendering fails.
pub fn render_auto_reply(name: &str, subject: &str) -> Result<RenderedEmail, EmailError> {
    Ok(RenderedEmail {
        subject: subject.to_owned(),
        text: AutoReplyText {
            name,
            business_name: BUSINESS_NAME,
        }
        .render()?,
        html: AutoReplyHtml {
            name,
            business_name: BUSINESS_NAME,
        }
        .render()?,
    })
}

/// Auto-reply subject for contact inquiries.
pub const CONTACT_REPLY_SUBJECT: &str = "Thank you for contacting Goodwill Global Exports";

/// Auto-reply subject for quote requests.
pub const QUOTE_REPLY_SUBJECT: &str = "We successfully received your Quote Request";

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    inbox_address: String,
}

impl std::fmt::Debug for EmailService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailService")
            .field("from_address", &self.from_address)
            .field("inbox_address", &self.inbox_address)
            .finish_non_exhaustive()
    }
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// No connection is made until the first send.
    ///
    /// # Errors
    ///
    /// Returns error if the relay host is invalid for TLS.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
            inbox_address: config.inbox_address.clone(),
        })
    }

    /// Check that the relay accepts a connection.
    ///
    /// # Errors
    ///
    /// Returns `EmailError::Smtp` if the connection or handshake fails.
    pub async fn verify_connection(&self) -> Result<bool, EmailError> {
        Ok(self.mailer.test_connection().await?)
    }

    /// Forward a contact inquiry to the inbox, then acknowledge the sender.
    ///
    /// # Errors
    ///
    /// Returns error if the inbox copy fails. A failed acknowledgement is
    /// only logged.
    pub async fn send_contact_inquiry(&self, inquiry: &ContactInquiry) -> Result<(), EmailError> {
        let rendered = render_contact_inquiry(inquiry)?;
        self.send_rendered(&self.inbox_address, &rendered).await?;
        self.send_auto_reply(inquiry.email.as_str(), &inquiry.name, CONTACT_REPLY_SUBJECT)
            .await;
        Ok(())
    }

    /// Forward a quote request to the inbox, then acknowledge the sender.
    ///
    /// # Errors
    ///
    /// Returns error if the inbox copy fails. A failed acknowledgement is
    /// only logged.
    pub async fn send_quote_request(&self, quote: &QuoteRequest) -> Result<(), EmailError> {
        let rendered = render_quote_request(quote)?;
        self.send_rendered(&self.inbox_address, &rendered).await?;
        self.send_auto_reply(
            quote.email.as_str(),
            &quote.contact_person,
            QUOTE_REPLY_SUBJECT,
        )
        .await;
        Ok(())
    }

    async fn send_auto_reply(&self, to: &str, name: &str, subject: &str) {
        let result = match render_auto_reply(name, subject) {
            Ok(rendered) => self.send_rendered(to, &rendered).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            tracing::warn!(to = %to, error = %e, "Auto-reply failed");
        }
    }

    async fn send_rendered(&self, to: &str, rendered: &RenderedEmail) -> Result<(), EmailError> {
        self.send_multipart_email(to, &rendered.subject, &rendered.text, &rendered.html)
            .await
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Email sent successfully");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use goodwill_core::Email;

    use super::*;

    fn quote(additional: Option<&str>) -> QuoteRequest {
        QuoteRequest {
            company_name: "Italia Foods".to_string(),
            contact_person: "Elena Rossi".to_string(),
            email: Email::parse("elena@italiafoods.it").unwrap(),
            phone: "+39 02 1234 5678".to_string(),
            country: "Italy".to_string(),
            product_interest: "Saffron".to_string(),
            estimated_quantity: "20".to_string(),
            frequency: "Quarterly".to_string(),
            additional_requirements: additional.map(ToString::to_string),
        }
    }

    #[test]
    fn test_contact_inquiry_subject_and_body() {
        let inquiry = ContactInquiry {
            name: "David Chen".to_string(),
            email: Email::parse("david@asianrice.com").unwrap(),
            message: "Do you ship to Singapore?".to_string(),
        };
        let rendered = render_contact_inquiry(&inquiry).unwrap();

        assert_eq!(rendered.subject, "New Contact Inquiry: David Chen");
        assert!(rendered.html.contains("david@asianrice.com"));
        assert!(rendered.text.contains("Do you ship to Singapore?"));
    }

    #[test]
    fn test_html_escapes_user_input() {
        let inquiry = ContactInquiry {
            name: "Mallory".to_string(),
            email: Email::parse("m@evil.example.com").unwrap(),
            message: "<script>alert(1)</script>".to_string(),
        };
        let rendered = render_contact_inquiry(&inquiry).unwrap();

        assert!(!rendered.html.contains("<script>"));
        assert!(rendered.html.contains("&#60;script&#62;alert(1)&#60;/script&#62;"));
    }

    #[test]
    fn test_quote_request_shows_tonnage_and_none() {
        let rendered = render_quote_request(&quote(None)).unwrap();

        assert_eq!(rendered.subject, "New Quote Request: Italia Foods");
        assert!(rendered.html.contains("20 MT"));
        assert!(rendered.html.contains("None"));
        assert!(rendered.text.contains("Quarterly"));
    }

    #[test]
    fn test_quote_request_includes_requirements() {
        let rendered = render_quote_request(&quote(Some("ISO 22000 certified"))).unwrap();
        assert!(rendered.html.contains("ISO 22000 certified"));
        assert!(!rendered.html.contains(">None<"));
    }

    #[test]
    fn test_auto_reply_greets_by_name() {
        let rendered = render_auto_reply("Sarah Williams", QUOTE_REPLY_SUBJECT).unwrap();

        assert_eq!(rendered.subject, "We successfully received your Quote Request");
        assert!(rendered.html.contains("Hello Sarah Williams,"));
        assert!(rendered.text.contains("Goodwill Global Exports Team"));
    }
}
