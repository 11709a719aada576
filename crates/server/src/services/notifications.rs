//! Background delivery of form notifications.
//!
//! Handlers respond before any mail is sent. Each dispatch spawns a task
//! whose failure is logged and otherwise ignored: no retries, and nothing
//! reaches the HTTP response.

use tokio::task::JoinHandle;
use tracing::{Instrument, error, info, info_span, warn};

use goodwill_core::{ContactInquiry, QuoteRequest};

use super::email::EmailService;
use crate::config::EmailConfig;

/// Fire-and-forget sender for contact and quote notifications.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    email: Option<EmailService>,
}

impl Notifier {
    /// Build a notifier; `None` or an unusable relay yields a disabled one.
    #[must_use]
    pub fn from_config(config: Option<&EmailConfig>) -> Self {
        let Some(config) = config else {
            warn!("EMAIL_USER/EMAIL_PASS not set; form notifications are disabled");
            return Self::disabled();
        };

        match EmailService::new(config) {
            Ok(service) => Self::new(service),
            Err(e) => {
                error!(error = %e, host = %config.smtp_host, "Invalid SMTP relay; form notifications are disabled");
                Self::disabled()
            }
        }
    }

    #[must_use]
    pub const fn new(service: EmailService) -> Self {
        Self {
            email: Some(service),
        }
    }

    /// A notifier that drops every message.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { email: None }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.email.is_some()
    }

    /// Send a contact inquiry in the background.
    pub fn dispatch_contact(&self, inquiry: ContactInquiry) -> JoinHandle<()> {
        let email = self.email.clone();
        let span = info_span!("notify_contact", from = %inquiry.email);
        tokio::spawn(
            async move {
                let Some(service) = email else {
                    warn!("Email not configured; contact inquiry dropped");
                    return;
                };
                if let Err(e) = service.send_contact_inquiry(&inquiry).await {
                    error!(error = %e, "Failed to send contact inquiry");
                }
            }
            .instrument(span),
        )
    }

    /// Send a quote request in the background.
    pub fn dispatch_quote(&self, quote: QuoteRequest) -> JoinHandle<()> {
        let email = self.email.clone();
        let span = info_span!("notify_quote", company = %quote.company_name);
        tokio::spawn(
            async move {
                let Some(service) = email else {
                    warn!("Email not configured; quote request dropped");
                    return;
                };
                if let Err(e) = service.send_quote_request(&quote).await {
                    error!(error = %e, "Failed to send quote request");
                }
            }
            .instrument(span),
        )
    }

    /// Check the SMTP relay in the background and log the outcome.
    pub fn verify_in_background(&self) -> Option<JoinHandle<()>> {
        let service = self.email.clone()?;
        Some(tokio::spawn(async move {
            match service.verify_connection().await {
                Ok(true) => info!("Email server is ready"),
                Ok(false) => warn!("Email server rejected the connection test"),
                Err(e) => error!(error = %e, "Email transport error"),
            }
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use goodwill_core::Email;

    use super::*;

    #[tokio::test]
    async fn test_disabled_notifier_completes_quietly() {
        let notifier = Notifier::from_config(None);
        assert!(!notifier.is_enabled());
        assert!(notifier.verify_in_background().is_none());

        let handle = notifier.dispatch_contact(ContactInquiry {
            name: "Elena Rossi".to_string(),
            email: Email::parse("elena@italiafoods.it").unwrap(),
            message: "Saffron pricing for Q3?".to_string(),
        });
        handle.await.unwrap();
    }
}
