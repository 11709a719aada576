//! Outbound services used by the HTTP layer.
//!
//! # Services
//!
//! - `email` - SMTP delivery of inquiry and auto-reply emails
//! - `notifications` - Detached background dispatch of those emails

pub mod email;
pub mod notifications;

pub use email::{EmailError, EmailService};
pub use notifications::Notifier;
