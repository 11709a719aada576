//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; an unset or blank variable takes its default.
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string (unset: in-memory store)
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - First port to try (default: 5000)
//! - `EMAIL_USER` / `EMAIL_PASS` - SMTP credentials (both unset: email disabled)
//! - `SMTP_HOST` - SMTP relay (default: smtp.gmail.com)
//! - `SMTP_PORT` - SMTP submission port (default: 587)
//! - `EMAIL_FROM` - Sender address (default: `EMAIL_USER`)
//! - `EMAIL_TO` - Business inbox for inquiries (default: `EMAIL_USER`)
//! - `STATIC_DIR` - Built SPA to serve for non-API paths
//! - `FORMS_RATE_LIMIT` - Rate limit contact/quote forms (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Trading name used in email copy and as the default blog author.
pub const BUSINESS_NAME: &str = "Goodwill Global Exports";

/// How many consecutive ports to try when the configured one is taken.
pub const PORT_ATTEMPTS: u16 = 10;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "password",
    "xxx",
    "todo",
    "fixme",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` connection URL; `None` selects the in-memory store
    pub database_url: Option<SecretString>,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// First port to try
    pub port: u16,
    /// Outbound email; `None` disables notifications
    pub email: Option<EmailConfig>,
    /// Directory holding the built SPA
    pub static_dir: Option<PathBuf>,
    /// Whether the form endpoints are rate limited per client IP
    pub forms_rate_limit: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g. "production")
    pub sentry_environment: Option<String>,
}

/// SMTP configuration for inquiry notifications.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: SecretString,
    /// Address the notifications are sent from
    pub from_address: String,
    /// Business inbox that receives inquiries
    pub inbox_address: String,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .field("inbox_address", &self.inbox_address)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed or the SMTP password
    /// looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let database_url = env.optional("DATABASE_URL").map(SecretString::from);
        let host = env.parse_or("HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;
        let port = env.parse_or("PORT", 5000_u16)?;
        let email = EmailConfig::from_env(&env)?;
        let static_dir = env.optional("STATIC_DIR").map(PathBuf::from);
        let forms_rate_limit = env.parse_or("FORMS_RATE_LIMIT", true)?;

        Ok(Self {
            database_url,
            host,
            port,
            email,
            static_dir,
            forms_rate_limit,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl EmailConfig {
    fn from_env<F>(env: &Env<F>) -> Result<Option<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (username, password) = match (env.optional("EMAIL_USER"), env.optional("EMAIL_PASS")) {
            (None, None) => return Ok(None),
            (Some(_), None) => return Err(ConfigError::MissingEnvVar("EMAIL_PASS".to_string())),
            (None, Some(_)) => return Err(ConfigError::MissingEnvVar("EMAIL_USER".to_string())),
            (Some(user), Some(pass)) => (user, pass),
        };
        validate_secret_strength(&password, "EMAIL_PASS")?;

        Ok(Some(Self {
            smtp_host: env.or_default("SMTP_HOST", "smtp.gmail.com"),
            smtp_port: env.parse_or("SMTP_PORT", 587_u16)?,
            from_address: env.or_default("EMAIL_FROM", &username),
            inbox_address: env.or_default("EMAIL_TO", &username),
            smtp_username: username,
            smtp_password: SecretString::from(password),
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable source; blank values count as unset.
struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}

/// Validate that a secret is not an obvious placeholder.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_select_memory_store_without_email() {
        let config = load(&[]).unwrap();
        assert!(config.database_url.is_none());
        assert!(config.email.is_none());
        assert!(config.forms_rate_limit);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = load(&[("DATABASE_URL", "  "), ("PORT", "")]).unwrap();
        assert!(config.database_url.is_none());
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "PORT"));
    }

    #[test]
    fn test_email_addresses_default_to_user() {
        let config = load(&[
            ("EMAIL_USER", "sales@goodwill.example.org"),
            ("EMAIL_PASS", "qwkz mfhd tyre uplo"),
        ])
        .unwrap();
        let email = config.email.unwrap();
        assert_eq!(email.smtp_host, "smtp.gmail.com");
        assert_eq!(email.smtp_port, 587);
        assert_eq!(email.from_address, "sales@goodwill.example.org");
        assert_eq!(email.inbox_address, "sales@goodwill.example.org");
    }

    #[test]
    fn test_email_requires_both_credentials() {
        let err = load(&[("EMAIL_USER", "sales@goodwill.io")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "EMAIL_PASS"));
    }

    #[test]
    fn test_placeholder_password_rejected() {
        let err = load(&[
            ("EMAIL_USER", "sales@goodwill.io"),
            ("EMAIL_PASS", "your-app-password"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_forms_rate_limit_toggle() {
        let config = load(&[("FORMS_RATE_LIMIT", "false")]).unwrap();
        assert!(!config.forms_rate_limit);

        let err = load(&[("FORMS_RATE_LIMIT", "sometimes")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_email_config_debug_redacts_password() {
        let config = EmailConfig {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            smtp_username: "sales@goodwill.io".to_string(),
            smtp_password: SecretString::from("super_secret_app_pass"),
            from_address: "sales@goodwill.io".to_string(),
            inbox_address: "owner@goodwill.io".to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("owner@goodwill.io"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_app_pass"));
    }
}
