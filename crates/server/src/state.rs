//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::notifications::Notifier;
use crate::storage::AnyStorage;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the storage backend, outbound notifications, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    storage: AnyStorage,
    notifier: Notifier,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The notifier is built from `config.email`; without it, form
    /// notifications are dropped with a warning.
    #[must_use]
    pub fn new(config: ServerConfig, storage: AnyStorage) -> Self {
        let notifier = Notifier::from_config(config.email.as_ref());
        Self::with_notifier(config, storage, notifier)
    }

    /// Create application state with an explicit notifier.
    #[must_use]
    pub fn with_notifier(config: ServerConfig, storage: AnyStorage, notifier: Notifier) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                storage,
                notifier,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the active storage backend.
    #[must_use]
    pub fn storage(&self) -> &AnyStorage {
        &self.inner.storage
    }

    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }
}
