// SPDX-License-Identifier: MPL-2.0
//! Session gateway port definition.
//!
//! This module defines the [`SessionGateway`] trait: authentication plus
//! persistence of viewer snapshots against a remote backend.
//!
//! # Design Notes
//!
//! - Operations return boxed `'static` futures so the app can hand them to
//!   `Task::perform` without borrowing the gateway
//! - Session changes are pushed to listeners; the editor keeps only a
//!   signed-in flag
//! - An unconfigured backend is a normal variant, not a startup failure

use crate::config::BackendConfig;
use crate::domain::session::{SessionChange, ViewerSnapshot};
use futures_util::future::BoxFuture;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use thiserror::Error;

// =============================================================================
// GatewayError
// =============================================================================

/// Errors returned by session gateway operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Backend credentials are absent; every call fails fast.
    #[error("backend is not configured")]
    Configuration,

    /// Login or logout was rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Save was rejected (no session, or backend failure).
    #[error("persistence failed: {0}")]
    Persistence(String),
}

// =============================================================================
// GatewayConfig
// =============================================================================

/// Credentials for a configured backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendCredentials {
    pub url: String,
    pub anon_key: String,
    pub oauth_provider: String,
    pub redirect_port: u16,
}

/// Which gateway variant to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayConfig {
    Configured(BackendCredentials),
    Unconfigured,
}

impl GatewayConfig {
    /// Picks the variant from the backend settings.
    ///
    /// A missing or blank URL or anon key yields [`GatewayConfig::Unconfigured`].
    #[must_use]
    pub fn resolve(backend: &BackendConfig) -> Self {
        let url = backend
            .url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());
        let anon_key = backend
            .anon_key
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match (url, anon_key) {
            (Some(url), Some(anon_key)) => GatewayConfig::Configured(BackendCredentials {
                url: url.trim_end_matches('/').to_owned(),
                anon_key: anon_key.to_owned(),
                oauth_provider: backend.oauth_provider.clone(),
                redirect_port: backend.redirect_port,
            }),
            _ => {
                tracing::warn!(
                    has_url = url.is_some(),
                    has_anon_key = anon_key.is_some(),
                    "backend credentials missing, sign-in and save are disabled"
                );
                GatewayConfig::Unconfigured
            }
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        matches!(self, GatewayConfig::Configured(_))
    }
}

// =============================================================================
// Listeners
// =============================================================================

/// Callback invoked on every session change.
pub type SessionListener = Arc<dyn Fn(SessionChange) + Send + Sync>;

type ListenerMap = Mutex<HashMap<u64, SessionListener>>;

fn lock(map: &ListenerMap) -> MutexGuard<'_, HashMap<u64, SessionListener>> {
    map.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Set of session listeners shared by a gateway and its handles.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Arc<ListenerMap>,
    next_id: AtomicU64,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a listener; it stays registered until the handle is dropped.
    pub fn register(&self, listener: SessionListener) -> SubscriptionHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.listeners).insert(id, listener);
        SubscriptionHandle {
            registration: Some((Arc::downgrade(&self.listeners), id)),
        }
    }

    /// Calls every registered listener with `change`.
    pub fn notify(&self, change: &SessionChange) {
        // Snapshot first so a listener may unsubscribe while being called.
        let listeners: Vec<SessionListener> = lock(&self.listeners).values().cloned().collect();
        for listener in listeners {
            listener(change.clone());
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.listeners).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keeps a listener registered. Unsubscribes on [`unsubscribe`] or drop.
///
/// [`unsubscribe`]: SubscriptionHandle::unsubscribe
#[must_use = "dropping the handle unsubscribes the listener"]
pub struct SubscriptionHandle {
    registration: Option<(Weak<ListenerMap>, u64)>,
}

impl SubscriptionHandle {
    /// A handle with nothing behind it.
    pub fn inert() -> Self {
        Self { registration: None }
    }

    pub fn unsubscribe(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some((listeners, id)) = self.registration.take() {
            if let Some(listeners) = listeners.upgrade() {
                lock(&listeners).remove(&id);
            }
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("active", &self.registration.is_some())
            .finish()
    }
}

// =============================================================================
// SessionGateway
// =============================================================================

/// Authentication and persistence against the backend.
pub trait SessionGateway: Send + Sync {
    /// Starts an interactive sign-in.
    ///
    /// Resolves once the flow is under way; the signed-in state arrives
    /// later through the listeners.
    fn login(&self) -> BoxFuture<'static, Result<(), GatewayError>>;

    /// Ends the current session. Succeeds when there is none.
    fn logout(&self) -> BoxFuture<'static, Result<(), GatewayError>>;

    /// Stores `snapshot` for the signed-in user.
    fn save(&self, snapshot: ViewerSnapshot) -> BoxFuture<'static, Result<(), GatewayError>>;

    /// Registers `listener` for session changes.
    fn subscribe(&self, listener: SessionListener) -> SubscriptionHandle;

    /// Whether backend credentials are present.
    fn is_configured(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::SessionIdentity;
    use std::sync::atomic::AtomicUsize;

    fn backend(url: Option<&str>, anon_key: Option<&str>) -> BackendConfig {
        BackendConfig {
            url: url.map(str::to_owned),
            anon_key: anon_key.map(str::to_owned),
            ..BackendConfig::default()
        }
    }

    #[test]
    fn resolve_with_credentials_is_configured() {
        let config = GatewayConfig::resolve(&backend(
            Some("https://project.supabase.co/"),
            Some("anon"),
        ));
        match config {
            GatewayConfig::Configured(credentials) => {
                assert_eq!(credentials.url, "https://project.supabase.co");
                assert_eq!(credentials.anon_key, "anon");
                assert_eq!(credentials.oauth_provider, "google");
            }
            GatewayConfig::Unconfigured => panic!("expected configured gateway"),
        }
    }

    #[test]
    fn resolve_missing_or_blank_values_is_unconfigured() {
        assert!(!GatewayConfig::resolve(&backend(None, Some("anon"))).is_configured());
        assert!(!GatewayConfig::resolve(&backend(Some("https://x"), None)).is_configured());
        assert!(!GatewayConfig::resolve(&backend(Some("  "), Some("anon"))).is_configured());
        assert!(!GatewayConfig::resolve(&backend(None, None)).is_configured());
    }

    #[test]
    fn registry_notifies_until_handle_dropped() {
        let registry = ListenerRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let handle = registry.register(Arc::new(move |_: SessionChange| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        registry.notify(&SessionChange::new(None));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        drop(handle);
        registry.notify(&SessionChange::new(None));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn explicit_unsubscribe_removes_listener() {
        let registry = ListenerRegistry::new();
        let handle = registry.register(Arc::new(|_: SessionChange| {}));
        assert_eq!(registry.len(), 1);
        handle.unsubscribe();
        assert!(registry.is_empty());
    }

    #[test]
    fn listeners_receive_identity() {
        let registry = ListenerRegistry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _handle = registry.register(Arc::new(move |change: SessionChange| {
            lock_vec(&sink).push(change.signed_in());
        }));

        registry.notify(&SessionChange::new(Some(SessionIdentity::new(
            "u".into(),
            None,
            "t".into(),
        ))));
        registry.notify(&SessionChange::new(None));

        assert_eq!(*lock_vec(&seen), vec![true, false]);
    }

    fn lock_vec(m: &Mutex<Vec<bool>>) -> MutexGuard<'_, Vec<bool>> {
        m.lock().expect("lock")
    }

    #[test]
    fn handle_outliving_registry_is_harmless() {
        let registry = ListenerRegistry::new();
        let handle = registry.register(Arc::new(|_: SessionChange| {}));
        drop(registry);
        handle.unsubscribe();
    }

    #[test]
    fn inert_handle_does_nothing() {
        let handle = SubscriptionHandle::inert();
        assert!(format!("{handle:?}").contains("false"));
        handle.unsubscribe();
    }
}
