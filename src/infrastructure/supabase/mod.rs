// SPDX-License-Identifier: MPL-2.0
//! Supabase-backed [`SessionGateway`].
//!
//! Sign-in uses the OAuth PKCE flow: the system browser opens the provider
//! page and redirects back to a loopback listener owned by this process.
//! Saved viewers go to the `saved_images` table through the REST API.

pub mod auth;
pub mod callback;
pub mod pkce;
pub mod rest;

use crate::application::port::{
    BackendCredentials, GatewayError, ListenerRegistry, SessionGateway, SessionListener,
    SubscriptionHandle,
};
use crate::domain::session::{SessionChange, SessionIdentity, ViewerSnapshot};
use crate::infrastructure::browser;
use futures_util::future::BoxFuture;
use futures_util::FutureExt as _;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// How long the loopback listener waits for the browser redirect.
pub const LOGIN_TIMEOUT: Duration = Duration::from_secs(300);

const USER_AGENT: &str = concat!("Zoomify/", env!("CARGO_PKG_VERSION"));

struct Inner {
    credentials: BackendCredentials,
    client: reqwest::Client,
    session: Mutex<Option<SessionIdentity>>,
    listeners: ListenerRegistry,
    pending_login: Mutex<Option<JoinHandle<()>>>,
}

impl Inner {
    fn session(&self) -> MutexGuard<'_, Option<SessionIdentity>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_identity(&self) -> Option<SessionIdentity> {
        self.session().clone()
    }

    fn set_session(&self, identity: Option<SessionIdentity>) {
        *self.session() = identity.clone();
        self.listeners.notify(&SessionChange::new(identity));
    }

    /// Stops a sign-in still waiting for its redirect and frees its port.
    async fn cancel_pending_login(&self) {
        let pending = self
            .pending_login
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = pending {
            task.abort();
            let _ = task.await;
            tracing::debug!("previous sign-in attempt cancelled");
        }
    }

    fn track_login(&self, task: JoinHandle<()>) {
        *self
            .pending_login
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(task);
    }
}

/// Gateway talking to a configured Supabase project.
pub struct SupabaseGateway {
    inner: Arc<Inner>,
}

impl SupabaseGateway {
    /// Builds the gateway and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] if the HTTP client cannot be
    /// created.
    pub fn new(credentials: BackendCredentials) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                tracing::error!(%e, "failed to build HTTP client");
                GatewayError::Configuration
            })?;

        Ok(Self {
            inner: Arc::new(Inner {
                credentials,
                client,
                session: Mutex::new(None),
                listeners: ListenerRegistry::new(),
                pending_login: Mutex::new(None),
            }),
        })
    }

    /// Whether a user is currently signed in.
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.inner.session().is_some()
    }
}

/// Waits for the redirect, exchanges the code and answers the browser.
async fn complete_login(
    inner: &Inner,
    listener: TcpListener,
    verifier: String,
) -> Result<SessionIdentity, GatewayError> {
    let (mut stream, redirect) = tokio::time::timeout(
        LOGIN_TIMEOUT,
        callback::wait_for_redirect(&listener),
    )
    .await
    .map_err(|_| GatewayError::Auth("timed out waiting for the browser".into()))??;

    let result = match redirect {
        Ok(code) => auth::exchange_code(&inner.client, &inner.credentials, &code, &verifier).await,
        Err(reason) => Err(GatewayError::Auth(reason)),
    };
    callback::respond(&mut stream, result.is_ok()).await;
    result
}

/// Background half of sign-in; the outcome reaches the session listeners.
async fn finish_login(inner: Arc<Inner>, listener: TcpListener, verifier: String) {
    match complete_login(&inner, listener, verifier).await {
        Ok(identity) => {
            tracing::info!(user_id = identity.user_id(), "signed in");
            inner.set_session(Some(identity));
        }
        Err(err) => {
            tracing::warn!(%err, "sign-in did not complete");
            let reason = match err {
                GatewayError::Auth(reason) | GatewayError::Persistence(reason) => reason,
                GatewayError::Configuration => GatewayError::Configuration.to_string(),
            };
            inner
                .listeners
                .notify(&SessionChange::login_failed(inner.current_identity(), reason));
        }
    }
}

impl SessionGateway for SupabaseGateway {
    fn login(&self) -> BoxFuture<'static, Result<(), GatewayError>> {
        let inner = Arc::clone(&self.inner);
        async move {
            inner.cancel_pending_login().await;
            let pair = pkce::generate()?;
            let port = inner.credentials.redirect_port;
            let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, port))
                .await
                .map_err(|e| GatewayError::Auth(format!("cannot listen on port {port}: {e}")))?;

            let url = auth::authorize_url(&inner.credentials, &pair.challenge)?;
            browser::open(url.as_str())
                .map_err(|e| GatewayError::Auth(format!("cannot open browser: {e}")))?;
            tracing::info!(
                provider = %inner.credentials.oauth_provider,
                port,
                "waiting for OAuth redirect"
            );

            let task = tokio::spawn(finish_login(Arc::clone(&inner), listener, pair.verifier));
            inner.track_login(task);
            Ok(())
        }
        .boxed()
    }

    fn logout(&self) -> BoxFuture<'static, Result<(), GatewayError>> {
        let inner = Arc::clone(&self.inner);
        async move {
            let Some(identity) = inner.current_identity() else {
                inner.set_session(None);
                return Ok(());
            };
            auth::logout(&inner.client, &inner.credentials, identity.access_token()).await?;
            tracing::info!(user_id = identity.user_id(), "signed out");
            inner.set_session(None);
            Ok(())
        }
        .boxed()
    }

    fn save(&self, snapshot: ViewerSnapshot) -> BoxFuture<'static, Result<(), GatewayError>> {
        let inner = Arc::clone(&self.inner);
        async move {
            let identity = inner
                .current_identity()
                .ok_or_else(|| GatewayError::Persistence("no active session".into()))?;
            let record = snapshot.into_record(identity.user_id());
            rest::insert_saved_image(
                &inner.client,
                &inner.credentials,
                identity.access_token(),
                &record,
            )
            .await?;
            tracing::info!(
                user_id = identity.user_id(),
                scale = record.scale,
                enhancement_level = record.enhancement_level,
                "viewer saved"
            );
            Ok(())
        }
        .boxed()
    }

    fn subscribe(&self, listener: SessionListener) -> SubscriptionHandle {
        self.inner.listeners.register(listener)
    }

    fn is_configured(&self) -> bool {
        true
    }
}
