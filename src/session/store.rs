//! Session store: login, logout, and silent refresh.
//!
//! DESIGN
//! ======
//! State sits in a `tokio::sync::watch` channel. Readers take snapshots or
//! subscribe; writers are limited to the operations below, and each one ends
//! in a single whole-value replacement.
//!
//! Login, register and refresh go straight to the transport with no
//! credential and no recovery stage, so an auth failure there can never
//! recurse into another refresh.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::ClientError;
use crate::forms::Registration;
use crate::http::request::ApiRequest;
use crate::http::transport::{Transport, send_checked};
use crate::types::UserProfile;

use super::state::{AccessToken, Session};

pub const LOGIN_ENDPOINT: &str = "/auth/login";
pub const LOGOUT_ENDPOINT: &str = "/auth/logout";
pub const REFRESH_ENDPOINT: &str = "/auth/refresh";
pub const REGISTER_ENDPOINT: &str = "/auth/register";

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    user: UserProfile,
    #[serde(rename = "accessToken", default)]
    access_token: Option<String>,
}

#[derive(Deserialize)]
struct RefreshResponse {
    #[serde(default)]
    user: Option<UserProfile>,
    #[serde(rename = "accessToken", default)]
    access_token: Option<String>,
    #[serde(rename = "isAuthenticated", default = "default_true")]
    is_authenticated: bool,
}

fn default_true() -> bool {
    true
}

/// Clears `loading` when a status check ends, including when its future is
/// dropped before completion.
struct FinishLoading<'a>(&'a watch::Sender<Session>);

impl Drop for FinishLoading<'_> {
    fn drop(&mut self) {
        self.0.send_if_modified(|s| std::mem::replace(&mut s.loading, false));
    }
}

/// Cloneable handle to the process-wide session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    transport: Arc<dyn Transport>,
    state: watch::Sender<Session>,
}

impl SessionStore {
    /// New store in the `booting` state (`loading = true`).
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let (state, _) = watch::channel(Session::booting());
        Self { inner: Arc::new(StoreInner { transport, state }) }
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// Credential currently held in memory, if any.
    #[must_use]
    pub fn credential(&self) -> Option<AccessToken> {
        self.inner.state.borrow().credential.clone()
    }

    pub(crate) fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.inner.transport)
    }

    /// Single login attempt. On any failure the session is cleared and
    /// `false` is returned.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        match self.authenticate(username, password).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, username, "login failed");
                self.inner.state.send_modify(|s| *s = Session::anonymous(s.loading));
                false
            }
        }
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let request = ApiRequest::post(LOGIN_ENDPOINT).json(&LoginRequest { username, password })?;
        let response = send_checked(self.inner.transport.as_ref(), &request).await?;
        let body: LoginResponse = response.json()?;

        tracing::info!(user_id = body.user.id, "login succeeded");
        let credential = body.access_token.map(AccessToken::new);
        self.inner
            .state
            .send_modify(|s| *s = Session::authenticated(body.user, credential, s.loading));
        Ok(())
    }

    /// Best-effort server logout. Local state is cleared whatever the server
    /// answers, and also if this future is dropped mid-request.
    pub async fn logout(&self) {
        struct ClearOnDrop<'a>(&'a watch::Sender<Session>);
        impl Drop for ClearOnDrop<'_> {
            fn drop(&mut self) {
                self.0.send_modify(|s| *s = Session::anonymous(s.loading));
            }
        }

        let _clear = ClearOnDrop(&self.inner.state);
        let request = match ApiRequest::post(LOGOUT_ENDPOINT).json(&serde_json::json!({})) {
            Ok(request) => request.with_bearer(self.credential()),
            Err(e) => {
                tracing::warn!(error = %e, "logout request build failed");
                return;
            }
        };
        if let Err(e) = send_checked(self.inner.transport.as_ref(), &request).await {
            tracing::warn!(error = %e, "server logout failed; clearing local session anyway");
        }
    }

    /// Silent refresh using only the ambient session cookie.
    ///
    /// Sets `loading` for the duration and always clears it afterwards. The
    /// error is returned for callers that need to react (the HTTP client);
    /// boot-time callers can ignore it since the outcome is also reflected
    /// in the session state.
    ///
    /// # Errors
    ///
    /// Returns the transport, status, or parse error of the refresh call, or
    /// [`ClientError::NotAuthenticated`] if the server reports no session.
    pub async fn check_auth(&self) -> Result<(), ClientError> {
        self.inner.state.send_modify(|s| s.loading = true);
        let _finish = FinishLoading(&self.inner.state);

        match self.refresh().await {
            Ok((user, credential)) => {
                tracing::debug!(user_id = user.id, "session refreshed");
                self.inner.state.send_replace(Session::authenticated(user, credential, false));
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "silent refresh failed");
                self.inner.state.send_replace(Session::anonymous(false));
                Err(e)
            }
        }
    }

    async fn refresh(&self) -> Result<(UserProfile, Option<AccessToken>), ClientError> {
        let request = ApiRequest::get(REFRESH_ENDPOINT);
        let response = send_checked(self.inner.transport.as_ref(), &request).await?;
        let body: RefreshResponse = response.json()?;
        match body.user {
            Some(user) if body.is_authenticated => Ok((user, body.access_token.map(AccessToken::new))),
            _ => Err(ClientError::NotAuthenticated),
        }
    }

    /// Create an account. Does not log in.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error; the server's message is kept in
    /// [`ClientError::Status`] for display.
    pub async fn register(&self, registration: &Registration) -> Result<(), ClientError> {
        let request = ApiRequest::post(REGISTER_ENDPOINT).json(registration)?;
        send_checked(self.inner.transport.as_ref(), &request).await?;
        tracing::info!(username = %registration.username, "registration accepted");
        Ok(())
    }
}
