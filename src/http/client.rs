//! Authenticated API client.
//!
//! DESIGN
//! ======
//! Every call runs the same explicit pipeline:
//!
//! ```text
//! dispatch(attempt) = attach_credential(attempt) |> send |> recover_once
//! ```
//!
//! `recover_once` only looks at `401`/`403`. For a first attempt it awaits a
//! silent refresh and replays the request with the new credential; the replay
//! is sent directly, so whatever it returns goes back to the caller as-is.
//! Every other error passes through.
//!
//! TRADE-OFFS
//! ==========
//! Concurrent calls that fail together each run their own refresh. That
//! bounds the work to one refresh per failing request without shared
//! in-flight state.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::session::SessionStore;

use super::request::{ApiRequest, ApiResponse, Attempt};
use super::transport::{Transport, send_checked};

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: SessionStore,
}

impl ApiClient {
    /// Client sharing the session store's transport (and its cookie jar).
    #[must_use]
    pub fn new(session: SessionStore) -> Self {
        Self { transport: session.transport(), session }
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Send a fresh request through the full pipeline.
    ///
    /// # Errors
    ///
    /// Returns the non-auth error unchanged, the refresh error if recovery
    /// failed, or the auth error itself if no credential could be obtained.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.dispatch(Attempt::first(request)).await
    }

    /// Run one attempt through the pipeline, honouring its retry breaker.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]. An attempt that is already a retry is never
    /// recovered.
    pub async fn dispatch(&self, attempt: Attempt) -> Result<ApiResponse, ClientError> {
        let attempt = self.attach_credential(attempt);
        let err = match send_checked(self.transport.as_ref(), &attempt.request).await {
            Ok(response) => return Ok(response),
            Err(err) => err,
        };

        if !err.is_auth_failure() {
            return Err(err);
        }
        if attempt.retried {
            tracing::debug!(path = %attempt.request.path, error = %err, "auth failure on replay; giving up");
            return Err(err);
        }
        self.recover_once(attempt.into_retry(), err).await
    }

    /// GET/POST/... and decode the JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`], plus [`ClientError::Parse`] for a body that
    /// does not match `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        self.send(request).await?.json()
    }

    /// Send a request whose response body is irrelevant.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn execute(&self, request: ApiRequest) -> Result<(), ClientError> {
        self.send(request).await.map(|_| ())
    }

    fn attach_credential(&self, attempt: Attempt) -> Attempt {
        let Attempt { request, retried } = attempt;
        Attempt { request: request.with_bearer(self.session.credential()), retried }
    }

    async fn recover_once(&self, attempt: Attempt, original: ClientError) -> Result<ApiResponse, ClientError> {
        tracing::debug!(path = %attempt.request.path, error = %original, "auth failure; refreshing session");

        if let Err(refresh_err) = self.session.check_auth().await {
            tracing::warn!(error = %refresh_err, "session refresh failed; logging out");
            self.session.logout().await;
            return Err(refresh_err);
        }

        if self.session.credential().is_none() {
            tracing::debug!(path = %attempt.request.path, "refresh yielded no credential; not replaying");
            return Err(original);
        }

        // The attempt is marked as a retry, so a second auth failure ends here.
        let attempt = self.attach_credential(attempt);
        let result = send_checked(self.transport.as_ref(), &attempt.request).await;
        if let Err(err) = &result {
            tracing::debug!(path = %attempt.request.path, error = %err, "replay failed");
        }
        result
    }
}
