//! Wire transport over `reqwest`.
//!
//! The transport knows nothing about sessions: it sends exactly the request it
//! is given and reports the raw status. The HTTP-only session cookie lives in
//! the reqwest cookie jar and is never visible to library code.

use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::ClientError;

use super::request::{ApiRequest, ApiResponse, Method};

/// Moves one request over the wire.
///
/// Implementations must return `Ok` for every HTTP status, including errors;
/// only failures that produced no response are `Err`.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError>;
}

/// Send and turn any non-2xx status into [`ClientError::Status`].
pub(crate) async fn send_checked(transport: &dyn Transport, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
    let response = transport.send(request).await?;
    if response.is_success() {
        Ok(response)
    } else {
        Err(ClientError::from_response(response.status, &response.body))
    }
}

// =============================================================================
// REQWEST TRANSPORT
// =============================================================================

pub struct HttpTransport {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns [`ClientError::HttpClientBuild`] if the reqwest client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .cookie_store(true)
            .build()
            .map_err(|e| ClientError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = self.config.endpoint(&request.path);
        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
            Method::Delete => self.http.delete(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token.expose());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| ClientError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ClientError::Request(e.to_string()))?;

        tracing::debug!(method = ?request.method, path = %request.path, status, "api response");
        Ok(ApiResponse { status, body })
    }
}
