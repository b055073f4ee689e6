//! Client error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Only authentication-class failures (`401`/`403`) are interpreted by the
//! client pipeline. Everything else travels back to the caller unchanged so
//! the acting form can render its own inline message.

use serde::Deserialize;

/// Errors produced by configuration, transport, and API operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (connect, timeout, TLS...).
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("response error: status {status}")]
    Status { status: u16, message: Option<String> },

    /// The response body could not be deserialized.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The refresh endpoint answered but reported no live session.
    #[error("session not authenticated")]
    NotAuthenticated,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ClientError {
    /// Build a [`ClientError::Status`] from a raw response, lifting the
    /// server's `{ "message": ... }` payload when present.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty());
        Self::Status { status, message }
    }

    /// HTTP status carried by this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` for "unauthorized" and "forbidden" responses.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Text suitable for an inline error next to the acting form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message: Some(message), .. } => message.clone(),
            Self::Status { status, message: None } => format!("request failed with status {status}"),
            Self::Request(_) => "could not reach the server; check your connection".to_owned(),
            _ => "an unexpected error occurred; please try again".to_owned(),
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
