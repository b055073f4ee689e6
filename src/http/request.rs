//! Owned request/response values and the one-shot retry wrapper.
//!
//! DESIGN
//! ======
//! Requests are plain data so the client can replay one after a refresh
//! without sharing a mutable "already retried" flag between concurrent
//! callers. The flag lives on [`Attempt`], which is moved by value through
//! the pipeline.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::session::AccessToken;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// An outbound API call relative to the configured base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Endpoint path such as `/books/7`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    /// Bearer credential; set by the client pipeline, never by callers.
    pub bearer: Option<AccessToken>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None, bearer: None }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append a query parameter.
    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_owned(), value.to_string()));
        self
    }

    /// Append several query parameters in order.
    #[must_use]
    pub fn query_pairs(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Parse`] if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        let value = serde_json::to_value(body).map_err(|e| ClientError::Parse(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Replace the bearer credential (`None` strips it).
    #[must_use]
    pub fn with_bearer(mut self, bearer: Option<AccessToken>) -> Self {
        self.bearer = bearer;
        self
    }
}

/// Raw response: status plus the undecoded body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Parse`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_str(&self.body).map_err(|e| ClientError::Parse(e.to_string()))
    }
}

/// A request plus its one-shot retry breaker.
#[derive(Clone, Debug, PartialEq)]
pub struct Attempt {
    pub request: ApiRequest,
    pub retried: bool,
}

impl Attempt {
    /// A fresh attempt that may still be recovered once.
    #[must_use]
    pub fn first(request: ApiRequest) -> Self {
        Self { request, retried: false }
    }

    /// Trip the breaker: this attempt may not trigger another refresh.
    #[must_use]
    pub fn into_retry(self) -> Self {
        Self { request: self.request, retried: true }
    }
}
