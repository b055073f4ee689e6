//! Client configuration parsed from environment variables.

use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

/// Account used to sign in at startup when no session cookie is live.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("username", &self.username).field("password", &"***").finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root every endpoint path is appended to, without a trailing `/`.
    pub base_url: String,
    pub timeouts: Timeouts,
    /// Rows per page for list fetches.
    pub page_size: u32,
    /// Startup login; only set when both username and password are given.
    pub login: Option<Credentials>,
}

impl ClientConfig {
    /// Config pointing at `base_url` with default timeouts and page size.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ConfigParse`] if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            timeouts: Timeouts::default(),
            page_size: DEFAULT_PAGE_SIZE,
            login: None,
        })
    }

    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `LIBRARY_API_BASE_URL`: default `http://localhost:3000/api`
    /// - `LIBRARY_REQUEST_TIMEOUT_SECS`: default 30
    /// - `LIBRARY_CONNECT_TIMEOUT_SECS`: default 10
    /// - `LIBRARY_PAGE_SIZE`: default 10
    /// - `LIBRARY_USERNAME` and `LIBRARY_PASSWORD`: startup login, unset by default
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ConfigParse`] for an invalid base URL or a zero page size.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ConfigParse`] for an invalid base URL or a zero page size.
    pub fn from_vars<F>(get: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = normalize_base_url(get("LIBRARY_API_BASE_URL").as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let timeouts = Timeouts {
            request_secs: parse_or(get("LIBRARY_REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_or(get("LIBRARY_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let page_size = parse_or(get("LIBRARY_PAGE_SIZE"), DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(ClientError::ConfigParse("LIBRARY_PAGE_SIZE must be at least 1".into()));
        }

        let login = match (get("LIBRARY_USERNAME"), get("LIBRARY_PASSWORD")) {
            (Some(username), Some(password)) if !username.trim().is_empty() && !password.is_empty() => {
                Some(Credentials { username: username.trim().to_owned(), password })
            }
            _ => None,
        };

        Ok(Self { base_url, timeouts, page_size, login })
    }

    /// Absolute URL for an endpoint path such as `/books/7`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

fn parse_or<T>(raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr,
{
    raw.and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}

fn normalize_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    reqwest::Url::parse(trimmed).map_err(|e| ClientError::ConfigParse(format!("invalid base URL '{raw}': {e}")))?;
    Ok(trimmed.to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
