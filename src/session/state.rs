//! Session snapshot and credential types.

use std::fmt;

use crate::types::UserProfile;

/// Short-lived bearer credential held only in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw token text, for the `Authorization` header only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Coarse authentication state derived from a [`Session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    /// A login or refresh is in flight (`loading = true`).
    Unknown,
    Authenticated,
    Anonymous,
}

/// Authentication state for the current user.
///
/// Fields are only written by [`SessionStore`](super::SessionStore)
/// operations; every transition replaces the whole value, so `authenticated`
/// never holds without a `user`.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub(super) user: Option<UserProfile>,
    pub(super) credential: Option<AccessToken>,
    pub(super) authenticated: bool,
    pub(super) loading: bool,
}

impl Session {
    /// Process-start state: nothing known yet, status check pending.
    #[must_use]
    pub fn booting() -> Self {
        Self { user: None, credential: None, authenticated: false, loading: true }
    }

    pub(super) fn authenticated(user: UserProfile, credential: Option<AccessToken>, loading: bool) -> Self {
        Self { user: Some(user), credential, authenticated: true, loading }
    }

    pub(super) fn anonymous(loading: bool) -> Self {
        Self { user: None, credential: None, authenticated: false, loading }
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn credential(&self) -> Option<&AccessToken> {
        self.credential.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        if self.loading {
            SessionStatus::Unknown
        } else if self.authenticated {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Anonymous
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::booting()
    }
}
