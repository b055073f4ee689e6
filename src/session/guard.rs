//! Route guard for protected views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected views must apply identical behavior: placeholder while the
//! session is loading, content once authenticated, `/login` otherwise. The
//! guard owns no state beyond what it reads from the store.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::state::Session;
use super::store::SessionStore;

pub const LOGIN_PATH: &str = "/login";

/// What a protected view should show for a given session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Indeterminate placeholder; never content, never a redirect.
    Loading,
    Render,
    Redirect(&'static str),
}

/// Pure decision for a session snapshot.
#[must_use]
pub fn decide(session: &Session) -> GuardDecision {
    if session.is_loading() {
        GuardDecision::Loading
    } else if session.is_authenticated() {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect(LOGIN_PATH)
    }
}

/// A silent refresh is due when nothing is known and nothing is in flight.
#[must_use]
pub fn should_refresh(session: &Session) -> bool {
    !session.is_authenticated() && !session.is_loading()
}

#[derive(Clone)]
pub struct RouteGuard {
    session: SessionStore,
}

impl RouteGuard {
    #[must_use]
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    /// Decision for the current state, without side effects.
    #[must_use]
    pub fn current(&self) -> GuardDecision {
        decide(&self.session.snapshot())
    }

    /// Mount the guard: trigger a silent refresh if one is due, then wait
    /// until the session settles and return the final decision.
    pub async fn mount(&self) -> GuardDecision {
        if should_refresh(&self.session.snapshot()) {
            // Failure is reflected in the session state as anonymous.
            let _ = self.session.check_auth().await;
        }

        let mut rx = self.session.subscribe();
        match rx.wait_for(|s| !s.is_loading()).await {
            Ok(session) => decide(&session),
            Err(_) => self.current(),
        }
    }
}
