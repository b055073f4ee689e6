//! Auth-session state and the route guard built on it.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionStore` is the single owner of authentication state. The HTTP
//! client reads its credential and calls `check_auth` to recover from an
//! expired one; `RouteGuard` reads it to decide between placeholder, content,
//! and the login redirect.

pub mod guard;
pub mod state;
pub mod store;

pub use guard::{GuardDecision, LOGIN_PATH, RouteGuard};
pub use state::{AccessToken, Session, SessionStatus};
pub use store::SessionStore;
