//! Client core for the library-management web API.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend authenticates with a short-lived bearer credential plus an
//! HTTP-only session cookie used to mint new credentials. This crate owns the
//! client side of that contract:
//!
//! - `session`: the single auth-state store and the route guard.
//! - `http`: the transport and the authenticated request pipeline that
//!   recovers once from an expired credential.
//! - `api`: typed clients for books, copies, loans, locations, majors, users
//!   and the dashboard.
//! - `views` and `forms`: list state and client-side validation for the
//!   administrative screens.

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod http;
pub mod session;
pub mod types;
pub mod views;

#[cfg(test)]
pub mod test_helpers;

pub use config::ClientConfig;
pub use error::ClientError;
pub use http::{ApiClient, HttpTransport};
pub use session::{RouteGuard, SessionStore};
