//! HTTP plumbing for the library API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `request` defines owned, replayable request values, `transport` moves them
//! over the wire, and `client` composes the authenticated pipeline
//! `attach_credential |> send |> recover_once` on top of a transport.

pub mod client;
pub mod request;
pub mod transport;

pub use client::ApiClient;
pub use request::{ApiRequest, ApiResponse, Attempt, Method};
pub use transport::{HttpTransport, Transport};
