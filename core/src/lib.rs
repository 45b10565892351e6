//! Typed client core for the property hostnames endpoint of the PAPI
//! (Property Manager) REST API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values as plain
//! data. The network round-trip goes through an injected `HttpTransport`,
//! so TLS, request signing and connection reuse stay outside this crate and
//! tests can substitute a recording transport.
//!
//! # Design
//! - `PapiClient` is stateless; it holds only `base_url`.
//! - The endpoint is split into `build_*` (request) and `parse_*` (response),
//!   with an async `get_*` that sends exactly once under a `CallContext`.
//! - Errors separate validation, transport, cancellation/timeout, API
//!   rejection and decode failures.

pub mod client;
pub mod context;
pub mod error;
pub mod http;
pub mod types;

pub use client::PapiClient;
pub use context::CallContext;
pub use error::{ApiError, ProblemDetail, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
pub use types::{
    CnameType, GetPropertyHostnamesRequest, GetPropertyHostnamesResponse, HostnameItem,
    HostnameItems,
};
