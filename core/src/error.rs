//! Error types for the PAPI client.
//!
//! # Design
//! Callers need to tell four situations apart: the request was never valid,
//! the request never got an answer, the server said no, and the server said
//! yes with a body we cannot read. Each gets its own variant. Non-2xx bodies
//! are parsed into `ProblemDetail` when they look like the vendor's problem
//! JSON; the raw body is kept either way.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http::TransportError;

/// Errors returned by `PapiClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required request field is missing or out of range. Nothing was sent.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// The transport failed before an HTTP status was received.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The call context was cancelled before or during the call.
    #[error("call cancelled")]
    Cancelled,

    /// The call context deadline passed before the response arrived.
    #[error("call deadline exceeded")]
    Timeout,

    /// The server answered with a non-2xx status.
    #[error("API error (HTTP {status}): {}", api_message(.problem, .body))]
    Api {
        status: u16,
        problem: Option<ProblemDetail>,
        body: String,
    },

    /// 2xx status, but the body does not have the expected shape.
    #[error("response decoding failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status for `Api` errors, `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

fn api_message(problem: &Option<ProblemDetail>, body: &str) -> String {
    match problem {
        Some(p) if !p.detail.is_empty() => format!("{}: {}", p.title, p.detail),
        Some(p) => p.title.clone(),
        None => body.to_string(),
    }
}

/// A request field that fails its contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a positive integer, got {value}")]
    NonPositive { field: &'static str, value: i64 },

    #[error("{field} contains characters not allowed in a URL path segment: {value:?}")]
    InvalidPathSegment { field: &'static str, value: String },
}

/// Problem JSON returned by the API on errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetail {
    #[serde(rename = "type", default)]
    pub problem_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub instance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ProblemDetail>,
}

impl ProblemDetail {
    /// Best-effort parse of an error body. Returns `None` for bodies that are
    /// not JSON objects or carry none of `type`, `title`, `detail`.
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str::<ProblemDetail>(body)
            .ok()
            .filter(|p| !(p.problem_type.is_empty() && p.title.is_empty() && p.detail.is_empty()))
    }
}
