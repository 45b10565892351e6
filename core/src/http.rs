//! HTTP transport types and the transport seam.
//!
//! # Design
//! Requests and responses are plain data. `PapiClient` builds an
//! `HttpRequest`, hands it to an injected `HttpTransport`, and parses the
//! `HttpResponse` that comes back. TLS, request signing, retries and
//! connection reuse all belong to the transport implementation; the client
//! never sees them.

use async_trait::async_trait;
use thiserror::Error;
use url::form_urlencoded;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `path` is absolute (base URL included). Query pairs are kept separately,
/// in the order they must appear on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Form-encoded query string, pairs in insertion order. Empty when there
    /// are no pairs.
    pub fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.query {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Full request target: `path` followed by `?query` when a query exists.
    pub fn url(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        format!("{}?{}", self.path, self.query_string())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network-level failure reported by a transport: the request never produced
/// an HTTP status.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Executes one HTTP round-trip.
///
/// Implementations must not retry on their own behalf when used with
/// `PapiClient`: each call to `send` is expected to put at most one request
/// on the wire. Implementations are shared across concurrent calls and are
/// responsible for keeping request/response pairs matched.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(query: Vec<(&str, &str)>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: "https://papi.test/papi/v1/things".to_string(),
            query: query
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn url_without_query_is_path() {
        assert_eq!(request(vec![]).url(), "https://papi.test/papi/v1/things");
    }

    #[test]
    fn query_keeps_insertion_order() {
        let req = request(vec![("zeta", "1"), ("alpha", "2"), ("mid", "3")]);
        assert_eq!(req.query_string(), "zeta=1&alpha=2&mid=3");
    }

    #[test]
    fn query_values_are_form_encoded() {
        let req = request(vec![("contractId", "ctr 1&2")]);
        assert_eq!(req.url(), "https://papi.test/papi/v1/things?contractId=ctr+1%262");
    }

    #[test]
    fn success_range_is_2xx() {
        let mut resp = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(resp.is_success());
        resp.status = 204;
        assert!(resp.is_success());
        resp.status = 304;
        assert!(!resp.is_success());
        resp.status = 199;
        assert!(!resp.is_success());
    }

    #[test]
    fn transport_error_exposes_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = TransportError::with_source("connect failed", io);
        assert_eq!(err.to_string(), "connect failed");
        assert!(std::error::Error::source(&err).is_some());
        assert!(std::error::Error::source(&TransportError::new("x")).is_none());
    }
}
