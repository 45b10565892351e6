//! Stateless request builder and response parser for the PAPI hostnames
//! endpoint.
//!
//! # Design
//! `PapiClient` holds only a `base_url` and carries no mutable state between
//! calls. The endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`, so
//! both halves stay deterministic and testable without I/O. The async
//! `get_*` method glues them to an injected `HttpTransport` under a
//! `CallContext`, sending exactly one request and never retrying.

use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::context::CallContext;
use crate::error::{ApiError, ProblemDetail};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::types::{GetPropertyHostnamesRequest, GetPropertyHostnamesResponse};

/// Client for the property hostnames endpoint of the PAPI REST API.
#[derive(Debug, Clone)]
pub struct PapiClient {
    base_url: String,
}

impl PapiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Validates `params` and builds the GET request for its hostnames.
    pub fn build_get_property_hostnames(
        &self,
        params: &GetPropertyHostnamesRequest,
    ) -> Result<HttpRequest, ApiError> {
        params.validate()?;
        Ok(HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{}", self.base_url, params.path()),
            query: params.query(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
            body: None,
        })
    }

    pub fn parse_get_property_hostnames(
        &self,
        response: HttpResponse,
    ) -> Result<GetPropertyHostnamesResponse, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// Lists the hostnames of one property version.
    ///
    /// Nothing is sent if `params` is invalid or `ctx` is already cancelled.
    /// Cancellation or deadline expiry while the request is in flight drops
    /// the transport future and returns immediately.
    pub async fn get_property_hostnames<T>(
        &self,
        ctx: &CallContext,
        transport: &T,
        params: &GetPropertyHostnamesRequest,
    ) -> Result<GetPropertyHostnamesResponse, ApiError>
    where
        T: HttpTransport + ?Sized,
    {
        let request = self.build_get_property_hostnames(params)?;
        ctx.check()?;

        debug!(method = request.method.as_str(), url = %request.url(), "sending request");
        let response = ctx.run(transport.send(request)).await??;
        debug!(status = response.status, "received response");
        trace!(body = %response.body, "response body");

        self.parse_get_property_hostnames(response)
    }
}

/// Map non-2xx responses to `ApiError::Api`, keeping the raw body.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Api {
        status: response.status,
        problem: ProblemDetail::from_body(&response.body),
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::types::CnameType;

    const BASE_URL: &str = "https://akab-test.luna.akamaiapis.net";

    fn client() -> PapiClient {
        PapiClient::new(BASE_URL)
    }

    fn params() -> GetPropertyHostnamesRequest {
        GetPropertyHostnamesRequest::new("prp_175780", 3, "grp_15225", "ctr_1-1TJZH5")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_produces_exact_url() {
        let req = client().build_get_property_hostnames(&params()).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url(),
            format!(
                "{BASE_URL}/papi/v1/properties/prp_175780/versions/3/hostnames\
                 ?contractId=ctr_1-1TJZH5&groupId=grp_15225&validateHostnames=false"
            )
        );
        assert!(req.body.is_none());
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn build_rejects_invalid_params() {
        let mut bad = params();
        bad.contract_id = String::new();
        let err = client().build_get_property_hostnames(&bad).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::Missing { field: "contractId" })
        ));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = PapiClient::new("https://papi.test/");
        let req = client.build_get_property_hostnames(&params()).unwrap();
        assert_eq!(
            req.path,
            "https://papi.test/papi/v1/properties/prp_175780/versions/3/hostnames"
        );
    }

    #[test]
    fn parse_ignores_unknown_fields() {
        let body = r#"{
            "accountId": "act_1", "contractId": "ctr_1", "groupId": "grp_1",
            "propertyId": "prp_1", "propertyVersion": 1, "etag": "e1",
            "propertyName": "www.example.com",
            "hostnames": {"items": [
                {"cnameType": "EDGE_HOSTNAME", "edgeHostnameId": "ehn_1",
                 "cnameFrom": "a.com", "cnameTo": "a.com.edgesuite.net", "extra": true}
            ], "totalItems": 1}
        }"#;
        let parsed = client().parse_get_property_hostnames(response(200, body)).unwrap();
        assert_eq!(parsed.hostnames.items.len(), 1);
        assert_eq!(parsed.hostnames.items[0].cname_type, CnameType::EdgeHostname);
    }

    #[test]
    fn parse_truncated_body_is_decode_error() {
        let err = client()
            .parse_get_property_hostnames(response(200, r#"{"accountId": "act_1", "hostn"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn parse_wrong_type_is_decode_error() {
        let body = r#"{"accountId":"a","contractId":"c","groupId":"g","propertyId":"p",
                       "propertyVersion":"three","etag":"e","hostnames":{"items":[]}}"#;
        let err = client().parse_get_property_hostnames(response(200, body)).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn parse_non_2xx_is_api_error() {
        let body = r#"{"type":"/papi/v1/errors/not-found","title":"Not Found","status":404}"#;
        let err = client().parse_get_property_hostnames(response(404, body)).unwrap_err();
        match err {
            ApiError::Api { status, problem, body: raw } => {
                assert_eq!(status, 404);
                assert_eq!(problem.unwrap().title, "Not Found");
                assert_eq!(raw, body);
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn parse_non_2xx_with_plain_body() {
        let err = client()
            .parse_get_property_hostnames(response(503, "upstream unavailable"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Api { status: 503, problem: None, .. }));
    }
}
