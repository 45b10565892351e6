//! Request and response types for the property hostnames endpoint.
//!
//! # Design
//! Response types mirror the vendor JSON with camelCase renames. Unknown
//! fields are ignored so new server fields never break decoding. These types
//! are defined independently from the mock server's fixtures; integration
//! tests catch schema drift between the two crates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Parameters for listing the hostnames of one property version.
///
/// The four identifying fields are required. `validate_hostnames` and
/// `include_cert_status` default to `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPropertyHostnamesRequest {
    pub property_id: String,
    pub property_version: i64,
    pub group_id: String,
    pub contract_id: String,
    pub validate_hostnames: bool,
    pub include_cert_status: bool,
}

impl GetPropertyHostnamesRequest {
    pub fn new(
        property_id: impl Into<String>,
        property_version: i64,
        group_id: impl Into<String>,
        contract_id: impl Into<String>,
    ) -> Self {
        Self {
            property_id: property_id.into(),
            property_version,
            group_id: group_id.into(),
            contract_id: contract_id.into(),
            validate_hostnames: false,
            include_cert_status: false,
        }
    }

    /// Ask the server to validate the hostnames while listing them.
    pub fn with_validate_hostnames(mut self, validate: bool) -> Self {
        self.validate_hostnames = validate;
        self
    }

    /// Ask the server to include certificate provisioning status per item.
    pub fn with_cert_status(mut self, include: bool) -> Self {
        self.include_cert_status = include;
        self
    }

    /// Checks the caller contract. Reports the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("propertyId", &self.property_id)?;
        if self.property_id.contains(['/', '?', '#']) || self.property_id.contains(char::is_whitespace) {
            return Err(ValidationError::InvalidPathSegment {
                field: "propertyId",
                value: self.property_id.clone(),
            });
        }
        if self.property_version < 1 {
            return Err(ValidationError::NonPositive {
                field: "propertyVersion",
                value: self.property_version,
            });
        }
        require("groupId", &self.group_id)?;
        require("contractId", &self.contract_id)?;
        Ok(())
    }

    pub(crate) fn path(&self) -> String {
        format!(
            "/papi/v1/properties/{}/versions/{}/hostnames",
            self.property_id, self.property_version
        )
    }

    /// Query pairs in wire order. `includeCertStatus` is only sent when set.
    pub(crate) fn query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("contractId".to_string(), self.contract_id.clone()),
            ("groupId".to_string(), self.group_id.clone()),
            ("validateHostnames".to_string(), self.validate_hostnames.to_string()),
        ];
        if self.include_cert_status {
            query.push(("includeCertStatus".to_string(), "true".to_string()));
        }
        query
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Missing { field });
    }
    Ok(())
}

/// Hostnames of one property version, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPropertyHostnamesResponse {
    pub account_id: String,
    pub contract_id: String,
    pub group_id: String,
    pub property_id: String,
    pub property_version: i64,
    pub etag: String,
    pub hostnames: HostnameItems,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostnameItems {
    pub items: Vec<HostnameItem>,
}

/// One CNAME mapping. Position in `HostnameItems::items` is server order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostnameItem {
    pub cname_type: CnameType,
    pub edge_hostname_id: String,
    pub cname_from: String,
    pub cname_to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_provisioning_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_status: Option<serde_json::Value>,
}

/// Kind of CNAME target. Tags this crate does not know are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CnameType {
    EdgeHostname,
    Other(String),
}

impl CnameType {
    pub fn as_str(&self) -> &str {
        match self {
            CnameType::EdgeHostname => "EDGE_HOSTNAME",
            CnameType::Other(tag) => tag,
        }
    }
}

impl From<String> for CnameType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "EDGE_HOSTNAME" => CnameType::EdgeHostname,
            _ => CnameType::Other(tag),
        }
    }
}

impl From<CnameType> for String {
    fn from(tag: CnameType) -> Self {
        match tag {
            CnameType::EdgeHostname => "EDGE_HOSTNAME".to_string(),
            CnameType::Other(tag) => tag,
        }
    }
}

impl fmt::Display for CnameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
