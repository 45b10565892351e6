//! In-memory stand-in for the PAPI property hostnames endpoint.
//!
//! Serves fixtures keyed by property id and version, enforces the
//! `contractId`/`groupId` query parameters the real API requires, and answers
//! errors with problem JSON.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hostname {
    pub cname_type: String,
    pub edge_hostname_id: String,
    pub cname_from: String,
    pub cname_to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_provisioning_type: Option<String>,
}

#[derive(Clone, Debug)]
pub struct PropertyVersion {
    pub account_id: String,
    pub contract_id: String,
    pub group_id: String,
    pub property_id: String,
    pub property_version: i64,
    pub etag: String,
    pub hostnames: Vec<Hostname>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HostnameList {
    pub items: Vec<Hostname>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostnamesBody {
    pub account_id: String,
    pub contract_id: String,
    pub group_id: String,
    pub property_id: String,
    pub property_version: i64,
    pub etag: String,
    pub hostnames: HostnameList,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub detail: String,
    pub instance: String,
    pub status: u16,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostnamesQuery {
    pub contract_id: Option<String>,
    pub group_id: Option<String>,
    #[serde(default)]
    pub validate_hostnames: bool,
    #[serde(default)]
    pub include_cert_status: bool,
}

pub type Db = Arc<RwLock<HashMap<(String, i64), PropertyVersion>>>;

/// The property version used throughout the vendor documentation.
pub fn sample_property() -> PropertyVersion {
    PropertyVersion {
        account_id: "act_1-1TJZFB".to_string(),
        contract_id: "ctr_1-1TJZH5".to_string(),
        group_id: "grp_15225".to_string(),
        property_id: "prp_175780".to_string(),
        property_version: 3,
        etag: "6aed418629b4e5c0".to_string(),
        hostnames: vec![
            Hostname {
                cname_type: "EDGE_HOSTNAME".to_string(),
                edge_hostname_id: "ehn_895822".to_string(),
                cname_from: "example.com".to_string(),
                cname_to: "example.com.edgesuite.net".to_string(),
                cert_provisioning_type: Some("CPS_MANAGED".to_string()),
            },
            Hostname {
                cname_type: "EDGE_HOSTNAME".to_string(),
                edge_hostname_id: "ehn_895833".to_string(),
                cname_from: "m.example.com".to_string(),
                cname_to: "m.example.com.edgesuite.net".to_string(),
                cert_provisioning_type: Some("DEFAULT".to_string()),
            },
        ],
    }
}

/// Router seeded with `sample_property`.
pub fn app() -> Router {
    app_with(vec![sample_property()])
}

pub fn app_with(properties: Vec<PropertyVersion>) -> Router {
    let db: Db = Arc::new(RwLock::new(
        properties
            .into_iter()
            .map(|p| ((p.property_id.clone(), p.property_version), p))
            .collect(),
    ));
    Router::new()
        .route(
            "/papi/v1/properties/{property_id}/versions/{version}/hostnames",
            get(get_hostnames),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type ProblemResponse = (StatusCode, Json<Problem>);

fn problem(status: StatusCode, instance: &str, detail: impl Into<String>) -> ProblemResponse {
    let title = status.canonical_reason().unwrap_or("Error").to_string();
    let slug = title.to_lowercase().replace(' ', "-");
    (
        status,
        Json(Problem {
            problem_type: format!("https://problems.papi.test/papi/v0/{slug}"),
            title,
            detail: detail.into(),
            instance: instance.to_string(),
            status: status.as_u16(),
        }),
    )
}

async fn get_hostnames(
    State(db): State<Db>,
    Path((property_id, version)): Path<(String, i64)>,
    Query(query): Query<HostnamesQuery>,
) -> Result<Json<HostnamesBody>, ProblemResponse> {
    let instance = format!("/papi/v1/properties/{property_id}/versions/{version}/hostnames");
    let (Some(contract_id), Some(group_id)) = (query.contract_id, query.group_id) else {
        return Err(problem(
            StatusCode::BAD_REQUEST,
            &instance,
            "contractId and groupId are required",
        ));
    };

    let properties = db.read().await;
    let property = properties
        .get(&(property_id.clone(), version))
        .ok_or_else(|| {
            problem(
                StatusCode::NOT_FOUND,
                &instance,
                format!("No version {version} of property {property_id}"),
            )
        })?;

    if property.contract_id != contract_id || property.group_id != group_id {
        return Err(problem(
            StatusCode::FORBIDDEN,
            &instance,
            "You don't have access to this property in the given contract and group",
        ));
    }

    tracing::debug!(%property_id, version, validate = query.validate_hostnames, "serving hostnames");

    let items = property
        .hostnames
        .iter()
        .cloned()
        .map(|mut hostname| {
            if !query.include_cert_status {
                hostname.cert_provisioning_type = None;
            }
            hostname
        })
        .collect();

    Ok(Json(HostnamesBody {
        account_id: property.account_id.clone(),
        contract_id: property.contract_id.clone(),
        group_id: property.group_id.clone(),
        property_id: property.property_id.clone(),
        property_version: property.property_version,
        etag: property.etag.clone(),
        hostnames: HostnameList { items },
    }))
}
