//! HTTP client for the permission backend's batch authorize endpoint.

use crate::config::Config;
use crate::error::PermissionError;
use crate::interfaces::DiscoveryApi;
use crate::types::{AuthorizeDecision, AuthorizeQuery, AuthorizeResult, Credentials, Permission};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

const PERMISSION_PLUGIN_ID: &str = "permission";

#[derive(Debug, Serialize)]
struct AuthorizeRequest<'a> {
    items: Vec<IdentifiedQuery<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IdentifiedQuery<'a> {
    id: String,
    permission: &'a Permission,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource_ref: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct AuthorizeResponse {
    items: Vec<IdentifiedDecision>,
}

#[derive(Debug, Deserialize)]
struct IdentifiedDecision {
    id: String,
    result: AuthorizeResult,
    #[serde(default)]
    conditions: Option<serde_json::Value>,
}

/// Sends batches of queries to the permission backend.
///
/// When `permission.enabled` is false (the default) every query is allowed
/// without contacting the backend.
pub struct PermissionClient {
    client: Client,
    discovery: Arc<dyn DiscoveryApi>,
    enabled: bool,
}

impl PermissionClient {
    /// Fails if `permission.enabled` is present but not a boolean.
    pub fn new(discovery: Arc<dyn DiscoveryApi>, config: &Config) -> Result<Self, PermissionError> {
        let enabled = config
            .get_optional_bool("permission.enabled")?
            .unwrap_or(false);

        Ok(Self {
            client: Client::new(),
            discovery,
            enabled,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Evaluate `queries`, returning one decision per query in the same order.
    pub async fn authorize(
        &self,
        queries: &[AuthorizeQuery],
        credentials: &Credentials,
    ) -> Result<Vec<AuthorizeDecision>, PermissionError> {
        if !self.enabled {
            return Ok(queries.iter().map(|_| AuthorizeDecision::allow()).collect());
        }
        if queries.is_empty() {
            return Ok(Vec::new());
        }

        let items: Vec<IdentifiedQuery<'_>> = queries
            .iter()
            .map(|query| IdentifiedQuery {
                id: Uuid::new_v4().to_string(),
                permission: &query.permission,
                resource_ref: query.resource_ref.as_deref(),
            })
            .collect();
        let ids: Vec<String> = items.iter().map(|item| item.id.clone()).collect();

        let base_url = self.discovery.get_base_url(PERMISSION_PLUGIN_ID).await?;
        let url = format!("{}/authorize", base_url.trim_end_matches('/'));
        debug!("permission url={}", url);
        debug!("permission batch_size={}", items.len());

        let mut request = self.client.post(&url).json(&AuthorizeRequest { items });
        if let Some(token) = &credentials.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("permission backend returned {}", status);
            return Err(PermissionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: AuthorizeResponse = response
            .json()
            .await
            .map_err(|e| PermissionError::Parse(e.to_string()))?;

        align_decisions(&ids, parsed.items)
    }
}

fn align_decisions(
    ids: &[String],
    items: Vec<IdentifiedDecision>,
) -> Result<Vec<AuthorizeDecision>, PermissionError> {
    let mut by_id: HashMap<String, AuthorizeDecision> = items
        .into_iter()
        .map(|item| {
            (
                item.id,
                AuthorizeDecision {
                    result: item.result,
                    conditions: item.conditions,
                },
            )
        })
        .collect();

    ids.iter()
        .map(|id| {
            by_id.remove(id).ok_or_else(|| {
                PermissionError::UnexpectedResponse(format!("missing decision for query {}", id))
            })
        })
        .collect()
}
