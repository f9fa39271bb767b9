//! Collects the permissions each configured plugin declares.

use crate::error::PermissionError;
use crate::interfaces::DiscoveryApi;
use crate::types::Permission;
use futures::future::try_join_all;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

const METADATA_PATH: &str = ".well-known/backstage/permissions/metadata";

#[derive(Debug, Deserialize)]
struct PermissionMetadata {
    #[serde(default)]
    permissions: Vec<Permission>,
}

pub struct PermissionAggregator {
    client: Client,
    plugin_ids: Vec<String>,
    discovery: Arc<dyn DiscoveryApi>,
}

impl PermissionAggregator {
    pub fn new(plugin_ids: Vec<String>, discovery: Arc<dyn DiscoveryApi>) -> Self {
        Self {
            client: Client::new(),
            plugin_ids,
            discovery,
        }
    }

    pub fn plugin_ids(&self) -> &[String] {
        &self.plugin_ids
    }

    /// Union of every plugin's permissions, deduplicated by name.
    ///
    /// Earlier plugins win on name clashes. Any plugin failure fails the whole call.
    pub async fn get_all_permissions(&self) -> Result<Vec<Permission>, PermissionError> {
        let per_plugin = try_join_all(
            self.plugin_ids
                .iter()
                .map(|plugin_id| self.fetch_plugin_permissions(plugin_id)),
        )
        .await?;

        let mut seen = HashSet::new();
        Ok(per_plugin
            .into_iter()
            .flatten()
            .filter(|permission| seen.insert(permission.name.clone()))
            .collect())
    }

    async fn fetch_plugin_permissions(&self, plugin_id: &str) -> Result<Vec<Permission>, PermissionError> {
        let base_url = self.discovery.get_base_url(plugin_id).await?;
        let url = format!("{}/{}", base_url.trim_end_matches('/'), METADATA_PATH);
        debug!("permission metadata plugin={} url={}", plugin_id, url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("plugin {} metadata returned {}", plugin_id, status);
            return Err(PermissionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let metadata: PermissionMetadata = response
            .json()
            .await
            .map_err(|e| PermissionError::Parse(format!("{}: {}", plugin_id, e)))?;

        Ok(metadata.permissions)
    }
}
