//! Default `PermissionApi`: the caller's credentials plus the permission backend.

use crate::api::PermissionApi;
use async_trait::async_trait;
use permission_common::{
    AuthorizeDecision, AuthorizeQuery, Config, DiscoveryApi, IdentityApi, Permission,
    PermissionAggregator, PermissionClient, PermissionError,
};
use std::sync::Arc;

const PERMISSIONED_PLUGINS_KEY: &str = "permission.permissionedPlugins";

/// Forwards each query to the permission backend as a batch of one, using
/// whatever credentials the identity provider returns at call time.
pub struct IdentityPermissionApi {
    permission_client: PermissionClient,
    identity: Arc<dyn IdentityApi>,
    permission_aggregator: PermissionAggregator,
}

impl IdentityPermissionApi {
    fn new(
        permission_client: PermissionClient,
        identity: Arc<dyn IdentityApi>,
        permission_aggregator: PermissionAggregator,
    ) -> Self {
        Self {
            permission_client,
            identity,
            permission_aggregator,
        }
    }

    /// No network calls happen here. A missing `permission.permissionedPlugins`
    /// yields an empty plugin list; a mistyped permission key is a config error.
    pub fn create(
        config: &Config,
        discovery: Arc<dyn DiscoveryApi>,
        identity: Arc<dyn IdentityApi>,
    ) -> Result<Self, PermissionError> {
        let permission_client = PermissionClient::new(Arc::clone(&discovery), config)?;
        let permissioned_plugins = config
            .get_optional_string_array(PERMISSIONED_PLUGINS_KEY)?
            .unwrap_or_default();
        let permission_aggregator = PermissionAggregator::new(permissioned_plugins, discovery);

        Ok(Self::new(permission_client, identity, permission_aggregator))
    }

    pub fn permissioned_plugins(&self) -> &[String] {
        self.permission_aggregator.plugin_ids()
    }
}

#[async_trait]
impl PermissionApi for IdentityPermissionApi {
    async fn authorize(&self, query: AuthorizeQuery) -> Result<AuthorizeDecision, PermissionError> {
        let credentials = self.identity.get_credentials().await?;
        let decisions = self
            .permission_client
            .authorize(std::slice::from_ref(&query), &credentials)
            .await?;

        decisions
            .into_iter()
            .next()
            .ok_or(PermissionError::EmptyResponse)
    }

    async fn get_all_permissions(&self) -> Result<Vec<Permission>, PermissionError> {
        self.permission_aggregator.get_all_permissions().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use permission_common::{StaticIdentity, UrlPatternDiscovery};

    fn try_build(config_yaml: &str) -> Result<IdentityPermissionApi, PermissionError> {
        let config = Config::from_yaml_str(config_yaml).unwrap();
        let discovery = UrlPatternDiscovery::compile("http://localhost:7007/api/{{pluginId}}").unwrap();
        IdentityPermissionApi::create(&config, Arc::new(discovery), Arc::new(StaticIdentity::guest()))
    }

    fn build(config_yaml: &str) -> IdentityPermissionApi {
        try_build(config_yaml).unwrap()
    }

    #[test]
    fn test_missing_plugins_key_yields_empty_list() {
        let api = build("permission:\n  enabled: true\n");
        assert!(api.permissioned_plugins().is_empty());
    }

    #[test]
    fn test_plugins_keep_configured_order() {
        let api = build("permission:\n  permissionedPlugins: [plugin-a, plugin-b]\n");
        assert_eq!(api.permissioned_plugins(), ["plugin-a".to_string(), "plugin-b".to_string()]);
    }

    #[test]
    fn test_scalar_plugins_key_is_rejected() {
        let result = try_build("permission:\n  permissionedPlugins: catalog\n");
        assert!(matches!(result, Err(PermissionError::Config(msg)) if msg.contains("permissionedPlugins")));
    }

    #[test]
    fn test_non_boolean_enabled_flag_is_rejected() {
        let result = try_build("permission:\n  enabled: yes\n");
        assert!(matches!(result, Err(PermissionError::Config(msg)) if msg.contains("permission.enabled")));
    }

    #[tokio::test]
    async fn test_disabled_permissions_allow_offline() {
        let api = build("permission:\n  enabled: false\n");
        let decision = api
            .authorize(AuthorizeQuery::new(Permission::basic("x.read")))
            .await
            .unwrap();
        assert_eq!(decision, AuthorizeDecision::allow());
    }
}
