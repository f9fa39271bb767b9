use crate::config::Config;
use crate::error::PermissionError;
use crate::interfaces::{DiscoveryApi, IdentityApi};
use crate::types::Credentials;
use async_trait::async_trait;

const PLUGIN_ID_PLACEHOLDER: &str = "{{pluginId}}";

/// Discovery that expands a fixed URL pattern, e.g. `http://localhost:7007/api/{{pluginId}}`.
#[derive(Debug, Clone)]
pub struct UrlPatternDiscovery {
    pattern: String,
}

impl UrlPatternDiscovery {
    pub fn compile(pattern: impl Into<String>) -> Result<Self, PermissionError> {
        let pattern = pattern.into();
        if !pattern.contains(PLUGIN_ID_PLACEHOLDER) {
            return Err(PermissionError::Config(format!(
                "Discovery pattern '{}' must contain {}",
                pattern, PLUGIN_ID_PLACEHOLDER
            )));
        }
        Ok(Self { pattern })
    }

    /// Reads `discovery.urlPattern`.
    pub fn from_config(config: &Config) -> Result<Self, PermissionError> {
        let pattern = config
            .get_optional_string("discovery.urlPattern")?
            .ok_or_else(|| PermissionError::Config("Missing discovery.urlPattern".to_string()))?;
        Self::compile(pattern)
    }

    pub fn resolve(&self, plugin_id: &str) -> String {
        self.pattern.replace(PLUGIN_ID_PLACEHOLDER, plugin_id)
    }
}

#[async_trait]
impl DiscoveryApi for UrlPatternDiscovery {
    async fn get_base_url(&self, plugin_id: &str) -> Result<String, PermissionError> {
        Ok(self.resolve(plugin_id))
    }
}

/// Identity that always presents the same credentials.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    credentials: Credentials,
}

impl StaticIdentity {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn guest() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityApi for StaticIdentity {
    async fn get_credentials(&self) -> Result<Credentials, PermissionError> {
        Ok(self.credentials.clone())
    }
}
