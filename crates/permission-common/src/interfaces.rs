//! Capabilities the hosting application supplies to the permission clients.

use crate::error::PermissionError;
use crate::types::Credentials;
use async_trait::async_trait;

/// Resolves the base URL of a plugin's backend.
#[async_trait]
pub trait DiscoveryApi: Send + Sync {
    async fn get_base_url(&self, plugin_id: &str) -> Result<String, PermissionError>;
}

/// Supplies the current caller's credentials.
///
/// Implementations own any refresh policy; callers fetch on every request.
#[async_trait]
pub trait IdentityApi: Send + Sync {
    async fn get_credentials(&self) -> Result<Credentials, PermissionError>;
}
