use async_trait::async_trait;
use permission_common::{AuthorizeDecision, AuthorizeQuery, Permission, PermissionError};

/// Permission checks as seen by the rest of the application.
#[async_trait]
pub trait PermissionApi: Send + Sync {
    /// Decide a single query for the current caller.
    async fn authorize(&self, query: AuthorizeQuery) -> Result<AuthorizeDecision, PermissionError>;

    /// Every permission declared by the permissioned plugins.
    async fn get_all_permissions(&self) -> Result<Vec<Permission>, PermissionError>;
}
