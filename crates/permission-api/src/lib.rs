//! Application-facing permission API backed by the remote permission service.

pub mod api;
pub mod identity_permission_api;

pub use api::PermissionApi;
pub use identity_permission_api::IdentityPermissionApi;
