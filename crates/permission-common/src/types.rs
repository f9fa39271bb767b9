//! Wire model shared by the permission backend, plugins and frontends.

use serde::{Deserialize, Serialize};

/// Whether a permission applies to a resource type or stands alone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PermissionKind {
    Basic,
    Resource,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissionAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// A permission declared by a plugin, identified by its name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    #[serde(rename = "type")]
    pub kind: PermissionKind,
    pub name: String,
    #[serde(default)]
    pub attributes: PermissionAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

impl Permission {
    pub fn basic(name: impl Into<String>) -> Self {
        Self {
            kind: PermissionKind::Basic,
            name: name.into(),
            attributes: PermissionAttributes::default(),
            resource_type: None,
        }
    }

    pub fn resource(name: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            kind: PermissionKind::Resource,
            name: name.into(),
            attributes: PermissionAttributes::default(),
            resource_type: Some(resource_type.into()),
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.attributes.action = Some(action.into());
        self
    }
}

/// A single "may the caller do this?" question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeQuery {
    pub permission: Permission,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_ref: Option<String>,
}

impl AuthorizeQuery {
    pub fn new(permission: Permission) -> Self {
        Self {
            permission,
            resource_ref: None,
        }
    }

    pub fn for_resource(permission: Permission, resource_ref: impl Into<String>) -> Self {
        Self {
            permission,
            resource_ref: Some(resource_ref.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthorizeResult {
    Allow,
    Deny,
    Conditional,
}

/// Outcome for one query. `conditions` is only set for conditional results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthorizeDecision {
    pub result: AuthorizeResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<serde_json::Value>,
}

impl AuthorizeDecision {
    pub fn allow() -> Self {
        Self {
            result: AuthorizeResult::Allow,
            conditions: None,
        }
    }

    pub fn deny() -> Self {
        Self {
            result: AuthorizeResult::Deny,
            conditions: None,
        }
    }
}

/// Caller identity presented to the permission backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: Option<String>,
}

impl Credentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }
}
