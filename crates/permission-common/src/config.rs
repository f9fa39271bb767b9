//! YAML-backed application config with dotted-key lookups.

use crate::error::PermissionError;
use serde_yaml::Value;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Config {
    root: Value,
}

impl Config {
    pub fn empty() -> Self {
        Self { root: Value::Null }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, PermissionError> {
        let root: Value = serde_yaml::from_str(content)
            .map_err(|e| PermissionError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(Self { root })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PermissionError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PermissionError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn get_optional_string_array(&self, key: &str) -> Result<Option<Vec<String>>, PermissionError> {
        let Some(value) = self.lookup(key) else {
            return Ok(None);
        };

        let items = value
            .as_sequence()
            .ok_or_else(|| type_error(key, "string array"))?;

        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| type_error(key, "string array"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    pub fn get_optional_bool(&self, key: &str) -> Result<Option<bool>, PermissionError> {
        match self.lookup(key) {
            None => Ok(None),
            Some(value) => value.as_bool().map(Some).ok_or_else(|| type_error(key, "boolean")),
        }
    }

    pub fn get_optional_string(&self, key: &str) -> Result<Option<String>, PermissionError> {
        match self.lookup(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| type_error(key, "string")),
        }
    }

    // Null leaves count as absent, matching an empty `key:` line in YAML.
    fn lookup(&self, key: &str) -> Option<&Value> {
        let mut current = &self.root;
        for part in key.split('.') {
            current = current.as_mapping()?.get(part)?;
        }
        if current.is_null() {
            None
        } else {
            Some(current)
        }
    }
}

fn type_error(key: &str, expected: &str) -> PermissionError {
    PermissionError::Config(format!("Invalid type at '{}', expected {}", key, expected))
}
