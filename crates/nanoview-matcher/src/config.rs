//! Matcher configuration

use serde::{Deserialize, Serialize};

/// Configuration for structural matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Substring a subject must contain to match a `CREATOR` statement
    pub creator_marker: String,

    /// Prefix of placeholder references, colon included
    pub local_prefix: String,

    /// Drop fields whose every value is an unresolved local reference
    pub drop_local_only_fields: bool,

    /// Label of subject fields whose placeholder declares none
    pub default_subject_label: String,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            creator_marker: "orcid.org".to_string(),
            local_prefix: "sub:".to_string(),
            drop_local_only_fields: true,
            default_subject_label: "Subject".to_string(),
        }
    }
}

impl MatcherConfig {
    /// Keep every field, including those showing only local references
    pub fn permissive() -> Self {
        Self {
            drop_local_only_fields: false,
            ..Self::default()
        }
    }

    /// Whether `value` is a placeholder or nanopub-local reference
    pub fn is_local(&self, value: &str) -> bool {
        value.starts_with(&self.local_prefix)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.local_prefix.ends_with(':') || self.local_prefix.len() < 2 {
            return Err(format!("local_prefix '{}' must look like 'name:'", self.local_prefix));
        }
        if self.creator_marker.is_empty() {
            return Err("creator_marker must not be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
