//! Configuration for the syntax layer

use serde::{Deserialize, Serialize};

/// Configuration for document and template parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxConfig {
    /// Prefix of nanopub-local names, never expanded (`sub` for `sub:paper`)
    pub local_prefix: String,

    /// Token that stands for the creator of a nanopublication
    pub creator_token: String,
}

impl SyntaxConfig {
    /// The local prefix with its colon (`sub:`)
    pub fn local_marker(&self) -> String {
        format!("{}:", self.local_prefix)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.local_prefix.is_empty() {
            return Err("local_prefix must not be empty".to_string());
        }
        if self.local_prefix.contains(':') || self.local_prefix.contains(char::is_whitespace) {
            return Err(format!("local_prefix '{}' must be a bare prefix name", self.local_prefix));
        }
        if self.creator_token.trim().is_empty() {
            return Err("creator_token must not be empty".to_string());
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

impl Default for SyntaxConfig {
    fn default() -> Self {
        Self {
            local_prefix: "sub".to_string(),
            creator_token: "nt:CREATOR".to_string(),
        }
    }
}
