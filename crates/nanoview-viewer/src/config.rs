//! Configuration for the Viewer

use nanoview_matcher::MatcherConfig;
use nanoview_syntax::SyntaxConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for viewing nanopublications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Largest document (or template) accepted, in bytes
    pub max_document_bytes: usize,

    /// Maximum time for the label batch (seconds)
    pub label_timeout_secs: u64,

    /// Ask the label resolver at all
    pub resolve_labels: bool,

    /// Report `purl.org/np/` template IRIs under `w3id.org/np/`
    pub rewrite_purl: bool,

    /// Fail on documents without an assertion graph instead of showing nothing
    pub require_assertion: bool,

    /// Parser settings
    pub syntax: SyntaxConfig,

    /// Matcher settings
    pub matcher: MatcherConfig,
}

impl ViewerConfig {
    /// Get the label timeout as a Duration
    pub fn label_timeout(&self) -> Duration {
        Duration::from_secs(self.label_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_document_bytes == 0 {
            return Err("max_document_bytes must be greater than 0".to_string());
        }
        if self.label_timeout_secs == 0 {
            return Err("label_timeout_secs must be greater than 0".to_string());
        }
        self.syntax.validate()?;
        self.matcher.validate()?;
        if self.syntax.local_marker() != self.matcher.local_prefix {
            return Err(format!(
                "syntax.local_prefix '{}' does not match matcher.local_prefix '{}'",
                self.syntax.local_prefix, self.matcher.local_prefix
            ));
        }
        Ok(())
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            max_document_bytes: 1_000_000,
            label_timeout_secs: 10,
            resolve_labels: true,
            rewrite_purl: true,
            require_assertion: false,
            syntax: SyntaxConfig::default(),
            matcher: MatcherConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Strict preset: small documents, short label timeout, assertion required
    pub fn strict() -> Self {
        Self {
            max_document_bytes: 256_000,
            label_timeout_secs: 5,
            require_assertion: true,
            ..Self::default()
        }
    }

    /// Lenient preset: large documents, long label timeout, every field kept
    pub fn lenient() -> Self {
        Self {
            max_document_bytes: 10_000_000,
            label_timeout_secs: 30,
            matcher: MatcherConfig::permissive(),
            ..Self::default()
        }
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
