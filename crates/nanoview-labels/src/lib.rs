//! Nanoview Label Resolvers
//!
//! Implementations of the `LabelResolver` trait from `nanoview-domain`.
//!
//! # Resolvers
//!
//! - `StaticResolver`: fixed labels, for tests and offline label files
//! - `HeuristicResolver`: labels derived from the IRI itself
//! - `CachingResolver`: wraps another resolver and remembers its answers
//!
//! # Examples
//!
//! ```
//! use nanoview_labels::StaticResolver;
//! use nanoview_domain::{Label, LabelResolver};
//!
//! let mut resolver = StaticResolver::new();
//! resolver.add_label("http://www.wikidata.org/entity/Q42", Label::text("Douglas Adams"));
//!
//! let labels = resolver
//!     .resolve_batch(&["http://www.wikidata.org/entity/Q42".to_string()])
//!     .unwrap();
//! assert_eq!(labels["http://www.wikidata.org/entity/Q42"].as_str(), "Douglas Adams");
//! ```

#![warn(missing_docs)]

pub mod cache;

use nanoview_domain::label::iri_label;
use nanoview_domain::vocab::is_http_iri;
use nanoview_domain::{Label, LabelResolver};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::debug;

pub use cache::CachingResolver;

/// Errors that can occur while resolving labels
#[derive(Error, Debug)]
pub enum LabelError {
    /// The label source could not be reached
    #[error("Label source unavailable: {0}")]
    Unavailable(String),

    /// The label source answered with something unreadable
    #[error("Invalid label data: {0}")]
    InvalidData(String),

    /// Generic error
    #[error("Label error: {0}")]
    Other(String),
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Resolver answering from a fixed table of labels.
///
/// Clones share the table, the call counter and the failure switch.
///
/// # Examples
///
/// ```
/// use nanoview_labels::StaticResolver;
/// use nanoview_domain::LabelResolver;
///
/// let mut resolver = StaticResolver::new();
/// resolver.fail_with("offline");
/// assert!(resolver.resolve_batch(&[]).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    labels: Arc<Mutex<HashMap<String, Label>>>,
    failure: Arc<Mutex<Option<String>>>,
    call_count: Arc<Mutex<usize>>,
}

/// On-disk shape of a label file: `"<iri>" = "label"` or a table with a description
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LabelEntry {
    Text(String),
    Described {
        label: String,
        #[serde(default)]
        description: Option<String>,
    },
}

impl StaticResolver {
    /// Resolver knowing no labels
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver knowing `labels`
    pub fn with_labels(labels: HashMap<String, Label>) -> Self {
        Self {
            labels: Arc::new(Mutex::new(labels)),
            ..Self::default()
        }
    }

    /// Read labels from TOML, one key per IRI.
    ///
    /// ```toml
    /// "http://www.wikidata.org/entity/Q42" = "Douglas Adams"
    ///
    /// ["http://www.wikidata.org/entity/Q5"]
    /// label = "human"
    /// description = "common name of Homo sapiens"
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self, LabelError> {
        let entries: HashMap<String, LabelEntry> =
            toml::from_str(toml_str).map_err(|e| LabelError::InvalidData(e.to_string()))?;
        let labels = entries
            .into_iter()
            .map(|(iri, entry)| {
                let label = match entry {
                    LabelEntry::Text(text) => Label::text(text),
                    LabelEntry::Described { label, description } => Label::described(label, description),
                };
                (iri, label)
            })
            .collect();
        Ok(Self::with_labels(labels))
    }

    /// Add or replace the label of an IRI
    pub fn add_label(&mut self, iri: impl Into<String>, label: Label) {
        lock(&self.labels).insert(iri.into(), label);
    }

    /// Make every following call fail with `message`
    pub fn fail_with(&mut self, message: impl Into<String>) {
        *lock(&self.failure) = Some(message.into());
    }

    /// Number of known labels
    pub fn len(&self) -> usize {
        lock(&self.labels).len()
    }

    /// Whether no label is known
    pub fn is_empty(&self) -> bool {
        lock(&self.labels).is_empty()
    }

    /// Number of `resolve_batch` calls so far
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }
}

impl LabelResolver for StaticResolver {
    type Error = LabelError;

    fn resolve_batch(&self, iris: &[String]) -> Result<HashMap<String, Label>, Self::Error> {
        *lock(&self.call_count) += 1;

        if let Some(message) = lock(&self.failure).as_ref() {
            return Err(LabelError::Unavailable(message.clone()));
        }

        let labels = lock(&self.labels);
        let found: HashMap<String, Label> = iris
            .iter()
            .filter_map(|iri| labels.get(iri).map(|label| (iri.clone(), label.clone())))
            .collect();
        debug!("Static labels: {} of {} IRIs known", found.len(), iris.len());
        Ok(found)
    }
}

/// Resolver deriving a label from the IRI's last path segment.
///
/// Never fails. Non-HTTP values get no label.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicResolver;

impl LabelResolver for HeuristicResolver {
    type Error = LabelError;

    fn resolve_batch(&self, iris: &[String]) -> Result<HashMap<String, Label>, Self::Error> {
        Ok(iris
            .iter()
            .filter(|iri| is_http_iri(iri))
            .filter_map(|iri| {
                let label = iri_label(iri);
                (!label.is_empty()).then(|| (iri.clone(), Label::text(label)))
            })
            .collect())
    }
}
