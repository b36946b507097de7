//! Caching resolver
//!
//! Remembers what the inner resolver answered, including which IRIs it had
//! no label for, so a document viewed twice asks for nothing the second time.

use crate::lock;
use nanoview_domain::{Label, LabelResolver};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Wraps a resolver and caches its answers.
///
/// Only IRIs missing from the cache are forwarded. A failed call caches
/// nothing, so the next call retries the same IRIs.
#[derive(Debug, Clone)]
pub struct CachingResolver<R> {
    inner: R,
    cache: Arc<Mutex<HashMap<String, Option<Label>>>>,
}

impl<R: LabelResolver> CachingResolver<R> {
    /// Wrap `inner` with an empty cache
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The wrapped resolver
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Number of IRIs with a cached answer, absent labels included
    pub fn cached(&self) -> usize {
        lock(&self.cache).len()
    }

    /// Forget every cached answer
    pub fn clear_cache(&self) {
        lock(&self.cache).clear();
    }
}

impl<R: LabelResolver> LabelResolver for CachingResolver<R> {
    type Error = R::Error;

    fn resolve_batch(&self, iris: &[String]) -> Result<HashMap<String, Label>, Self::Error> {
        let misses: Vec<String> = {
            let cache = lock(&self.cache);
            let mut misses: Vec<String> = iris
                .iter()
                .filter(|iri| !cache.contains_key(*iri))
                .cloned()
                .collect();
            misses.sort();
            misses.dedup();
            misses
        };

        if !misses.is_empty() {
            debug!("Label cache: {} of {} IRIs missing", misses.len(), iris.len());
            let fetched = self.inner.resolve_batch(&misses)?;
            let mut cache = lock(&self.cache);
            for iri in misses {
                let label = fetched.get(&iri).cloned();
                cache.insert(iri, label);
            }
        }

        let cache = lock(&self.cache);
        Ok(iris
            .iter()
            .filter_map(|iri| {
                cache
                    .get(iri)
                    .and_then(|label| label.clone())
                    .map(|label| (iri.clone(), label))
            })
            .collect())
    }
}
