//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the matching core and the
//! infrastructure that feeds it. Implementations live in other crates.

use crate::Label;
use std::collections::HashMap;

/// Trait for turning IRIs into human labels
///
/// Implemented by the infrastructure layer (nanoview-labels)
pub trait LabelResolver {
    /// Error type for resolution failures
    type Error;

    /// Resolve a batch of IRIs.
    ///
    /// IRIs the resolver knows nothing about are simply absent from the
    /// returned map. An `Err` means the whole batch failed.
    fn resolve_batch(&self, iris: &[String]) -> Result<HashMap<String, Label>, Self::Error>;
}

impl<R: LabelResolver + ?Sized> LabelResolver for &R {
    type Error = R::Error;

    fn resolve_batch(&self, iris: &[String]) -> Result<HashMap<String, Label>, Self::Error> {
        (**self).resolve_batch(iris)
    }
}

impl<R: LabelResolver + ?Sized> LabelResolver for std::sync::Arc<R> {
    type Error = R::Error;

    fn resolve_batch(&self, iris: &[String]) -> Result<HashMap<String, Label>, Self::Error> {
        (**self).resolve_batch(iris)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Fixed;

    impl LabelResolver for Fixed {
        type Error = ();

        fn resolve_batch(&self, iris: &[String]) -> Result<HashMap<String, Label>, ()> {
            Ok(iris.iter().map(|iri| (iri.clone(), Label::text("fixed"))).collect())
        }
    }

    #[test]
    fn test_resolver_through_references() {
        let iris = vec!["http://ex.org/a".to_string()];
        let by_ref = (&Fixed).resolve_batch(&iris).unwrap();
        let by_arc = Arc::new(Fixed).resolve_batch(&iris).unwrap();
        assert_eq!(by_ref, by_arc);
        assert_eq!(by_ref["http://ex.org/a"].as_str(), "fixed");
    }
}
