//! Triple module - the unit extracted from every graph

use crate::vocab::CREATOR;
use std::fmt;

/// One statement of a graph.
///
/// Each position holds an expanded IRI, a local reference (`sub:name`,
/// kept unexpanded), the `CREATOR` sentinel, or literal text with its quoting
/// removed. Triples are immutable once extracted and compare structurally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject of the statement
    pub subject: String,

    /// Predicate IRI
    pub predicate: String,

    /// Object: IRI, local reference or literal text
    pub object: String,
}

impl Triple {
    /// Create a new triple
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}

/// Classification of a single triple position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term<'a> {
    /// Absolute IRI
    Iri(&'a str),

    /// Template-local or nanopub-local reference such as `sub:paper`
    Local(&'a str),

    /// The creator sentinel
    Creator,

    /// Anything else: literal text
    Literal(&'a str),
}

impl<'a> Term<'a> {
    /// Classify a value given the local reference prefix (e.g. `sub:`)
    pub fn classify(value: &'a str, local_prefix: &str) -> Self {
        if value == CREATOR {
            Term::Creator
        } else if !local_prefix.is_empty() && value.starts_with(local_prefix) {
            Term::Local(value)
        } else if value.contains("://") || value.starts_with("urn:") || value.starts_with("mailto:") {
            Term::Iri(value)
        } else {
            Term::Literal(value)
        }
    }

    /// Whether this is an absolute IRI
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    /// Whether this is a local reference
    pub fn is_local(&self) -> bool {
        matches!(self, Term::Local(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let a = Triple::new("http://ex.org/s", "http://ex.org/p", "o");
        let b = Triple::new("http://ex.org/s", "http://ex.org/p", "o");
        let c = Triple::new("http://ex.org/s", "http://ex.org/p", "other");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_classify() {
        assert_eq!(Term::classify("CREATOR", "sub:"), Term::Creator);
        assert!(Term::classify("sub:paper", "sub:").is_local());
        assert!(Term::classify("https://doi.org/10.1/x", "sub:").is_iri());
        assert!(Term::classify("urn:isbn:123", "sub:").is_iri());
        assert_eq!(Term::classify("hello", "sub:"), Term::Literal("hello"));
    }

    #[test]
    fn test_display() {
        let t = Triple::new("s", "p", "o");
        assert_eq!(t.to_string(), "s p o");
    }
}
