//! Graph module - the three named graphs of a nanopublication

use crate::Triple;
use std::fmt;

/// Name of one of the three graphs every nanopublication carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphName {
    /// The claim itself
    Assertion,

    /// How the assertion came to be
    Provenance,

    /// Metadata about the publication
    Pubinfo,
}

impl GraphName {
    /// All graph names, in document order
    pub const ALL: [GraphName; 3] = [GraphName::Assertion, GraphName::Provenance, GraphName::Pubinfo];

    /// Local name used in graph markers (`sub:assertion {`)
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphName::Assertion => "assertion",
            GraphName::Provenance => "provenance",
            GraphName::Pubinfo => "pubinfo",
        }
    }
}

impl fmt::Display for GraphName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named collection of triples, in extraction order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    /// Which graph this is
    pub name: GraphName,

    /// Triples in the order they were extracted
    pub triples: Vec<Triple>,
}

impl Graph {
    /// Create a graph from extracted triples
    pub fn new(name: GraphName, triples: Vec<Triple>) -> Self {
        Self { name, triples }
    }

    /// An absent graph
    pub fn empty(name: GraphName) -> Self {
        Self::new(name, Vec::new())
    }

    /// Number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Whether the graph has no triples
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over the triples
    pub fn iter(&self) -> std::slice::Iter<'_, Triple> {
        self.triples.iter()
    }

    /// Whether `value` occurs as the subject of some triple
    pub fn has_subject(&self, value: &str) -> bool {
        self.triples.iter().any(|t| t.subject == value)
    }

    /// Objects of every triple whose predicate is `predicate`
    pub fn objects_of<'a>(&'a self, predicate: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.triples
            .iter()
            .filter(move |t| t.predicate == predicate)
            .map(|t| t.object.as_str())
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_names() {
        let names: Vec<&str> = GraphName::ALL.iter().map(|g| g.as_str()).collect();
        assert_eq!(names, vec!["assertion", "provenance", "pubinfo"]);
    }

    #[test]
    fn test_graph_queries() {
        let graph = Graph::new(
            GraphName::Assertion,
            vec![
                Triple::new("http://ex.org/a", "http://ex.org/p", "http://ex.org/b"),
                Triple::new("http://ex.org/b", "http://ex.org/q", "x"),
            ],
        );
        assert_eq!(graph.len(), 2);
        assert!(graph.has_subject("http://ex.org/b"));
        assert!(!graph.has_subject("x"));
        assert_eq!(graph.objects_of("http://ex.org/q").collect::<Vec<_>>(), vec!["x"]);
    }
}
