//! Prefix table - prefix name to namespace IRI

use std::collections::HashMap;

/// Mapping from prefix names to namespace IRIs.
///
/// Entries are first-writer-wins: once a prefix is declared, later
/// declarations of the same name are ignored. The builder feeds the document
/// before the template, which gives the document precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixTable {
    entries: HashMap<String, String>,
}

impl PrefixTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a prefix unless it is already declared.
    ///
    /// Returns `true` if the entry was added.
    pub fn declare(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) -> bool {
        let prefix = prefix.into();
        if self.entries.contains_key(&prefix) {
            return false;
        }
        self.entries.insert(prefix, namespace.into());
        true
    }

    /// Add every entry of `other` that this table does not already declare
    pub fn merge_missing(&mut self, other: &PrefixTable) {
        for (prefix, namespace) in &other.entries {
            self.entries
                .entry(prefix.clone())
                .or_insert_with(|| namespace.clone());
        }
    }

    /// Namespace IRI for a prefix
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.entries.get(prefix).map(String::as_str)
    }

    /// Expand `prefix:local`, if the prefix is known
    pub fn resolve(&self, prefix: &str, local: &str) -> Option<String> {
        self.get(prefix).map(|ns| format!("{}{}", ns, local))
    }

    /// Number of declared prefixes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no prefix is declared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(prefix, namespace)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, ns)| (p.as_str(), ns.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_declaration_wins() {
        let mut table = PrefixTable::new();
        assert!(table.declare("ex", "http://example.org/"));
        assert!(!table.declare("ex", "http://other.org/"));
        assert_eq!(table.get("ex"), Some("http://example.org/"));
    }

    #[test]
    fn test_merge_missing_keeps_existing() {
        let mut doc = PrefixTable::new();
        doc.declare("ex", "http://doc.org/");

        let mut tpl = PrefixTable::new();
        tpl.declare("ex", "http://template.org/");
        tpl.declare("nt", "https://w3id.org/np/o/ntemplate/");

        doc.merge_missing(&tpl);
        assert_eq!(doc.get("ex"), Some("http://doc.org/"));
        assert_eq!(doc.get("nt"), Some("https://w3id.org/np/o/ntemplate/"));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_resolve() {
        let mut table = PrefixTable::new();
        table.declare("dct", "http://purl.org/dc/terms/");
        assert_eq!(
            table.resolve("dct", "creator").as_deref(),
            Some("http://purl.org/dc/terms/creator")
        );
        assert!(table.resolve("foaf", "name").is_none());
    }
}
