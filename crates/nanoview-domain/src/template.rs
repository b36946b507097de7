//! Template module - the declared shape of an assertion graph

use crate::Label;
use std::collections::HashMap;
use std::fmt;

/// Kind of a template placeholder
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    /// Any external IRI
    ExternalUriPlaceholder,
    /// Free text turned into an IRI by escaping it behind a declared prefix
    AutoEscapeUriPlaceholder,
    /// One of a declared list of values
    RestrictedChoicePlaceholder,
    /// Multi-line literal
    LongLiteralPlaceholder,
    /// Single-line literal
    LiteralPlaceholder,
    /// IRI, possibly behind a prefix
    UriPlaceholder,
    /// Value suggested from an external lookup
    GuidedChoicePlaceholder,
    /// Resource minted by the nanopublication itself
    IntroducedResource,
    /// Resource local to the nanopublication
    LocalResource,
    /// Resource embedded in the nanopublication
    EmbeddedResource,
    /// Any kind this crate does not know about
    Other(String),
}

impl PlaceholderKind {
    /// Map a type's local name (`ExternalUriPlaceholder`) to a kind
    pub fn from_local_name(name: &str) -> Self {
        match name {
            "ExternalUriPlaceholder" => PlaceholderKind::ExternalUriPlaceholder,
            "AutoEscapeUriPlaceholder" => PlaceholderKind::AutoEscapeUriPlaceholder,
            "RestrictedChoicePlaceholder" => PlaceholderKind::RestrictedChoicePlaceholder,
            "LongLiteralPlaceholder" => PlaceholderKind::LongLiteralPlaceholder,
            "LiteralPlaceholder" => PlaceholderKind::LiteralPlaceholder,
            "UriPlaceholder" => PlaceholderKind::UriPlaceholder,
            "GuidedChoicePlaceholder" => PlaceholderKind::GuidedChoicePlaceholder,
            "IntroducedResource" => PlaceholderKind::IntroducedResource,
            "LocalResource" => PlaceholderKind::LocalResource,
            "EmbeddedResource" => PlaceholderKind::EmbeddedResource,
            other => PlaceholderKind::Other(other.to_string()),
        }
    }

    /// The type's local name
    pub fn as_str(&self) -> &str {
        match self {
            PlaceholderKind::ExternalUriPlaceholder => "ExternalUriPlaceholder",
            PlaceholderKind::AutoEscapeUriPlaceholder => "AutoEscapeUriPlaceholder",
            PlaceholderKind::RestrictedChoicePlaceholder => "RestrictedChoicePlaceholder",
            PlaceholderKind::LongLiteralPlaceholder => "LongLiteralPlaceholder",
            PlaceholderKind::LiteralPlaceholder => "LiteralPlaceholder",
            PlaceholderKind::UriPlaceholder => "UriPlaceholder",
            PlaceholderKind::GuidedChoicePlaceholder => "GuidedChoicePlaceholder",
            PlaceholderKind::IntroducedResource => "IntroducedResource",
            PlaceholderKind::LocalResource => "LocalResource",
            PlaceholderKind::EmbeddedResource => "EmbeddedResource",
            PlaceholderKind::Other(name) => name,
        }
    }

    /// Whether the kind only names a resource and has no visible value of its own
    pub fn is_resource_only(&self) -> bool {
        matches!(
            self,
            PlaceholderKind::IntroducedResource | PlaceholderKind::LocalResource
        )
    }
}

impl fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (subject, predicate, object) rule of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementPattern {
    /// Statement id, e.g. `sub:st1`
    pub id: String,

    /// IRI, placeholder reference, or `CREATOR`
    pub subject: String,

    /// IRI or placeholder reference
    pub predicate: String,

    /// IRI, placeholder reference, or literal
    pub object: String,

    /// The statement may be absent
    pub optional: bool,

    /// The statement may occur several times
    pub repeatable: bool,

    /// The statement is itself a group of statements
    pub grouped: bool,
}

/// A template-declared slot filled by a concrete value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Placeholder {
    /// Placeholder id, e.g. `sub:paper`
    pub id: String,

    /// Declared kinds, in declaration order
    pub kinds: Vec<PlaceholderKind>,

    /// Human label (empty when the template declares none)
    pub label: String,

    /// Literal prefix declared for IRI-valued placeholders
    pub prefix: Option<String>,

    /// Whitelist of values for restricted choices
    pub possible_values: Vec<String>,
}

impl Placeholder {
    /// Whether the placeholder declares `kind`
    pub fn has_kind(&self, kind: &PlaceholderKind) -> bool {
        self.kinds.contains(kind)
    }

    /// Whether every declared kind is resource-only
    pub fn is_resource_only(&self) -> bool {
        !self.kinds.is_empty() && self.kinds.iter().all(PlaceholderKind::is_resource_only)
    }

    /// Label, or `None` when the template declares none
    pub fn label(&self) -> Option<&str> {
        if self.label.is_empty() {
            None
        } else {
            Some(&self.label)
        }
    }
}

/// Statements that must be satisfied together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedStatement {
    /// Group id, e.g. `sub:stGroup`
    pub id: String,

    /// Member statement ids, in declaration order
    pub statement_ids: Vec<String>,

    /// The whole group may be absent
    pub optional: bool,
}

/// A parsed template.
///
/// An empty `statement_order` means "no template": the matcher is skipped and
/// the assertion graph is shown unstructured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    /// Statement patterns by id
    pub statements: HashMap<String, StatementPattern>,

    /// Top-level statement ids in template order; may name ids that failed extraction
    pub statement_order: Vec<String>,

    /// Placeholders by id
    pub placeholders: HashMap<String, Placeholder>,

    /// Labels declared anywhere in the template, by IRI
    pub labels: HashMap<String, Label>,

    /// Grouped statements, in declaration order
    pub grouped_statements: Vec<GroupedStatement>,

    /// Template title
    pub title: Option<String>,

    /// Template description
    pub description: Option<String>,

    /// Template tag
    pub tag: Option<String>,
}

impl Template {
    /// Whether this template carries no statement order
    pub fn is_empty(&self) -> bool {
        self.statement_order.is_empty()
    }

    /// Statement pattern by id
    pub fn statement(&self, id: &str) -> Option<&StatementPattern> {
        self.statements.get(id)
    }

    /// Placeholder by id
    pub fn placeholder(&self, id: &str) -> Option<&Placeholder> {
        self.placeholders.get(id)
    }

    /// Statements in template order, skipping ids that failed extraction
    pub fn ordered_statements(&self) -> impl Iterator<Item = &StatementPattern> {
        self.statement_order
            .iter()
            .filter_map(move |id| self.statements.get(id))
    }

    /// Grouped statement by id
    pub fn group(&self, id: &str) -> Option<&GroupedStatement> {
        self.grouped_statements.iter().find(|g| g.id == id)
    }

    /// Whether `statement_id` is a member of some group
    pub fn is_group_member(&self, statement_id: &str) -> bool {
        self.grouped_statements
            .iter()
            .any(|g| g.statement_ids.iter().any(|id| id == statement_id))
    }

    /// Groups constraining `placeholder_id`, each with its member statements
    /// whose subject is that placeholder
    pub fn groups_constraining<'a>(
        &'a self,
        placeholder_id: &'a str,
    ) -> impl Iterator<Item = (&'a GroupedStatement, Vec<&'a StatementPattern>)> + 'a {
        self.grouped_statements.iter().filter_map(move |group| {
            let members: Vec<&StatementPattern> = group
                .statement_ids
                .iter()
                .filter_map(|id| self.statements.get(id))
                .filter(|stmt| stmt.subject == placeholder_id)
                .collect();
            if members.is_empty() {
                None
            } else {
                Some((group, members))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(id: &str, subject: &str, predicate: &str, object: &str) -> StatementPattern {
        StatementPattern {
            id: id.to_string(),
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: object.to_string(),
            optional: false,
            repeatable: false,
            grouped: false,
        }
    }

    #[test]
    fn test_kind_round_trip_names() {
        for name in ["ExternalUriPlaceholder", "LocalResource", "SomethingNew"] {
            assert_eq!(PlaceholderKind::from_local_name(name).as_str(), name);
        }
        assert!(PlaceholderKind::IntroducedResource.is_resource_only());
        assert!(!PlaceholderKind::ExternalUriPlaceholder.is_resource_only());
    }

    #[test]
    fn test_resource_only_placeholder() {
        let placeholder = Placeholder {
            id: "sub:thing".to_string(),
            kinds: vec![PlaceholderKind::IntroducedResource, PlaceholderKind::LocalResource],
            ..Default::default()
        };
        assert!(placeholder.is_resource_only());

        let empty = Placeholder::default();
        assert!(!empty.is_resource_only());
        assert!(empty.label().is_none());
    }

    #[test]
    fn test_ordered_statements_skip_missing() {
        let mut template = Template::default();
        template.statements.insert("sub:st1".into(), pattern("sub:st1", "sub:a", "http://ex.org/p", "sub:b"));
        template.statement_order = vec!["sub:st0".into(), "sub:st1".into()];

        let ids: Vec<&str> = template.ordered_statements().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["sub:st1"]);
        assert!(!template.is_empty());
    }

    #[test]
    fn test_groups_constraining() {
        let mut template = Template::default();
        template.statements.insert("sub:g1".into(), pattern("sub:g1", "sub:author", "http://ex.org/p1", "v1"));
        template.statements.insert("sub:g2".into(), pattern("sub:g2", "sub:other", "http://ex.org/p2", "v2"));
        template.grouped_statements.push(GroupedStatement {
            id: "sub:group".into(),
            statement_ids: vec!["sub:g1".into(), "sub:g2".into()],
            optional: false,
        });

        let groups: Vec<_> = template.groups_constraining("sub:author").collect();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].1.len(), 1);
        assert!(template.is_group_member("sub:g2"));
        assert!(template.groups_constraining("sub:nobody").next().is_none());
    }
}
