//! Template parser: builds a [`Template`] from a template document

use crate::lexer::top_level_blocks;
use crate::triples::TripleParser;
use crate::SyntaxConfig;
use nanoview_domain::vocab::{
    is_nt, local_name, DCT_DESCRIPTION, RDFS_COMMENT, RDFS_LABEL, RDF_OBJECT, RDF_PREDICATE,
    RDF_SUBJECT, RDF_TYPE,
};
use nanoview_domain::{
    GroupedStatement, Label, Placeholder, PlaceholderKind, PrefixTable, StatementPattern, Template,
    Triple,
};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Parses template documents
#[derive(Debug, Clone)]
pub struct TemplateParser<'a> {
    triples: TripleParser<'a>,
}

impl<'a> TemplateParser<'a> {
    /// Create a template parser expanding names through `prefixes`
    pub fn new(prefixes: &'a PrefixTable, config: &'a SyntaxConfig) -> Self {
        Self {
            triples: TripleParser::new(prefixes, config),
        }
    }

    /// Parse template text.
    ///
    /// Every graph block of the document is read; text without graph blocks
    /// is read as one block. Empty text yields an empty template.
    pub fn parse(&self, text: &str) -> Template {
        if text.trim().is_empty() {
            return Template::default();
        }

        let mut blocks = top_level_blocks(text);
        if blocks.is_empty() {
            blocks.push(text);
        }
        let triples: Vec<Triple> = blocks
            .into_iter()
            .flat_map(|block| self.triples.parse_triples(block))
            .collect();

        let template = template_from_triples(&triples);
        debug!(
            "Parsed template: {} statements, {} placeholders, {} groups",
            template.statements.len(),
            template.placeholders.len(),
            template.grouped_statements.len()
        );
        template
    }
}

/// Build a template from already parsed triples
pub fn template_from_triples(triples: &[Triple]) -> Template {
    let index = SubjectIndex::new(triples);
    let mut template = Template::default();

    if let Some(node) = index.template_node() {
        template.title = index.first(node, is_label).map(str::to_string);
        template.description = index.first(node, is_description).map(str::to_string);
        template.tag = index.first(node, |p| is_nt(p, "hasTag")).map(str::to_string);
        template.statement_order = index
            .all(node, |p| is_nt(p, "hasStatement"))
            .map(str::to_string)
            .collect();
    } else {
        debug!("No template node found");
    }

    for &subject in &index.order {
        if index.has_type(subject, "GroupedStatement") {
            template.grouped_statements.push(GroupedStatement {
                id: subject.to_string(),
                statement_ids: index
                    .all(subject, |p| is_nt(p, "hasStatement"))
                    .map(str::to_string)
                    .collect(),
                optional: index.has_type(subject, "OptionalStatement"),
            });
        }
    }

    for id in statement_ids(&template, &index) {
        match index.statement(&id) {
            Some(pattern) => {
                template.statements.insert(id, pattern);
            }
            None => debug!("Statement {} has no subject/predicate/object", id),
        }
    }

    for &subject in &index.order {
        if let Some(placeholder) = index.placeholder(subject) {
            template.placeholders.insert(subject.to_string(), placeholder);
        }
        if let Some(label) = index.first(subject, is_label) {
            let description = index.first(subject, is_description).map(str::to_string);
            let label = match description {
                Some(description) => Label::described(label, Some(description)),
                None => Label::text(label),
            };
            template.labels.entry(subject.to_string()).or_insert(label);
        }
    }

    template
}

/// Ids that may name statements: the order, group members, then anything
/// carrying `rdf:subject`
fn statement_ids(template: &Template, index: &SubjectIndex<'_>) -> Vec<String> {
    let mut seen = HashSet::new();
    let members = template
        .grouped_statements
        .iter()
        .flat_map(|g| g.statement_ids.iter().map(String::as_str));
    let reified = index
        .order
        .iter()
        .copied()
        .filter(|s| index.first(s, is_rdf_subject).is_some());

    template
        .statement_order
        .iter()
        .map(String::as_str)
        .chain(members)
        .chain(reified)
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Triples grouped by subject, subjects in first-seen order
struct SubjectIndex<'t> {
    order: Vec<&'t str>,
    by_subject: HashMap<&'t str, Vec<&'t Triple>>,
}

impl<'t> SubjectIndex<'t> {
    fn new(triples: &'t [Triple]) -> Self {
        let mut order = Vec::new();
        let mut by_subject: HashMap<&str, Vec<&Triple>> = HashMap::new();
        for triple in triples {
            let entry = by_subject.entry(triple.subject.as_str()).or_default();
            if entry.is_empty() {
                order.push(triple.subject.as_str());
            }
            entry.push(triple);
        }
        Self { order, by_subject }
    }

    fn all<'s, F>(&'s self, subject: &str, mut predicate: F) -> impl Iterator<Item = &'t str> + 's
    where
        F: FnMut(&str) -> bool + 's,
    {
        self.by_subject
            .get(subject)
            .into_iter()
            .flatten()
            .copied()
            .filter(move |t| predicate(t.predicate.as_str()))
            .map(|t| t.object.as_str())
    }

    fn first<F>(&self, subject: &str, mut predicate: F) -> Option<&'t str>
    where
        F: FnMut(&str) -> bool,
    {
        self.by_subject
            .get(subject)?
            .iter()
            .copied()
            .find(|t| predicate(t.predicate.as_str()))
            .map(|t| t.object.as_str())
    }

    fn types<'s>(&'s self, subject: &str) -> impl Iterator<Item = &'t str> + 's {
        self.all(subject, |p| p == RDF_TYPE)
    }

    fn has_type(&self, subject: &str, local: &str) -> bool {
        self.types(subject).any(|t| is_nt(t, local))
    }

    /// The subject typed `nt:AssertionTemplate`, else the first
    /// non-grouped subject listing statements
    fn template_node(&self) -> Option<&'t str> {
        self.order
            .iter()
            .copied()
            .find(|s| self.has_type(s, "AssertionTemplate"))
            .or_else(|| {
                self.order.iter().copied().find(|s| {
                    !self.has_type(s, "GroupedStatement")
                        && self.first(s, |p| is_nt(p, "hasStatement")).is_some()
                })
            })
    }

    fn statement(&self, id: &str) -> Option<StatementPattern> {
        Some(StatementPattern {
            id: id.to_string(),
            subject: self.first(id, is_rdf_subject)?.to_string(),
            predicate: self.first(id, |p| p == RDF_PREDICATE || p == "rdf:predicate")?.to_string(),
            object: self.first(id, |p| p == RDF_OBJECT || p == "rdf:object")?.to_string(),
            optional: self.has_type(id, "OptionalStatement"),
            repeatable: self.has_type(id, "RepeatableStatement"),
            grouped: self.has_type(id, "GroupedStatement"),
        })
    }

    fn placeholder(&self, subject: &str) -> Option<Placeholder> {
        let mut kinds: Vec<PlaceholderKind> = Vec::new();
        for ty in self.types(subject) {
            let name = local_name(ty);
            if name.contains("Placeholder") || name.contains("Resource") {
                let kind = PlaceholderKind::from_local_name(name);
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
        }
        if kinds.is_empty() {
            return None;
        }

        Some(Placeholder {
            id: subject.to_string(),
            kinds,
            label: self.first(subject, is_label).unwrap_or_default().to_string(),
            prefix: self.first(subject, |p| is_nt(p, "hasPrefix")).map(str::to_string),
            possible_values: self
                .all(subject, |p| is_nt(p, "possibleValue"))
                .map(str::to_string)
                .collect(),
        })
    }
}

fn is_label(predicate: &str) -> bool {
    predicate == RDFS_LABEL || predicate == "rdfs:label"
}

fn is_description(predicate: &str) -> bool {
    matches!(predicate, DCT_DESCRIPTION | RDFS_COMMENT | "dct:description" | "rdfs:comment")
}

fn is_rdf_subject(predicate: &str) -> bool {
    predicate == RDF_SUBJECT || predicate == "rdf:subject"
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"@prefix sub: <http://purl.org/np/RAtpl/> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix dct: <http://purl.org/dc/terms/> .
@prefix nt: <https://w3id.org/np/o/ntemplate/> .
@prefix ex: <http://example.org/> .

sub:assertion {
  sub:assertion a nt:AssertionTemplate ;
    rdfs:label "Describing a paper" ;
    dct:description "Links a paper to its topics" ;
    nt:hasTag "Papers" ;
    nt:hasStatement sub:st1, sub:st2, sub:stMissing .

  sub:st1 a rdf:Statement ;
    rdf:subject sub:paper ;
    rdf:predicate ex:topic ;
    rdf:object sub:topic .

  sub:st2 a rdf:Statement, nt:OptionalStatement, nt:RepeatableStatement ;
    rdf:subject sub:paper ;
    rdf:predicate ex:tag ;
    rdf:object sub:tag .

  sub:stGroup a nt:GroupedStatement, nt:OptionalStatement ;
    nt:hasStatement sub:g1, sub:g2 .

  sub:g1 rdf:subject sub:topic ; rdf:predicate ex:p1 ; rdf:object "v1" .
  sub:g2 rdf:subject sub:topic ; rdf:predicate ex:p2 ; rdf:object "v2" .

  sub:paper a nt:ExternalUriPlaceholder ; rdfs:label "Paper" .
  sub:topic a nt:RestrictedChoicePlaceholder ;
    rdfs:label "Topic" ;
    nt:possibleValue <http://example.org/A>, <http://example.org/B> .
  sub:tag a nt:AutoEscapeUriPlaceholder ; nt:hasPrefix "http://x.org/r/" .

  ex:topic rdfs:label "Main topic" ; rdfs:comment "What the paper is about" .
}
"#;

    fn parse(text: &str) -> Template {
        let prefixes = crate::build_prefix_table(text, None);
        let config = SyntaxConfig::default();
        TemplateParser::new(&prefixes, &config).parse(text)
    }

    #[test]
    fn test_metadata_and_order() {
        let template = parse(TEMPLATE);
        assert_eq!(template.title.as_deref(), Some("Describing a paper"));
        assert_eq!(template.description.as_deref(), Some("Links a paper to its topics"));
        assert_eq!(template.tag.as_deref(), Some("Papers"));
        assert_eq!(template.statement_order, vec!["sub:st1", "sub:st2", "sub:stMissing"]);
    }

    #[test]
    fn test_statements_and_flags() {
        let template = parse(TEMPLATE);
        let st1 = template.statement("sub:st1").unwrap();
        assert_eq!(st1.subject, "sub:paper");
        assert_eq!(st1.predicate, "http://example.org/topic");
        assert_eq!(st1.object, "sub:topic");
        assert!(!st1.optional && !st1.repeatable);

        let st2 = template.statement("sub:st2").unwrap();
        assert!(st2.optional && st2.repeatable && !st2.grouped);

        assert!(template.statement("sub:stMissing").is_none());
        assert_eq!(template.statement("sub:g1").map(|s| s.object.as_str()), Some("v1"));
        assert_eq!(template.ordered_statements().count(), 2);
    }

    #[test]
    fn test_groups() {
        let template = parse(TEMPLATE);
        assert_eq!(template.grouped_statements.len(), 1);
        let group = &template.grouped_statements[0];
        assert_eq!(group.id, "sub:stGroup");
        assert_eq!(group.statement_ids, vec!["sub:g1", "sub:g2"]);
        assert!(group.optional);
    }

    #[test]
    fn test_placeholders() {
        let template = parse(TEMPLATE);
        let topic = template.placeholder("sub:topic").unwrap();
        assert_eq!(topic.kinds, vec![PlaceholderKind::RestrictedChoicePlaceholder]);
        assert_eq!(topic.label, "Topic");
        assert_eq!(topic.possible_values, vec!["http://example.org/A", "http://example.org/B"]);

        let tag = template.placeholder("sub:tag").unwrap();
        assert_eq!(tag.prefix.as_deref(), Some("http://x.org/r/"));
        assert!(tag.label().is_none());

        assert!(template.placeholder("sub:st1").is_none());
    }

    #[test]
    fn test_labels() {
        let template = parse(TEMPLATE);
        let topic = &template.labels["http://example.org/topic"];
        assert_eq!(topic.as_str(), "Main topic");
        assert_eq!(topic.description(), Some("What the paper is about"));
        assert_eq!(template.labels["sub:paper"], Label::text("Paper"));
    }

    #[test]
    fn test_empty_template() {
        assert!(parse("").is_empty());
        assert!(parse("@prefix ex: <http://example.org/> .").is_empty());
    }

    #[test]
    fn test_bare_text_without_blocks() {
        let text = "@prefix nt: <https://w3id.org/np/o/ntemplate/> .\n\
                    @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .\n\
                    sub:t nt:hasStatement sub:s .\n\
                    sub:s rdf:subject nt:CREATOR ; rdf:predicate <http://ex.org/p> ; rdf:object sub:x .";
        let template = parse(text);
        assert_eq!(template.statement_order, vec!["sub:s"]);
        assert_eq!(template.statement("sub:s").map(|s| s.subject.as_str()), Some("CREATOR"));
    }
}
