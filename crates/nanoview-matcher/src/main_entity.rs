//! Main entity detection

use crate::MatcherConfig;
use nanoview_domain::vocab::CREATOR;
use nanoview_domain::{Template, Term, Triple};
use tracing::debug;

/// The placeholder most statements describe, and its value in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainEntity {
    /// Placeholder id
    pub placeholder: String,

    /// Concrete value in the assertion graph
    pub value: String,

    /// Whether the entity gets a field of its own
    pub visible: bool,
}

/// First placeholder referenced more than once across the template's
/// statements, counting objects before subjects within each statement
pub fn main_placeholder<'t>(template: &'t Template, config: &MatcherConfig) -> Option<&'t str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for stmt in template.ordered_statements() {
        for reference in [stmt.object.as_str(), stmt.subject.as_str()] {
            if reference == CREATOR || !config.is_local(reference) {
                continue;
            }
            match counts.iter_mut().find(|(id, _)| *id == reference) {
                Some((_, count)) => *count += 1,
                None => counts.push((reference, 1)),
            }
        }
    }
    counts
        .into_iter()
        .find(|(_, count)| *count > 1)
        .map(|(id, _)| id)
}

/// Detect the main entity of `triples` under `template`
pub fn detect_main_entity(
    template: &Template,
    triples: &[Triple],
    config: &MatcherConfig,
) -> Option<MainEntity> {
    let placeholder = main_placeholder(template, config)?;
    let value = hub_value(triples)
        .or_else(|| first_statement_subject(template, placeholder, triples))
        .or_else(|| linked_subject(triples, config))?;

    let visible = !template
        .placeholder(placeholder)
        .map_or(false, |p| p.is_resource_only());

    debug!("Main entity {} = {} (visible: {})", placeholder, value, visible);
    Some(MainEntity {
        placeholder: placeholder.to_string(),
        value: value.to_string(),
        visible,
    })
}

/// Object of the first triple whose absolute IRI object is the subject of another triple
fn hub_value(triples: &[Triple]) -> Option<&str> {
    triples.iter().enumerate().find_map(|(i, triple)| {
        let object = triple.object.as_str();
        let is_hub = Term::classify(object, "").is_iri()
            && triples
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && other.subject == object);
        is_hub.then_some(object)
    })
}

/// Subject of the first triple carrying the first statement's predicate,
/// when that statement's subject is the main placeholder
fn first_statement_subject<'a>(
    template: &Template,
    placeholder: &str,
    triples: &'a [Triple],
) -> Option<&'a str> {
    let first = template.ordered_statements().next()?;
    if first.subject != placeholder {
        return None;
    }
    triples
        .iter()
        .find(|t| t.predicate == first.predicate)
        .map(|t| t.subject.as_str())
}

/// First subject that is also an object somewhere, or is a local reference
fn linked_subject<'a>(triples: &'a [Triple], config: &MatcherConfig) -> Option<&'a str> {
    triples.iter().map(|t| t.subject.as_str()).find(|subject| {
        let local = config.is_local(subject);
        let iri = Term::classify(subject, "").is_iri();
        (iri || local) && (local || triples.iter().any(|t| t.object == *subject))
    })
}
