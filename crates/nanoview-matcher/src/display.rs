//! Display resolution: what a field value and a field label look like

use nanoview_domain::label::{iri_label, simple_label};
use nanoview_domain::vocab::is_http_iri;
use nanoview_domain::{Label, Template, Triple};
use percent_encoding::percent_decode_str;
use std::collections::{BTreeSet, HashMap};

/// Labels known for a document besides those of its template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelContext {
    /// Labels the publication info carries (`hasLabelFromApi`)
    pub pubinfo: HashMap<String, Label>,

    /// Labels answered by the label resolver
    pub resolved: HashMap<String, Label>,

    /// Show http(s) values without a label by their path-segment label.
    /// Set when the resolver failed or timed out.
    pub heuristic: bool,
}

impl LabelContext {
    /// Context with no labels
    pub fn new() -> Self {
        Self::default()
    }

    /// Context with resolver answers only
    pub fn with_resolved(resolved: HashMap<String, Label>) -> Self {
        Self {
            resolved,
            ..Self::default()
        }
    }

    /// Context for a failed resolver: unlabelled IRIs get heuristic labels
    pub fn heuristic() -> Self {
        Self {
            heuristic: true,
            ..Self::default()
        }
    }

    /// Pubinfo label, else resolver label
    pub fn lookup(&self, iri: &str) -> Option<&Label> {
        self.pubinfo.get(iri).or_else(|| self.resolved.get(iri))
    }

    /// Display of a value: template label, pubinfo label, resolver label,
    /// heuristic label when resolution failed, else the raw text
    pub fn display(&self, template: &Template, raw: &str) -> Label {
        if let Some(label) = template.labels.get(raw).or_else(|| self.lookup(raw)) {
            return label.clone();
        }
        if self.heuristic && is_http_iri(raw) {
            let label = iri_label(raw);
            if !label.is_empty() {
                return Label::text(label);
            }
        }
        Label::text(raw)
    }

    /// Label of an unmatched triple's predicate
    pub fn predicate_label(&self, template: &Template, predicate: &str) -> Label {
        template
            .labels
            .get(predicate)
            .or_else(|| self.lookup(predicate))
            .cloned()
            .unwrap_or_else(|| Label::text(simple_label(predicate)))
    }
}

/// Every distinct http(s) IRI of `triples`, sorted
pub fn label_batch(triples: &[Triple]) -> Vec<String> {
    let iris: BTreeSet<&str> = triples
        .iter()
        .flat_map(|t| [t.subject.as_str(), t.predicate.as_str(), t.object.as_str()])
        .filter(|v| is_http_iri(v))
        .collect();
    iris.into_iter().map(str::to_string).collect()
}

/// Text of an escaped IRI: `prefix` stripped, `+` read as space, percent-decoded.
///
/// `None` when `raw` does not start with `prefix`.
pub fn decode_auto_escape(raw: &str, prefix: &str) -> Option<String> {
    let encoded = raw.strip_prefix(prefix)?;
    let spaced = encoded.replace('+', " ");
    Some(percent_decode_str(&spaced).decode_utf8_lossy().into_owned())
}

/// DOI display text with any whitespace removed
pub fn clean_doi(display: &Label) -> Label {
    match display {
        Label::Text(text) => Label::text(text.split_whitespace().collect::<String>()),
        described => described.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_auto_escape() {
        assert_eq!(
            decode_auto_escape("http://x.org/r/hello%20world", "http://x.org/r/").as_deref(),
            Some("hello world")
        );
        assert_eq!(
            decode_auto_escape("http://x.org/r/a+b%2Bc", "http://x.org/r/").as_deref(),
            Some("a b+c")
        );
        assert!(decode_auto_escape("http://other.org/x", "http://x.org/r/").is_none());
    }

    #[test]
    fn test_display_precedence() {
        let mut template = Template::default();
        template.labels.insert("http://ex.org/a".into(), Label::text("From template"));

        let mut labels = LabelContext::new();
        labels.pubinfo.insert("http://ex.org/a".into(), Label::text("From pubinfo"));
        labels.pubinfo.insert("http://ex.org/b".into(), Label::text("Pubinfo B"));
        labels.resolved.insert("http://ex.org/b".into(), Label::text("Resolved B"));
        labels.resolved.insert("http://ex.org/c".into(), Label::described("C", Some("desc".into())));

        assert_eq!(labels.display(&template, "http://ex.org/a").as_str(), "From template");
        assert_eq!(labels.display(&template, "http://ex.org/b").as_str(), "Pubinfo B");
        assert!(labels.display(&template, "http://ex.org/c").is_described());
        assert_eq!(labels.display(&template, "plain text").as_str(), "plain text");
    }

    #[test]
    fn test_failed_resolution_uses_path_segment_labels() {
        let template = Template::default();
        let raw = "http://www.wikidata.org/entity/some_topic";
        assert_eq!(LabelContext::new().display(&template, raw).as_str(), raw);

        let mut labels = LabelContext::heuristic();
        assert_eq!(labels.display(&template, raw).as_str(), "Some topic");
        assert_eq!(labels.display(&template, "plain text").as_str(), "plain text");
        assert_eq!(labels.display(&template, "sub:local").as_str(), "sub:local");

        labels.pubinfo.insert(raw.into(), Label::text("From pubinfo"));
        assert_eq!(labels.display(&template, raw).as_str(), "From pubinfo");
    }

    #[test]
    fn test_predicate_label_falls_back_to_heuristic() {
        let labels = LabelContext::new();
        let label = labels.predicate_label(&Template::default(), "http://ex.org/hasAuthor");
        assert_eq!(label.as_str(), "Has Author");
    }

    #[test]
    fn test_label_batch_is_sorted_and_distinct() {
        let triples = vec![
            Triple::new("http://ex.org/b", "http://ex.org/p", "literal"),
            Triple::new("sub:x", "http://ex.org/p", "http://ex.org/a"),
        ];
        assert_eq!(
            label_batch(&triples),
            vec!["http://ex.org/a", "http://ex.org/b", "http://ex.org/p"]
        );
    }

    #[test]
    fn test_clean_doi() {
        let cleaned = clean_doi(&Label::text("https://doi.org/10.1234/ ab c"));
        assert_eq!(cleaned.as_str(), "https://doi.org/10.1234/abc");
    }
}
