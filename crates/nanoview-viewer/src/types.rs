//! Request and response types for viewing

use nanoview_domain::{Graph, Label, MatchedField, Triple};
use nanoview_matcher::{MainEntity, PlaceholderBindings};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request to view one nanopublication
#[derive(Debug, Clone)]
pub struct ViewRequest {
    /// Nanopublication text
    pub document: String,

    /// Text of the template it was created from, when available
    pub template: Option<String>,
}

impl ViewRequest {
    /// View a document without a template
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            template: None,
        }
    }

    /// Match the document against `template`
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }
}

/// Metadata of a nanopublication, read from its pubinfo and provenance graphs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationInfo {
    /// Nanopublication IRI
    pub uri: Option<String>,

    /// `rdfs:label` of the publication, else the template title
    pub title: Option<String>,

    /// `dct:creator`
    pub author: Option<String>,

    /// `foaf:name` of the creator
    pub author_name: Option<String>,

    /// ORCID IRI the assertion is attributed to
    pub author_orcid: Option<String>,

    /// `dct:created`, as written
    pub date: Option<String>,

    /// License IRI
    pub license: Option<String>,

    /// Labels the publication carries for the entities it mentions
    pub entity_labels: BTreeMap<String, String>,

    /// Assertion template IRI
    pub template_uri: Option<String>,

    /// Provenance template IRI
    pub provenance_template_uri: Option<String>,

    /// Pubinfo template IRI
    pub pubinfo_template_uri: Option<String>,
}

/// Result of viewing a nanopublication
#[derive(Debug, Clone)]
pub struct ViewResult {
    /// Publication metadata
    pub info: PublicationInfo,

    /// Template title
    pub template_title: Option<String>,

    /// Template tag
    pub template_tag: Option<String>,

    /// Template description
    pub template_description: Option<String>,

    /// Fields accounted for by the template, in display order
    pub fields: Vec<MatchedField>,

    /// Fields for assertion triples no statement accounts for
    pub unmatched: Vec<MatchedField>,

    /// Detected main entity
    pub main_entity: Option<MainEntity>,

    /// Placeholder values bound while matching
    pub bindings: PlaceholderBindings,

    /// Assertion graph
    pub assertion: Graph,

    /// Provenance graph
    pub provenance: Graph,

    /// Publication info graph
    pub pubinfo: Graph,

    /// Whether the label resolver answered in time
    pub labels_resolved: bool,
}

impl ViewResult {
    /// Whether a non-empty template drove the view
    pub fn has_template(&self) -> bool {
        self.template_title.is_some() || !self.fields.is_empty()
    }

    /// Serializable summary, optionally carrying the raw graphs
    pub fn summary(&self, with_graphs: bool) -> ViewSummary {
        ViewSummary {
            info: self.info.clone(),
            template: self.template_title.as_ref().map(|title| TemplateSummary {
                title: title.clone(),
                tag: self.template_tag.clone(),
                description: self.template_description.clone(),
            }),
            main_entity: self.main_entity.as_ref().map(|m| m.value.clone()),
            fields: self.fields.iter().map(FieldSummary::from).collect(),
            unmatched: self.unmatched.iter().map(FieldSummary::from).collect(),
            graphs: with_graphs.then(|| GraphsSummary {
                assertion: self.assertion.iter().map(TripleSummary::from).collect(),
                provenance: self.provenance.iter().map(TripleSummary::from).collect(),
                pubinfo: self.pubinfo.iter().map(TripleSummary::from).collect(),
            }),
        }
    }

    /// Summary as pretty-printed JSON
    pub fn to_json(&self, with_graphs: bool) -> Result<String, crate::ViewerError> {
        Ok(serde_json::to_string_pretty(&self.summary(with_graphs))?)
    }
}

/// Serializable view of a [`ViewResult`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSummary {
    /// Publication metadata
    pub info: PublicationInfo,

    /// Template metadata, when a titled template was used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateSummary>,

    /// Main entity value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_entity: Option<String>,

    /// Structured fields
    pub fields: Vec<FieldSummary>,

    /// Unmatched fields
    pub unmatched: Vec<FieldSummary>,

    /// Raw graphs, on request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphs: Option<GraphsSummary>,
}

/// Template metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSummary {
    /// Title
    pub title: String,
    /// Tag
    pub tag: Option<String>,
    /// Description
    pub description: Option<String>,
}

/// Serializable [`MatchedField`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSummary {
    /// Template statement id
    pub statement_id: Option<String>,
    /// Field label
    pub label: String,
    /// Label description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Predicate IRI
    pub predicate: Option<String>,
    /// Placeholder kinds
    pub kinds: Vec<String>,
    /// Values in order
    pub values: Vec<ValueSummary>,
    /// Main-entity field
    pub main_entity: bool,
    /// Subject field of a secondary entity
    pub subject_field: bool,
}

/// Serializable field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueSummary {
    /// Value as written in the graph
    pub raw: String,
    /// Value as shown
    pub display: String,
    /// Description of the shown label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The three graphs as plain triples
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphsSummary {
    /// Assertion triples
    pub assertion: Vec<TripleSummary>,
    /// Provenance triples
    pub provenance: Vec<TripleSummary>,
    /// Pubinfo triples
    pub pubinfo: Vec<TripleSummary>,
}

/// Serializable [`Triple`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripleSummary {
    /// Subject
    pub subject: String,
    /// Predicate
    pub predicate: String,
    /// Object
    pub object: String,
}

impl From<&Triple> for TripleSummary {
    fn from(t: &Triple) -> Self {
        Self {
            subject: t.subject.clone(),
            predicate: t.predicate.clone(),
            object: t.object.clone(),
        }
    }
}

fn description(label: &Label) -> Option<String> {
    label.description().map(str::to_string)
}

impl From<&MatchedField> for FieldSummary {
    fn from(field: &MatchedField) -> Self {
        Self {
            statement_id: field.statement_id.clone(),
            label: field.label.as_str().to_string(),
            description: description(&field.label),
            predicate: field.predicate_uri.clone(),
            kinds: field.kinds.iter().map(|k| k.as_str().to_string()).collect(),
            values: field
                .values
                .iter()
                .map(|v| ValueSummary {
                    raw: v.raw.clone(),
                    display: v.display.as_str().to_string(),
                    description: description(&v.display),
                })
                .collect(),
            main_entity: field.is_main_entity,
            subject_field: field.is_subject_field,
        }
    }
}
