//! Matched fields - the structured view handed to the rendering layer

use crate::{Label, PlaceholderKind};

/// Statement id given to the main-entity field
pub const MAIN_ENTITY_STATEMENT: &str = "main-entity";

/// One value of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    /// Value as it appears in the assertion graph
    pub raw: String,

    /// Value as it should be shown
    pub display: Label,

    /// Subject of the triple the value came from, for statement fields
    pub subject: Option<String>,
}

impl FieldValue {
    /// A value displayed as its raw text
    pub fn raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self {
            display: Label::text(raw.clone()),
            raw,
            subject: None,
        }
    }

    /// Set the displayed label
    pub fn with_display(mut self, display: Label) -> Self {
        self.display = display;
        self
    }

    /// Record the subject of the source triple
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

/// One labelled, ordered entry of the structured view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchedField {
    /// Template statement id (`main-entity`, `<id>-subject`), or `None` when unmatched
    pub statement_id: Option<String>,

    /// Placeholder whose values this field shows
    pub placeholder_id: Option<String>,

    /// Field label
    pub label: Label,

    /// Predicate IRI the values were found under
    pub predicate_uri: Option<String>,

    /// Values in assertion order
    pub values: Vec<FieldValue>,

    /// Placeholder kinds of the value slot
    pub kinds: Vec<PlaceholderKind>,

    /// The statement may occur several times
    pub repeatable: bool,

    /// The statement may be absent
    pub optional: bool,

    /// This field shows the main entity
    pub is_main_entity: bool,

    /// This field shows a placeholder acting as subject
    pub is_subject_field: bool,

    /// Display values were percent-decoded from an escaped IRI
    pub is_decoded_uri: bool,

    /// No template statement accounts for this field
    pub unmatched: bool,
}

impl MatchedField {
    /// Field shown for a triple no template statement accounts for
    pub fn unmatched(label: Label, predicate: impl Into<String>, value: FieldValue) -> Self {
        Self {
            label,
            predicate_uri: Some(predicate.into()),
            values: vec![value],
            unmatched: true,
            ..Default::default()
        }
    }

    /// Whether the field has a value with this raw text
    pub fn has_raw_value(&self, raw: &str) -> bool {
        self.values.iter().any(|v| v.raw == raw)
    }

    /// Raw values in order
    pub fn raw_values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|v| v.raw.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_builders() {
        let value = FieldValue::raw("http://ex.org/a")
            .with_display(Label::text("A"))
            .with_subject("http://ex.org/s");
        assert_eq!(value.raw, "http://ex.org/a");
        assert_eq!(value.display.as_str(), "A");
        assert_eq!(value.subject.as_deref(), Some("http://ex.org/s"));
    }

    #[test]
    fn test_unmatched_field() {
        let field = MatchedField::unmatched(
            Label::text("Type"),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
            FieldValue::raw("http://ex.org/Thing"),
        );
        assert!(field.unmatched);
        assert!(field.statement_id.is_none());
        assert!(field.has_raw_value("http://ex.org/Thing"));
        assert_eq!(field.raw_values().count(), 1);
    }
}
