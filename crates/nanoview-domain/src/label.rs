//! Labels and the heuristics used when no label is known

use std::fmt;

/// A human label for an IRI or a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// Plain text
    Text(String),

    /// A label with an optional description
    Described {
        /// The label itself
        label: String,
        /// Longer description, when the source provides one
        description: Option<String>,
    },
}

impl Label {
    /// Plain-text label
    pub fn text(value: impl Into<String>) -> Self {
        Label::Text(value.into())
    }

    /// Label with a description
    pub fn described(label: impl Into<String>, description: Option<String>) -> Self {
        Label::Described {
            label: label.into(),
            description,
        }
    }

    /// The label text, without any description
    pub fn as_str(&self) -> &str {
        match self {
            Label::Text(text) => text,
            Label::Described { label, .. } => label,
        }
    }

    /// The description, if any
    pub fn description(&self) -> Option<&str> {
        match self {
            Label::Text(_) => None,
            Label::Described { description, .. } => description.as_deref(),
        }
    }

    /// Whether the label carries structure beyond plain text
    pub fn is_described(&self) -> bool {
        matches!(self, Label::Described { .. })
    }
}

impl Default for Label {
    fn default() -> Self {
        Label::Text(String::new())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::text(value)
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Text(value)
    }
}

/// Field label derived from a predicate IRI's local name.
///
/// Splits camelCase with spaces and capitalizes a leading `has`:
/// `http://ex.org/hasAuthor` becomes `Has Author`.
pub fn simple_label(iri: &str) -> String {
    let local = iri.rsplit(|c| c == '/' || c == '#').next().unwrap_or(iri);
    let split = split_camel_case(local);
    let split = match split.strip_prefix("has") {
        Some(rest) => format!("Has{}", rest),
        None => split,
    };
    split.trim().to_string()
}

/// Label derived from an IRI's path segments, used when resolution fails.
///
/// Takes the last non-empty segment, splits camelCase, turns `_`/`-` into
/// spaces and capitalizes the first letter.
pub fn iri_label(iri: &str) -> String {
    let mut segments = iri.split(|c| c == '/' || c == '#');
    let last = segments.next_back().unwrap_or("");
    let segment = if last.is_empty() {
        segments.next_back().unwrap_or("")
    } else {
        last
    };

    let split = split_camel_case(segment);
    let split = match split.strip_prefix("has") {
        Some(rest) => format!("Has{}", rest),
        None => split,
    };
    let words: Vec<&str> = split
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .collect();
    capitalize_first(&words.join(" "))
}

fn split_camel_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        if c.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
