//! Graph block extraction and statement splitting

use crate::scanner::{is_structural_offset, split_structural, Scanner};
use nanoview_domain::{GraphName, PrefixTable};
use tracing::debug;

/// How a document names its graphs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Addressing {
    /// `sub:assertion {`, with a local namespace ending in `/`
    Slash {
        /// Local namespace
        base: String,
    },
    /// `<base#/assertion> {` or `<base#assertion> {`
    Hash {
        /// Local namespace, ending in `#`
        base: String,
    },
    /// Local namespace missing or of another shape; every marker form is tried
    Unknown {
        /// First `<...#` IRI of the document, up to and including the `#`
        guessed_base: Option<String>,
    },
}

impl Addressing {
    /// Opening markers to try for `graph`, most specific first
    pub fn markers(&self, graph: GraphName, local_prefix: &str) -> Vec<String> {
        let name = graph.as_str();
        match self {
            Addressing::Slash { .. } => vec![format!("{}:{}", local_prefix, name)],
            Addressing::Hash { base } => vec![
                format!("<{}/{}>", base, name),
                format!("<{}{}>", base, name),
                format!("{}:{}", local_prefix, name),
            ],
            Addressing::Unknown { guessed_base } => {
                let mut markers = vec![format!("{}:{}", local_prefix, name)];
                if let Some(base) = guessed_base {
                    markers.push(format!("<{}/{}>", base, name));
                    markers.push(format!("<{}{}>", base, name));
                }
                markers
            }
        }
    }
}

/// Decide the addressing style from the local prefix declaration
pub fn detect_addressing(text: &str, prefixes: &PrefixTable, local_prefix: &str) -> Addressing {
    match prefixes.get(local_prefix) {
        Some(base) if base.ends_with('/') => Addressing::Slash {
            base: base.to_string(),
        },
        Some(base) if base.ends_with('#') => Addressing::Hash {
            base: base.to_string(),
        },
        _ => {
            debug!("No usable '{}:' declaration; trying every graph marker", local_prefix);
            Addressing::Unknown {
                guessed_base: guess_hash_base(text),
            }
        }
    }
}

fn guess_hash_base(text: &str) -> Option<String> {
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        let close = after.find('>')?;
        let iri = &after[..close];
        if let Some(hash) = iri.rfind('#') {
            return Some(iri[..=hash].to_string());
        }
        rest = &after[close + 1..];
    }
    None
}

/// Contents of `graph`'s block, trying each marker of `addressing` in turn
pub fn extract_graph_block<'a>(
    text: &'a str,
    graph: GraphName,
    addressing: &Addressing,
    local_prefix: &str,
) -> Option<&'a str> {
    for marker in addressing.markers(graph, local_prefix) {
        if let Some(block) = extract_block_after(text, &marker) {
            debug!("Extracted {} graph using marker {}", graph, marker);
            return Some(block);
        }
    }
    debug!("No block found for {} graph", graph);
    None
}

/// Contents of the first balanced `{ ... }` following a structural `marker`
pub fn extract_block_after<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let mut search = 0;
    while let Some(found) = text[search..].find(marker) {
        let at = search + found;
        search = at + marker.len();

        let after = &text[search..];
        let gap = after.len() - after.trim_start().len();
        if !after[gap..].starts_with('{') || !is_structural_offset(text, at) {
            continue;
        }
        return balanced_contents(text, search + gap + 1);
    }
    None
}

/// Text from `start` up to the `}` that closes an already open brace
fn balanced_contents(text: &str, start: usize) -> Option<&str> {
    let mut depth = 1usize;
    for step in Scanner::new(&text[start..]) {
        if !step.is_structural() {
            continue;
        }
        match step.ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + step.offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Contents of every top-level `{ ... }` block, in document order
pub fn top_level_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for step in Scanner::new(text).filter(|s| s.is_structural()) {
        match step.ch {
            '{' => {
                if depth == 0 {
                    start = step.offset + 1;
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    blocks.push(&text[start..step.offset]);
                }
            }
            _ => {}
        }
    }
    blocks
}

/// Split a block into statements on `.` followed by whitespace or end of input
pub fn split_statements(text: &str) -> Vec<&str> {
    split_structural(text, |c, rest| {
        c == '.' && rest.chars().next().map_or(true, char::is_whitespace)
    })
}

/// Split a statement into predicate-object groups on `;`
pub fn split_by_semicolon(text: &str) -> Vec<&str> {
    split_structural(text, |c, _| c == ';')
}

/// Split an object list on `,`
pub fn split_objects(text: &str) -> Vec<&str> {
    split_structural(text, |c, _| c == ',')
}
