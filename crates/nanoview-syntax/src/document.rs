//! Nanopublication documents

use crate::lexer::{detect_addressing, extract_graph_block, Addressing};
use crate::prefix::extract_prefixes;
use crate::triples::TripleParser;
use crate::{SyntaxConfig, SyntaxError};
use nanoview_domain::{Graph, GraphName, PrefixTable};
use tracing::debug;

/// A parsed nanopublication
#[derive(Debug, Clone)]
pub struct Document {
    /// Prefixes of the document, then those of its template
    pub prefixes: PrefixTable,

    /// How the document names its graphs
    pub addressing: Addressing,

    /// Assertion graph
    pub assertion: Graph,

    /// Provenance graph
    pub provenance: Graph,

    /// Publication info graph
    pub pubinfo: Graph,

    /// Nanopublication IRI, from the `this:` declaration
    pub uri: Option<String>,

    missing: Vec<GraphName>,
}

impl Document {
    /// Graph by name
    pub fn graph(&self, name: GraphName) -> &Graph {
        match name {
            GraphName::Assertion => &self.assertion,
            GraphName::Provenance => &self.provenance,
            GraphName::Pubinfo => &self.pubinfo,
        }
    }

    /// Whether the document had a block for `name`
    pub fn has_graph(&self, name: GraphName) -> bool {
        !self.missing.contains(&name)
    }

    /// Graph by name, failing when its block was absent
    pub fn require(&self, name: GraphName) -> Result<&Graph, SyntaxError> {
        if self.has_graph(name) {
            Ok(self.graph(name))
        } else {
            Err(SyntaxError::MissingGraph(name))
        }
    }

    /// Names of the graphs whose blocks were absent
    pub fn missing_graphs(&self) -> &[GraphName] {
        &self.missing
    }
}

/// Parse a nanopublication.
///
/// `template` only contributes prefix declarations the document lacks.
/// Absent graphs come back empty.
pub fn parse_document(text: &str, template: Option<&str>, config: &SyntaxConfig) -> Document {
    let own_prefixes = extract_prefixes(text);
    let addressing = detect_addressing(text, &own_prefixes, &config.local_prefix);
    let uri = own_prefixes.get("this").map(str::to_string);

    let mut prefixes = own_prefixes;
    if let Some(template) = template {
        prefixes.merge_missing(&extract_prefixes(template));
    }

    let parser = TripleParser::new(&prefixes, config);
    let mut missing = Vec::new();
    let mut extract = |name: GraphName| {
        match extract_graph_block(text, name, &addressing, &config.local_prefix) {
            Some(block) => Graph::new(name, parser.parse_triples(block)),
            None => {
                missing.push(name);
                Graph::empty(name)
            }
        }
    };
    let assertion = extract(GraphName::Assertion);
    let provenance = extract(GraphName::Provenance);
    let pubinfo = extract(GraphName::Pubinfo);

    debug!(
        "Parsed document: {} assertion, {} provenance, {} pubinfo triples",
        assertion.len(),
        provenance.len(),
        pubinfo.len()
    );

    Document {
        prefixes,
        addressing,
        assertion,
        provenance,
        pubinfo,
        uri,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_graphs_are_empty() {
        let text = "@prefix sub: <http://ex.org/np/> .\nsub:assertion { <http://ex.org/a> a <http://ex.org/T> . }";
        let doc = parse_document(text, None, &SyntaxConfig::default());
        assert_eq!(doc.assertion.len(), 1);
        assert!(doc.provenance.is_empty());
        assert_eq!(doc.missing_graphs(), &[GraphName::Provenance, GraphName::Pubinfo]);
        assert!(doc.require(GraphName::Assertion).is_ok());
        assert!(matches!(
            doc.require(GraphName::Pubinfo),
            Err(SyntaxError::MissingGraph(GraphName::Pubinfo))
        ));
    }

    #[test]
    fn test_template_prefixes_fill_gaps_only() {
        let text = "@prefix ex: <http://doc.org/> .\n@prefix sub: <http://doc.org/np/> .\n\
                    sub:assertion { ex:a ex:p tpl:b . }";
        let template = "@prefix ex: <http://template.org/> .\n@prefix tpl: <http://template.org/t/> .";
        let doc = parse_document(text, Some(template), &SyntaxConfig::default());
        assert_eq!(doc.assertion.triples[0].subject, "http://doc.org/a");
        assert_eq!(doc.assertion.triples[0].object, "http://template.org/t/b");
    }
}
