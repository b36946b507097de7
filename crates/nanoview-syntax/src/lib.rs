//! Nanoview Syntax
//!
//! Reads the TriG-like text of nanopublications and their templates.
//!
//! # Overview
//!
//! Documents are parsed in four passes, each of which degrades to omission
//! instead of failing:
//!
//! ```text
//! text → prefix table → graph blocks → statements → triples
//!                                                  ↘ template
//! ```
//!
//! Only the nanopublication subset of the syntax is accepted: prefix
//! declarations, three named graphs, `;`/`,` lists, quoted and triple-quoted
//! literals. Blank nodes, collections and comments are not understood.
//!
//! # Example Usage
//!
//! ```
//! use nanoview_syntax::{parse_document, SyntaxConfig};
//!
//! let text = r#"@prefix sub: <http://example.org/np/> .
//! @prefix ex: <http://example.org/> .
//! sub:assertion { ex:paper ex:title "Hello, world" . }"#;
//!
//! let doc = parse_document(text, None, &SyntaxConfig::default());
//! assert_eq!(doc.assertion.triples[0].object, "Hello, world");
//! ```

#![warn(missing_docs)]

mod config;
mod document;
mod error;
pub mod lexer;
mod prefix;
pub mod scanner;
mod template;
mod triples;

#[cfg(test)]
mod tests;

pub use config::SyntaxConfig;
pub use document::{parse_document, Document};
pub use error::SyntaxError;
pub use lexer::{extract_graph_block, split_by_semicolon, split_objects, split_statements, Addressing};
pub use prefix::{build_prefix_table, extract_prefixes};
pub use scanner::{ScanState, Scanner};
pub use template::{template_from_triples, TemplateParser};
pub use triples::TripleParser;

use nanoview_domain::{PrefixTable, Template};

/// Parse template text with a prefix table built for it.
///
/// Missing or blank text yields an empty template.
pub fn parse_template(text: Option<&str>, prefixes: &PrefixTable, config: &SyntaxConfig) -> Template {
    match text {
        Some(text) => TemplateParser::new(prefixes, config).parse(text),
        None => Template::default(),
    }
}
