//! Triple parser: turns a graph block into resolved triples

use crate::lexer::{split_by_semicolon, split_objects, split_statements};
use crate::SyntaxConfig;
use nanoview_domain::vocab::{CREATOR, RDF_TYPE};
use nanoview_domain::{PrefixTable, Triple};
use tracing::debug;

/// Parses statement text against a prefix table
#[derive(Debug, Clone)]
pub struct TripleParser<'a> {
    prefixes: &'a PrefixTable,
    config: &'a SyntaxConfig,
    local_marker: String,
}

impl<'a> TripleParser<'a> {
    /// Create a parser that expands names through `prefixes`
    pub fn new(prefixes: &'a PrefixTable, config: &'a SyntaxConfig) -> Self {
        Self {
            prefixes,
            config,
            local_marker: config.local_marker(),
        }
    }

    /// Parse every statement of `block`, in order.
    ///
    /// Malformed statements and directives are skipped.
    pub fn parse_triples(&self, block: &str) -> Vec<Triple> {
        let mut triples = Vec::new();

        for statement in split_statements(block) {
            if is_directive(statement) {
                continue;
            }

            let mut groups = split_by_semicolon(statement).into_iter();
            let Some((subject, first)) = groups.next().and_then(split_head) else {
                debug!("Skipping statement without predicate: {}", statement);
                continue;
            };

            let subject = self.expand_uri(subject);
            self.push_group(&subject, first, &mut triples);
            for group in groups {
                self.push_group(&subject, group, &mut triples);
            }
        }

        triples
    }

    /// One `predicate object, object...` group
    fn push_group(&self, subject: &str, group: &str, triples: &mut Vec<Triple>) {
        let Some((predicate, objects)) = split_head(group) else {
            debug!("Skipping predicate group without objects: {}", group);
            return;
        };
        let predicate = self.expand_uri(predicate);
        for object in split_objects(objects) {
            triples.push(Triple::new(subject, predicate.as_str(), self.clean_object(object)));
        }
    }

    /// Expand a name to an IRI.
    ///
    /// `<iri>` loses its brackets, `prefix:local` expands when the prefix is
    /// known, local names and unknown prefixes are kept as written.
    pub fn expand_uri(&self, token: &str) -> String {
        let token = token.trim();

        if token == "a" {
            return RDF_TYPE.to_string();
        }
        if token == self.config.creator_token {
            return CREATOR.to_string();
        }
        if token.len() >= 2 && token.starts_with('<') && token.ends_with('>') {
            return token[1..token.len() - 1].to_string();
        }
        if token.starts_with(&self.local_marker) {
            return token.to_string();
        }

        token
            .split_once(':')
            .and_then(|(prefix, local)| self.prefixes.resolve(prefix, local))
            .unwrap_or_else(|| token.to_string())
    }

    /// Reduce an object token to its value: literal text or an expanded IRI
    pub fn clean_object(&self, object: &str) -> String {
        let object = object.trim();

        if let Some(body) = object.strip_prefix("\"\"\"") {
            return match closing_triple_quote(body) {
                Some(end) => body[..end].to_string(),
                None => body.split("^^").next().unwrap_or(body).to_string(),
            };
        }

        let object = object
            .strip_suffix('.')
            .or_else(|| object.strip_suffix(';'))
            .map_or(object, str::trim_end);

        if let Some(body) = object.strip_prefix('"') {
            // a datatype or language tag after the closing quote goes with it
            return match body.rfind('"') {
                Some(end) => body[..end].to_string(),
                None => body.to_string(),
            };
        }

        let object = match object.split_once("^^") {
            Some((value, _)) => value.trim(),
            None => object,
        };
        self.expand_uri(object)
    }
}

fn is_directive(statement: &str) -> bool {
    let head = statement.split_whitespace().next().unwrap_or("");
    head.starts_with('@') || head.eq_ignore_ascii_case("PREFIX") || head.eq_ignore_ascii_case("BASE")
}

/// Split off the first whitespace-delimited token
fn split_head(text: &str) -> Option<(&str, &str)> {
    let text = text.trim();
    let end = text.find(char::is_whitespace)?;
    let rest = text[end..].trim_start();
    if rest.is_empty() {
        None
    } else {
        Some((&text[..end], rest))
    }
}

/// Offset of the first `"""` not preceded by an odd run of backslashes
fn closing_triple_quote(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut search = 0;
    while let Some(found) = body[search..].find("\"\"\"") {
        let at = search + found;
        let backslashes = bytes[..at].iter().rev().take_while(|&&b| b == b'\\').count();
        if backslashes % 2 == 0 {
            return Some(at);
        }
        search = at + 1;
    }
    None
}
