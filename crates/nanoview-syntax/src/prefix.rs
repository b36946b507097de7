//! Prefix table builder

use crate::scanner::Scanner;
use nanoview_domain::PrefixTable;
use tracing::debug;

/// Collect the `@prefix name: <iri> .` declarations of `text`.
///
/// Only declarations at structural positions count, so a declaration quoted
/// inside a literal is ignored. The empty prefix (`@prefix : <...>`) is
/// accepted. A repeated prefix keeps its first namespace.
pub fn extract_prefixes(text: &str) -> PrefixTable {
    let mut table = PrefixTable::new();
    for step in Scanner::new(text) {
        if !step.is_structural() || step.ch != '@' {
            continue;
        }
        let rest = &text[step.offset + 1..];
        if let Some((name, namespace)) = parse_declaration(rest) {
            if !table.declare(name, namespace) {
                debug!("Ignoring repeated declaration of prefix '{}'", name);
            }
        }
    }
    table
}

/// Parse `prefix name: <iri>` after the `@`
fn parse_declaration(rest: &str) -> Option<(&str, &str)> {
    let rest = rest.strip_prefix("prefix")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();

    let colon = rest.find(':')?;
    let name = &rest[..colon];
    if !name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.') {
        return None;
    }

    let rest = rest[colon + 1..].trim_start().strip_prefix('<')?;
    let close = rest.find('>')?;
    Some((name, &rest[..close]))
}

/// Prefix table for a document and its optional template.
///
/// Document declarations come first and win on conflict.
pub fn build_prefix_table(document: &str, template: Option<&str>) -> PrefixTable {
    let mut table = extract_prefixes(document);
    if let Some(template) = template {
        table.merge_missing(&extract_prefixes(template));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_prefixes() {
        let text = r#"@prefix dct: <http://purl.org/dc/terms/> .
@prefix : <http://example.org/default/> .
@prefix  ex-1: <http://example.org/one/>.
sub:x rdfs:comment "@prefix fake: <http://fake.org/> ." .
"#;
        let table = extract_prefixes(text);
        assert_eq!(table.get("dct"), Some("http://purl.org/dc/terms/"));
        assert_eq!(table.get(""), Some("http://example.org/default/"));
        assert_eq!(table.get("ex-1"), Some("http://example.org/one/"));
        assert!(table.get("fake").is_none());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_document_takes_precedence() {
        let doc = "@prefix ex: <http://doc.org/> .";
        let tpl = "@prefix ex: <http://template.org/> .\n@prefix nt: <https://w3id.org/np/o/ntemplate/> .";
        let table = build_prefix_table(doc, Some(tpl));
        assert_eq!(table.get("ex"), Some("http://doc.org/"));
        assert_eq!(table.get("nt"), Some("https://w3id.org/np/o/ntemplate/"));
    }

    #[test]
    fn test_language_tags_are_not_declarations() {
        let table = extract_prefixes(r#"sub:x rdfs:label "hello"@en ."#);
        assert!(table.is_empty());
    }
}
