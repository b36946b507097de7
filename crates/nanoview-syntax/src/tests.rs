//! Integration tests for the syntax layer

#[cfg(test)]
mod tests {
    use crate::{
        build_prefix_table, extract_graph_block, parse_document, parse_template, Addressing,
        SyntaxConfig, TripleParser,
    };
    use nanoview_domain::vocab::RDF_TYPE;
    use nanoview_domain::{GraphName, PrefixTable};

    const SLASH_NANOPUB: &str = r#"@prefix this: <https://w3id.org/np/RAexample> .
@prefix sub: <https://w3id.org/np/RAexample/> .
@prefix np: <http://www.nanopub.org/nschema#> .
@prefix dct: <http://purl.org/dc/terms/> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix prov: <http://www.w3.org/ns/prov#> .
@prefix nt: <https://w3id.org/np/o/ntemplate/> .
@prefix ex: <http://example.org/> .

sub:Head {
  this: np:hasAssertion sub:assertion ;
    np:hasProvenance sub:provenance ;
    np:hasPublicationInfo sub:pubinfo ;
    a np:Nanopublication .
}

sub:assertion {
  <https://doi.org/10.1234/abc> a ex:Paper ;
    dct:title """A title; with, delimiters. And { braces }""" ;
    ex:tag "a", "b", "c" .
}

sub:provenance {
  sub:assertion prov:wasAttributedTo <https://orcid.org/0000-0002-1825-0097> .
}

sub:pubinfo {
  this: dct:created "2024-03-01T10:00:00Z"^^<http://www.w3.org/2001/XMLSchema#dateTime> ;
    rdfs:label "Example nanopub"@en ;
    nt:wasCreatedFromTemplate <http://purl.org/np/RAtemplate> .
}
"#;

    const HASH_NANOPUB: &str = r#"@prefix sub: <http://example.org/np1#> .
@prefix ex: <http://example.org/> .
<http://example.org/np1#assertion> {
  ex:a ex:p ex:b .
}
<http://example.org/np1#provenance> {
  sub:assertion ex:q "origin" .
}
<http://example.org/np1#pubinfo> {
}
"#;

    #[test]
    fn test_slash_nanopub_graphs() {
        let doc = parse_document(SLASH_NANOPUB, None, &SyntaxConfig::default());

        assert!(matches!(doc.addressing, Addressing::Slash { .. }));
        assert_eq!(doc.uri.as_deref(), Some("https://w3id.org/np/RAexample"));
        assert!(doc.missing_graphs().is_empty());

        let assertion = &doc.assertion.triples;
        assert_eq!(assertion.len(), 5);
        assert_eq!(assertion[0].predicate, RDF_TYPE);
        assert_eq!(assertion[1].object, "A title; with, delimiters. And { braces }");

        assert_eq!(doc.provenance.len(), 1);
        assert_eq!(doc.provenance.triples[0].subject, "sub:assertion");

        let pubinfo = &doc.pubinfo.triples;
        assert_eq!(pubinfo.len(), 3);
        assert_eq!(pubinfo[0].object, "2024-03-01T10:00:00Z");
        assert_eq!(pubinfo[1].object, "Example nanopub");
    }

    #[test]
    fn test_hash_nanopub_graphs() {
        let doc = parse_document(HASH_NANOPUB, None, &SyntaxConfig::default());

        assert!(matches!(doc.addressing, Addressing::Hash { .. }));
        assert_eq!(doc.assertion.len(), 1);
        assert_eq!(doc.assertion.triples[0].object, "http://example.org/b");
        assert_eq!(doc.provenance.triples[0].object, "origin");
        assert!(doc.pubinfo.is_empty());
        assert!(doc.has_graph(GraphName::Pubinfo));
    }

    #[test]
    fn test_unknown_addressing_guesses_hash_base() {
        let text = HASH_NANOPUB.replace("@prefix sub: <http://example.org/np1#> .\n", "");
        let doc = parse_document(&text, None, &SyntaxConfig::default());

        assert!(matches!(doc.addressing, Addressing::Unknown { guessed_base: Some(_) }));
        assert_eq!(doc.assertion.len(), 1);
    }

    #[test]
    fn test_graph_extraction_is_deterministic() {
        let prefixes = build_prefix_table(SLASH_NANOPUB, None);
        let addressing = crate::lexer::detect_addressing(SLASH_NANOPUB, &prefixes, "sub");
        for graph in GraphName::ALL {
            let first = extract_graph_block(SLASH_NANOPUB, graph, &addressing, "sub");
            let second = extract_graph_block(SLASH_NANOPUB, graph, &addressing, "sub");
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_no_template_yields_empty_template() {
        let template = parse_template(None, &PrefixTable::new(), &SyntaxConfig::default());
        assert!(template.is_empty());

        let template = parse_template(Some("   "), &PrefixTable::new(), &SyntaxConfig::default());
        assert!(template.is_empty());
    }

    #[test]
    fn test_unterminated_literal_does_not_panic() {
        let text = "@prefix sub: <http://ex.org/np/> .\nsub:assertion { <http://ex.org/a> <http://ex.org/p> \"never closed . }";
        let doc = parse_document(text, None, &SyntaxConfig::default());
        assert!(doc.assertion.is_empty());
        assert!(!doc.has_graph(GraphName::Assertion));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: delimiters inside a triple-quoted literal never split it
            #[test]
            fn test_triple_quoted_literal_round_trips(body in "[A-Za-z0-9 ,.;{}<>\n]{0,60}") {
                let prefixes = PrefixTable::new();
                let config = SyntaxConfig::default();
                let parser = TripleParser::new(&prefixes, &config);

                let block = format!(
                    "<http://ex.org/s> <http://ex.org/p> \"\"\"{}\"\"\" ;\n  <http://ex.org/q> \"tail\" .",
                    body
                );
                let triples = parser.parse_triples(&block);

                prop_assert_eq!(triples.len(), 2);
                prop_assert_eq!(&triples[0].object, &body);
                prop_assert_eq!(&triples[1].object, "tail");
            }
        }
    }
}
