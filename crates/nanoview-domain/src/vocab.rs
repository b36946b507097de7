//! Vocabulary constants used across the parser and matcher

/// `rdf:type`, the expansion of the bare `a` keyword
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// `rdf:subject`
pub const RDF_SUBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#subject";

/// `rdf:predicate`
pub const RDF_PREDICATE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate";

/// `rdf:object`
pub const RDF_OBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#object";

/// `rdfs:label`
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

/// `rdfs:comment`
pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";

/// `dct:description`
pub const DCT_DESCRIPTION: &str = "http://purl.org/dc/terms/description";

/// Namespace of the nanopublication template vocabulary (`nt:`)
pub const NT_NAMESPACE: &str = "https://w3id.org/np/o/ntemplate/";

/// Sentinel that a template's creator placeholder expands to
pub const CREATOR: &str = "CREATOR";

/// Whether `iri` names the term `local` of the template vocabulary.
///
/// Accepts the expanded IRI as well as the unexpanded `nt:` form, so a
/// template that forgot to declare the `nt:` prefix still parses.
pub fn is_nt(iri: &str, local: &str) -> bool {
    iri.strip_prefix(NT_NAMESPACE)
        .or_else(|| iri.strip_prefix("nt:"))
        .map_or(false, |rest| rest == local)
}

/// Local name of an IRI: the text after the last `/`, `#` or `:`.
pub fn local_name(iri: &str) -> &str {
    iri.rsplit(|c| c == '/' || c == '#' || c == ':')
        .next()
        .unwrap_or(iri)
}

/// Whether `value` is an absolute http(s) IRI
pub fn is_http_iri(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_nt_expanded_and_prefixed() {
        assert!(is_nt("https://w3id.org/np/o/ntemplate/hasStatement", "hasStatement"));
        assert!(is_nt("nt:hasStatement", "hasStatement"));
        assert!(!is_nt("https://w3id.org/np/o/ntemplate/hasStatementX", "hasStatement"));
        assert!(!is_nt("http://example.org/hasStatement", "hasStatement"));
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name("http://purl.org/dc/terms/creator"), "creator");
        assert_eq!(local_name(RDFS_LABEL), "label");
        assert_eq!(local_name("nt:hasTag"), "hasTag");
        assert_eq!(local_name("plain"), "plain");
    }
}
