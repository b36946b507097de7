//! Publication metadata from the pubinfo and provenance graphs

use crate::types::PublicationInfo;
use nanoview_domain::vocab::{is_nt, local_name, RDFS_LABEL};
use nanoview_domain::{Graph, Template};
use nanoview_syntax::Document;
use std::collections::BTreeMap;

/// Read the metadata of `document`.
///
/// The first pubinfo triple carrying a field wins. `creator_marker` picks the
/// provenance attribution that names the author's ORCID.
pub fn publication_info(
    document: &Document,
    template: &Template,
    creator_marker: &str,
    rewrite_purl: bool,
) -> PublicationInfo {
    let pubinfo = &document.pubinfo;
    let by_local = |name: &str| {
        pubinfo
            .iter()
            .find(|t| local_name(&t.predicate) == name)
            .map(|t| t.object.clone())
    };
    let template_iri = |name: &str| {
        pubinfo
            .iter()
            .find(|t| is_nt(&t.predicate, name))
            .map(|t| template_uri(&t.object, rewrite_purl))
    };

    let title = pubinfo
        .iter()
        .find(|t| t.predicate == RDFS_LABEL)
        .map(|t| t.object.clone())
        .or_else(|| template.title.clone());

    let author_orcid = document
        .provenance
        .iter()
        .find(|t| local_name(&t.predicate) == "wasAttributedTo" && t.object.contains(creator_marker))
        .map(|t| t.object.clone());

    PublicationInfo {
        uri: document.uri.clone(),
        title,
        author: by_local("creator"),
        author_name: by_local("name"),
        author_orcid,
        date: by_local("created"),
        license: by_local("license"),
        entity_labels: entity_labels(pubinfo),
        template_uri: template_iri("wasCreatedFromTemplate"),
        provenance_template_uri: template_iri("wasCreatedFromProvenanceTemplate"),
        pubinfo_template_uri: template_iri("wasCreatedFromPubinfoTemplate"),
    }
}

/// Labels attached with `hasLabelFromApi`, by subject; the last one wins
pub fn entity_labels(pubinfo: &Graph) -> BTreeMap<String, String> {
    pubinfo
        .iter()
        .filter(|t| local_name(&t.predicate) == "hasLabelFromApi")
        .map(|t| (t.subject.clone(), t.object.clone()))
        .collect()
}

/// Template IRI as reported, moving `purl.org/np/` to `w3id.org/np/` when asked
pub fn template_uri(iri: &str, rewrite_purl: bool) -> String {
    if !rewrite_purl {
        return iri.to_string();
    }
    for old in ["http://purl.org/np/", "https://purl.org/np/"] {
        if let Some(rest) = iri.strip_prefix(old) {
            return format!("https://w3id.org/np/{}", rest);
        }
    }
    iri.to_string()
}
