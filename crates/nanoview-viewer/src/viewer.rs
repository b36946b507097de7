//! Core Viewer implementation

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::metadata::publication_info;
use crate::types::{ViewRequest, ViewResult};
use nanoview_domain::{GraphName, Label, LabelResolver, Template};
use nanoview_matcher::{label_batch, LabelContext, MatchOutcome, StructuralMatcher};
use nanoview_syntax::{parse_document, parse_template, Document};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Turns nanopublication text into a structured view
pub struct NanopubViewer<R>
where
    R: LabelResolver,
{
    resolver: Arc<R>,
    matcher: StructuralMatcher,
    config: ViewerConfig,
}

impl<R> NanopubViewer<R>
where
    R: LabelResolver + Send + Sync + 'static,
    R::Error: Display,
{
    /// Create a new Viewer, validating `config`
    pub fn new(resolver: R, config: ViewerConfig) -> Result<Self, ViewerError> {
        config.validate().map_err(ViewerError::Config)?;
        Ok(Self {
            resolver: Arc::new(resolver),
            matcher: StructuralMatcher::new(config.matcher.clone()),
            config,
        })
    }

    /// The viewer's configuration
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// The label resolver
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// View a nanopublication, resolving labels on a blocking task bounded by
    /// the configured timeout
    pub async fn view(&self, request: ViewRequest) -> Result<ViewResult, ViewerError> {
        self.check_size(&request)?;
        let (document, template) = self.parse(&request)?;

        let resolved = if self.config.resolve_labels {
            self.resolve(label_batch(&document.assertion.triples)).await
        } else {
            None
        };

        Ok(self.assemble(document, template, resolved))
    }

    /// View a nanopublication on the calling thread, without a label timeout
    pub fn view_blocking(&self, request: ViewRequest) -> Result<ViewResult, ViewerError> {
        self.check_size(&request)?;
        let (document, template) = self.parse(&request)?;

        let resolved = if self.config.resolve_labels {
            let iris = label_batch(&document.assertion.triples);
            match self.resolver.resolve_batch(&iris) {
                Ok(labels) => Some(labels),
                Err(e) => {
                    warn!("Label resolution failed, using fallback labels: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Ok(self.assemble(document, template, resolved))
    }

    fn check_size(&self, request: &ViewRequest) -> Result<(), ViewerError> {
        let limit = self.config.max_document_bytes;
        let sizes = std::iter::once(request.document.len()).chain(request.template.as_ref().map(String::len));
        for size in sizes {
            if size > limit {
                return Err(ViewerError::DocumentTooLarge(size, limit));
            }
        }
        Ok(())
    }

    fn parse(&self, request: &ViewRequest) -> Result<(Document, Template), ViewerError> {
        let syntax = &self.config.syntax;
        let template_text = request.template.as_deref();
        let document = parse_document(&request.document, template_text, syntax);

        if self.config.require_assertion {
            document.require(GraphName::Assertion)?;
        }
        for name in document.missing_graphs() {
            debug!("Document has no {} graph", name);
        }

        let template = parse_template(template_text, &document.prefixes, syntax);
        Ok((document, template))
    }

    /// One label batch; `None` when the resolver failed or timed out
    async fn resolve(&self, iris: Vec<String>) -> Option<HashMap<String, Label>> {
        if iris.is_empty() {
            return Some(HashMap::new());
        }
        let count = iris.len();
        let resolver = Arc::clone(&self.resolver);

        // The trait is synchronous
        let task = tokio::task::spawn_blocking(move || {
            resolver.resolve_batch(&iris).map_err(|e| e.to_string())
        });

        match timeout(self.config.label_timeout(), task).await {
            Ok(Ok(Ok(labels))) => {
                debug!("Resolved {} of {} labels", labels.len(), count);
                Some(labels)
            }
            Ok(Ok(Err(e))) => {
                warn!("Label resolution failed, using fallback labels: {}", e);
                None
            }
            Ok(Err(e)) => {
                warn!("Label task join error: {}", e);
                None
            }
            Err(_) => {
                warn!(
                    "Label resolution timed out after {}s, using fallback labels",
                    self.config.label_timeout_secs
                );
                None
            }
        }
    }

    fn assemble(
        &self,
        document: Document,
        template: Template,
        resolved: Option<HashMap<String, Label>>,
    ) -> ViewResult {
        let info = publication_info(
            &document,
            &template,
            &self.config.matcher.creator_marker,
            self.config.rewrite_purl,
        );

        let labels_resolved = resolved.is_some();
        let mut labels = match resolved {
            Some(resolved) => LabelContext::with_resolved(resolved),
            None if self.config.resolve_labels => LabelContext::heuristic(),
            None => LabelContext::new(),
        };
        labels.pubinfo = info
            .entity_labels
            .iter()
            .map(|(iri, label)| (iri.clone(), Label::text(label.as_str())))
            .collect();

        let triples = &document.assertion.triples;
        let outcome = if template.is_empty() {
            debug!("No template statements, showing the assertion unstructured");
            MatchOutcome {
                fields: self.matcher.unstructured(&template, triples, &labels),
                ..Default::default()
            }
        } else {
            self.matcher.match_template(&template, triples, &labels)
        };

        let (unmatched, fields): (Vec<_>, Vec<_>) = outcome.fields.into_iter().partition(|f| f.unmatched);

        info!(
            "Viewed {}: {} fields, {} unmatched",
            info.uri.as_deref().unwrap_or("nanopublication"),
            fields.len(),
            unmatched.len()
        );

        ViewResult {
            info,
            template_title: template.title,
            template_tag: template.tag,
            template_description: template.description,
            fields,
            unmatched,
            main_entity: outcome.main_entity,
            bindings: outcome.bindings,
            assertion: document.assertion,
            provenance: document.provenance,
            pubinfo: document.pubinfo,
            labels_resolved,
        }
    }
}
