//! Template-driven structural matching

use crate::bindings::PlaceholderBindings;
use crate::constraints::{allows_choice, satisfies_groups};
use crate::display::{clean_doi, decode_auto_escape, label_batch, LabelContext};
use crate::main_entity::{detect_main_entity, MainEntity};
use crate::MatcherConfig;
use nanoview_domain::label::simple_label;
use nanoview_domain::vocab::CREATOR;
use nanoview_domain::{
    FieldValue, Label, LabelResolver, MatchedField, Placeholder, PlaceholderKind,
    StatementPattern, Template, Triple, MAIN_ENTITY_STATEMENT,
};
use std::fmt::Display;
use tracing::{debug, info, warn};

/// Result of matching one assertion graph against a template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Fields in display order: main entity, statement fields, unmatched triples
    pub fields: Vec<MatchedField>,

    /// Placeholder values bound while matching
    pub bindings: PlaceholderBindings,

    /// Detected main entity, visible or not
    pub main_entity: Option<MainEntity>,
}

impl MatchOutcome {
    /// Fields some template statement accounts for
    pub fn structured(&self) -> impl Iterator<Item = &MatchedField> {
        self.fields.iter().filter(|f| !f.unmatched)
    }

    /// Fields for triples no statement accounts for
    pub fn unmatched(&self) -> impl Iterator<Item = &MatchedField> {
        self.fields.iter().filter(|f| f.unmatched)
    }
}

/// Matches assertion triples against templates
#[derive(Debug, Clone, Default)]
pub struct StructuralMatcher {
    config: MatcherConfig,
}

/// Per-call matching state
struct Pass<'a> {
    template: &'a Template,
    triples: &'a [Triple],
    labels: &'a LabelContext,
    main: Option<MainEntity>,
    bindings: PlaceholderBindings,
    matched: Vec<bool>,
    fields: Vec<MatchedField>,
}

impl StructuralMatcher {
    /// Create a matcher with the given configuration
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Create a matcher with default configuration
    pub fn default_config() -> Self {
        Self::new(MatcherConfig::default())
    }

    /// The matcher's configuration
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Match with labels from `resolver`, asked once for every IRI of the graph.
    ///
    /// A failing resolver is logged; IRIs then show their path-segment labels.
    pub fn match_with_resolver<R>(
        &self,
        template: &Template,
        triples: &[Triple],
        resolver: &R,
    ) -> MatchOutcome
    where
        R: LabelResolver,
        R::Error: Display,
    {
        let labels = match resolver.resolve_batch(&label_batch(triples)) {
            Ok(resolved) => LabelContext::with_resolved(resolved),
            Err(e) => {
                warn!("Label resolution failed, using fallback labels: {}", e);
                LabelContext::heuristic()
            }
        };
        if template.is_empty() {
            MatchOutcome {
                fields: self.unstructured(template, triples, &labels),
                ..Default::default()
            }
        } else {
            self.match_template(template, triples, &labels)
        }
    }

    /// One unmatched field per triple, used when there is no template
    pub fn unstructured(
        &self,
        template: &Template,
        triples: &[Triple],
        labels: &LabelContext,
    ) -> Vec<MatchedField> {
        triples
            .iter()
            .map(|t| unmatched_field(template, t, labels))
            .collect()
    }

    /// Match `triples` against `template`
    pub fn match_template(
        &self,
        template: &Template,
        triples: &[Triple],
        labels: &LabelContext,
    ) -> MatchOutcome {
        let mut pass = Pass {
            template,
            triples,
            labels,
            main: detect_main_entity(template, triples, &self.config),
            bindings: PlaceholderBindings::new(),
            matched: vec![false; triples.len()],
            fields: Vec::new(),
        };

        if let Some(main) = pass.main.clone() {
            if main.visible {
                let field = self.main_entity_field(&pass, &main);
                pass.fields.push(field);
            }
            pass.bindings.bind(&main.placeholder, &main.value);
        }

        for stmt in template.ordered_statements() {
            if template.is_group_member(&stmt.id) {
                debug!("Statement {} is only checked as part of its group", stmt.id);
                continue;
            }
            let candidates = self.candidates(&mut pass, stmt);
            if candidates.is_empty() {
                debug!("No triple matches statement {}", stmt.id);
                continue;
            }
            self.bind(&mut pass.bindings, stmt, &candidates);
            self.emit(&mut pass, stmt, &candidates);
        }

        for (triple, matched) in triples.iter().zip(&pass.matched) {
            if !matched {
                pass.fields.push(unmatched_field(template, triple, labels));
            }
        }

        if self.config.drop_local_only_fields {
            let config = &self.config;
            pass.fields
                .retain(|f| !f.values.iter().all(|v| config.is_local(&v.raw)));
        }

        info!(
            "Matched {} of {} triples into {} fields",
            pass.matched.iter().filter(|m| **m).count(),
            triples.len(),
            pass.fields.len()
        );

        MatchOutcome {
            fields: pass.fields,
            bindings: pass.bindings,
            main_entity: pass.main,
        }
    }

    /// Triples satisfying `stmt`, marked matched as they are found
    fn candidates<'a>(&self, pass: &mut Pass<'a>, stmt: &StatementPattern) -> Vec<&'a Triple> {
        let template = pass.template;
        let object_placeholder = template.placeholder(&stmt.object);
        let triples = pass.triples;
        let main_value = pass.main.as_ref().map(|m| m.value.as_str());
        let mut found = Vec::new();

        for (index, triple) in triples.iter().enumerate() {
            if !self.predicate_fits(&pass.bindings, stmt, triple) {
                continue;
            }
            if main_value == Some(triple.object.as_str()) {
                pass.matched[index] = true;
                continue;
            }
            if !self.object_fits(pass, stmt, object_placeholder, triple) {
                continue;
            }
            if !self.subject_fits(&pass.bindings, stmt, triple) {
                continue;
            }
            pass.matched[index] = true;
            found.push(triple);
        }
        found
    }

    fn predicate_fits(&self, bindings: &PlaceholderBindings, stmt: &StatementPattern, triple: &Triple) -> bool {
        if self.config.is_local(&stmt.predicate) {
            bindings.admits(&stmt.predicate, &triple.predicate)
        } else {
            triple.predicate == stmt.predicate
        }
    }

    fn object_fits(
        &self,
        pass: &Pass<'_>,
        stmt: &StatementPattern,
        placeholder: Option<&Placeholder>,
        triple: &Triple,
    ) -> bool {
        if !self.config.is_local(&stmt.object) {
            return triple.object == stmt.object;
        }
        if !pass.bindings.admits(&stmt.object, &triple.object) {
            return false;
        }
        if !allows_choice(placeholder, &triple.object) {
            debug!("{} is not a possible value of {}", triple.object, stmt.object);
            return false;
        }
        satisfies_groups(pass.template, &stmt.object, &triple.object, pass.triples, &self.config)
    }

    fn subject_fits(&self, bindings: &PlaceholderBindings, stmt: &StatementPattern, triple: &Triple) -> bool {
        if stmt.subject == CREATOR {
            triple.subject.contains(&self.config.creator_marker)
        } else if self.config.is_local(&stmt.subject) {
            bindings.admits(&stmt.subject, &triple.subject)
        } else {
            triple.subject == stmt.subject
        }
    }

    /// Bind every placeholder `stmt` references to the values found for it
    fn bind(&self, bindings: &mut PlaceholderBindings, stmt: &StatementPattern, found: &[&Triple]) {
        for triple in found {
            if self.config.is_local(&stmt.predicate) {
                bindings.bind(&stmt.predicate, &triple.predicate);
            }
            if self.config.is_local(&stmt.object) {
                bindings.bind(&stmt.object, &triple.object);
            }
            if stmt.subject != CREATOR && self.config.is_local(&stmt.subject) {
                bindings.bind(&stmt.subject, &triple.subject);
            }
        }
    }

    fn emit(&self, pass: &mut Pass<'_>, stmt: &StatementPattern, found: &[&Triple]) {
        let template = pass.template;
        self.emit_subject_field(pass, stmt, found);

        if pass
            .fields
            .iter()
            .any(|f| f.statement_id.as_deref() == Some(stmt.id.as_str()))
        {
            debug!("Statement {} already has a field", stmt.id);
            return;
        }

        let object_placeholder = template.placeholder(&stmt.object);
        let predicate = if self.config.is_local(&stmt.predicate) {
            found[0].predicate.as_str()
        } else {
            stmt.predicate.as_str()
        };

        let mut decoded = false;
        let values: Vec<FieldValue> = found
            .iter()
            .map(|t| {
                let (display, was_decoded) = value_display(pass, object_placeholder, &t.object);
                decoded |= was_decoded;
                FieldValue::raw(t.object.as_str())
                    .with_display(display)
                    .with_subject(t.subject.as_str())
            })
            .collect();

        let existing = pass
            .fields
            .iter_mut()
            .find(|f| !f.is_subject_field && f.predicate_uri.as_deref() == Some(predicate));
        if let (Some(field), true) = (existing, stmt.repeatable) {
            field.values.extend(values);
            field.is_decoded_uri |= decoded;
            return;
        }

        let predicate_placeholder = template.placeholder(&stmt.predicate);
        let label = template
            .labels
            .get(predicate)
            .cloned()
            .or_else(|| object_placeholder.and_then(Placeholder::label).map(Label::text))
            .or_else(|| predicate_placeholder.and_then(Placeholder::label).map(Label::text))
            .or_else(|| pass.labels.lookup(predicate).cloned())
            .unwrap_or_else(|| Label::text(simple_label(predicate)));

        pass.fields.push(MatchedField {
            statement_id: Some(stmt.id.clone()),
            placeholder_id: object_placeholder.map(|p| p.id.clone()),
            label,
            predicate_uri: Some(predicate.to_string()),
            values,
            kinds: object_placeholder.map(|p| p.kinds.clone()).unwrap_or_default(),
            repeatable: stmt.repeatable,
            optional: stmt.optional,
            is_decoded_uri: decoded,
            ..Default::default()
        });
    }

    /// First field for a placeholder acting as a secondary subject
    fn emit_subject_field(&self, pass: &mut Pass<'_>, stmt: &StatementPattern, found: &[&Triple]) {
        if stmt.subject == CREATOR || !self.config.is_local(&stmt.subject) {
            return;
        }
        if pass.main.as_ref().map(|m| m.placeholder.as_str()) == Some(stmt.subject.as_str()) {
            return;
        }
        let Some(placeholder) = pass.template.placeholder(&stmt.subject) else {
            return;
        };
        if pass
            .fields
            .iter()
            .any(|f| f.is_subject_field && f.placeholder_id.as_deref() == Some(stmt.subject.as_str()))
        {
            return;
        }

        let mut values: Vec<FieldValue> = Vec::new();
        for triple in found {
            if values.iter().any(|v| v.raw == triple.subject) {
                continue;
            }
            let display = pass.labels.display(pass.template, &triple.subject);
            values.push(FieldValue::raw(triple.subject.as_str()).with_display(display));
        }

        pass.fields.push(MatchedField {
            statement_id: Some(format!("{}-subject", stmt.id)),
            placeholder_id: Some(stmt.subject.clone()),
            label: Label::text(placeholder.label().unwrap_or(self.config.default_subject_label.as_str())),
            values,
            kinds: placeholder.kinds.clone(),
            is_subject_field: true,
            ..Default::default()
        });
    }

    fn main_entity_field(&self, pass: &Pass<'_>, main: &MainEntity) -> MatchedField {
        let placeholder = pass.template.placeholder(&main.placeholder);
        let (mut display, decoded) = value_display(pass, placeholder, &main.value);
        if !decoded && main.value.contains("doi.org/") && display.as_str() == main.value {
            display = clean_doi(&display);
        }

        let kind = if decoded {
            PlaceholderKind::AutoEscapeUriPlaceholder
        } else {
            PlaceholderKind::ExternalUriPlaceholder
        };
        let label = placeholder
            .and_then(Placeholder::label)
            .unwrap_or(self.config.default_subject_label.as_str());

        MatchedField {
            statement_id: Some(MAIN_ENTITY_STATEMENT.to_string()),
            placeholder_id: Some(main.placeholder.clone()),
            label: Label::text(label),
            values: vec![FieldValue::raw(main.value.as_str()).with_display(display)],
            kinds: vec![kind],
            is_main_entity: true,
            is_decoded_uri: decoded,
            ..Default::default()
        }
    }
}

/// Display of a value, decoding escaped IRIs of auto-escape placeholders
fn value_display(pass: &Pass<'_>, placeholder: Option<&Placeholder>, raw: &str) -> (Label, bool) {
    let decoded = placeholder
        .filter(|p| p.has_kind(&PlaceholderKind::AutoEscapeUriPlaceholder))
        .and_then(|p| p.prefix.as_deref())
        .and_then(|prefix| decode_auto_escape(raw, prefix));
    match decoded {
        Some(text) => (Label::text(text), true),
        None => (pass.labels.display(pass.template, raw), false),
    }
}

fn unmatched_field(template: &Template, triple: &Triple, labels: &LabelContext) -> MatchedField {
    MatchedField::unmatched(
        labels.predicate_label(template, &triple.predicate),
        triple.predicate.as_str(),
        FieldValue::raw(triple.object.as_str()).with_display(labels.display(template, &triple.object)),
    )
}
