//! Side constraints on placeholder values

use crate::MatcherConfig;
use nanoview_domain::{Placeholder, PlaceholderKind, StatementPattern, Template, Triple};
use tracing::debug;

/// Whether `value` is allowed by a restricted choice placeholder.
///
/// Placeholders of other kinds, or without a declared whitelist, allow anything.
pub fn allows_choice(placeholder: Option<&Placeholder>, value: &str) -> bool {
    match placeholder {
        Some(p)
            if p.has_kind(&PlaceholderKind::RestrictedChoicePlaceholder)
                && !p.possible_values.is_empty() =>
        {
            p.possible_values.iter().any(|v| v == value)
        }
        _ => true,
    }
}

/// Whether `resource` satisfies every group constraining `placeholder_id`.
///
/// A required group needs all of its member statements about the placeholder
/// satisfied; an optional group needs all or none.
pub fn satisfies_groups(
    template: &Template,
    placeholder_id: &str,
    resource: &str,
    triples: &[Triple],
    config: &MatcherConfig,
) -> bool {
    template
        .groups_constraining(placeholder_id)
        .all(|(group, members)| {
            let satisfied = members
                .iter()
                .filter(|stmt| member_satisfied(stmt, resource, triples, config))
                .count();
            let ok = satisfied == members.len() || (group.optional && satisfied == 0);
            if !ok {
                debug!(
                    "{} satisfies {}/{} statements of group {}",
                    resource,
                    satisfied,
                    members.len(),
                    group.id
                );
            }
            ok
        })
}

/// Some triple about `resource` fits the member statement
fn member_satisfied(
    stmt: &StatementPattern,
    resource: &str,
    triples: &[Triple],
    config: &MatcherConfig,
) -> bool {
    triples.iter().any(|t| {
        t.subject == resource
            && (config.is_local(&stmt.predicate) || t.predicate == stmt.predicate)
            && (config.is_local(&stmt.object) || t.object == stmt.object)
    })
}
