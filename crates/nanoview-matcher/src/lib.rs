//! Nanoview Matcher
//!
//! Matches the triples of an assertion graph against a parsed template and
//! produces the ordered fields a viewer shows: the main entity, one field per
//! satisfied statement (repeatable statements merged), subject fields for
//! secondary entities, and the triples no statement accounts for.
//!
//! Matching is a pure function of its inputs. Labels come from the template,
//! from a [`LabelContext`], and finally from heuristics on the IRI.
//!
//! # Example
//!
//! ```
//! use nanoview_domain::{StatementPattern, Template, Triple};
//! use nanoview_matcher::{LabelContext, StructuralMatcher};
//!
//! let mut template = Template::default();
//! template.statements.insert(
//!     "sub:st1".to_string(),
//!     StatementPattern {
//!         id: "sub:st1".to_string(),
//!         subject: "sub:paper".to_string(),
//!         predicate: "http://purl.org/dc/terms/title".to_string(),
//!         object: "sub:title".to_string(),
//!         optional: false,
//!         repeatable: false,
//!         grouped: false,
//!     },
//! );
//! template.statement_order.push("sub:st1".to_string());
//!
//! let triples = vec![Triple::new(
//!     "https://doi.org/10.1/x",
//!     "http://purl.org/dc/terms/title",
//!     "A paper",
//! )];
//!
//! let outcome = StructuralMatcher::default_config()
//!     .match_template(&template, &triples, &LabelContext::new());
//! assert_eq!(outcome.fields.len(), 1);
//! assert_eq!(outcome.fields[0].values[0].raw, "A paper");
//! ```

#![warn(missing_docs)]

mod bindings;
mod config;
mod constraints;
mod display;
mod main_entity;
mod matcher;

pub use bindings::PlaceholderBindings;
pub use config::MatcherConfig;
pub use constraints::{allows_choice, satisfies_groups};
pub use display::{clean_doi, decode_auto_escape, label_batch, LabelContext};
pub use main_entity::{detect_main_entity, main_placeholder, MainEntity};
pub use matcher::{MatchOutcome, StructuralMatcher};
