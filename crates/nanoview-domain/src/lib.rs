//! Nanoview Domain Layer
//!
//! This crate holds the data model shared by every other Nanoview crate.
//! It has ZERO external dependencies and defines the value objects and the
//! trait interfaces the parser, matcher and viewer layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Triple**: one subject/predicate/object statement extracted from a graph
//! - **Graph**: one of the three named graphs of a nanopublication
//! - **Template**: the declared shape of an assertion graph (statement patterns
//!   and placeholders)
//! - **MatchedField**: one labelled, ordered entry of the structured view
//! - **Label**: plain text or a label with a description
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure data and small pure helpers only
//! - Trait definitions for the injected label-resolution capability

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod field;
pub mod graph;
pub mod label;
pub mod prefix;
pub mod template;
pub mod traits;
pub mod triple;
pub mod vocab;

// Re-exports for convenience
pub use field::{FieldValue, MatchedField, MAIN_ENTITY_STATEMENT};
pub use graph::{Graph, GraphName};
pub use label::Label;
pub use prefix::PrefixTable;
pub use template::{GroupedStatement, Placeholder, PlaceholderKind, StatementPattern, Template};
pub use traits::LabelResolver;
pub use triple::{Term, Triple};
