//! Nanoview Viewer
//!
//! Turns a nanopublication and, optionally, the template it was created from
//! into a structured view.
//!
//! # Architecture
//!
//! ```text
//! text → parse_document → graphs ─┐
//! template → parse_template ──────┼→ StructuralMatcher → ViewResult
//! assertion IRIs → LabelResolver ─┘      (one batch, bounded by a timeout)
//! ```
//!
//! Nothing in the core fails on malformed input: absent graphs come back
//! empty, unparseable statements are skipped, and a failing or slow label
//! resolver only costs the view its fetched labels.
//!
//! # Example Usage
//!
//! ```no_run
//! use nanoview_viewer::{NanopubViewer, ViewRequest, ViewerConfig};
//! use nanoview_labels::HeuristicResolver;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let viewer = NanopubViewer::new(HeuristicResolver, ViewerConfig::default())?;
//!
//! let document = std::fs::read_to_string("np.trig")?;
//! let template = std::fs::read_to_string("template.trig")?;
//! let result = viewer
//!     .view(ViewRequest::new(document).with_template(template))
//!     .await?;
//!
//! for field in &result.fields {
//!     println!("{}: {:?}", field.label, field.raw_values().collect::<Vec<_>>());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod metadata;
mod types;
mod viewer;


pub use config::ViewerConfig;
pub use error::ViewerError;
pub use metadata::{entity_labels, publication_info, template_uri};
pub use types::{
    FieldSummary, GraphsSummary, PublicationInfo, TemplateSummary, TripleSummary, ValueSummary,
    ViewRequest, ViewResult, ViewSummary,
};
pub use viewer::NanopubViewer;
