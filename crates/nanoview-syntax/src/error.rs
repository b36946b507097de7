//! Error types for the syntax layer

use nanoview_domain::GraphName;
use thiserror::Error;

/// Errors that can occur while parsing nanopublication text
#[derive(Error, Debug)]
pub enum SyntaxError {
    /// A graph required by the caller is absent
    #[error("Graph not found: {0}")]
    MissingGraph(GraphName),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
