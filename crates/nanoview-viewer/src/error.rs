//! Error types for the Viewer

use nanoview_domain::GraphName;
use nanoview_syntax::SyntaxError;
use thiserror::Error;

/// Errors that can occur while viewing a nanopublication
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Input exceeds the configured size limit
    #[error("Document too large: {0} bytes (max: {1})")]
    DocumentTooLarge(usize, usize),

    /// A graph the configuration requires is absent
    #[error("Missing graph: {0}")]
    MissingGraph(GraphName),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<SyntaxError> for ViewerError {
    fn from(e: SyntaxError) -> Self {
        match e {
            SyntaxError::MissingGraph(name) => ViewerError::MissingGraph(name),
            SyntaxError::Config(message) => ViewerError::Config(message),
        }
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(e: serde_json::Error) -> Self {
        ViewerError::Json(e.to_string())
    }
}
