//! Error handling for the PGSL core
//!
//! Only caller contract violations end up here. Problems in the analysed
//! source are reported as incidents on the [`Context`](crate::frontend::context::Context).

use crate::utils::SourceRange;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal analysis error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Semantic data of {node} at {range} was read before the node was processed")]
    NotYetProcessed {
        node: &'static str,
        range: SourceRange,
    },

    #[error("Document is already set for this context")]
    DocumentAlreadySet,

    #[error("A scope was requested before the document was set")]
    DocumentNotSet,

    #[error("Value {name} is already defined in the current scope")]
    DuplicateInScope { name: String },

    #[error("IO error: {0}")]
    Io(String),

    #[error("Invalid syntax tree: {0}")]
    Json(String),
}

impl Error {
    /// Get the source range associated with this error
    pub fn range(&self) -> Option<SourceRange> {
        match self {
            Self::NotYetProcessed { range, .. } => Some(*range),
            Self::DocumentAlreadySet
            | Self::DocumentNotSet
            | Self::DuplicateInScope { .. }
            | Self::Io(_)
            | Self::Json(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}
