//! Error types for model generation.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::DocumentId;
use crate::parser::SyntaxError;

fn first_message(errors: &[SyntaxError]) -> String {
    errors
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Errors surfaced by the public entry points.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Reading a document or archive failed.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document did not parse; no partial document was produced.
    #[error("{} syntax error(s) in {document}, first: {}", .errors.len(), first_message(.errors))]
    Syntax {
        document: String,
        errors: Vec<SyntaxError>,
    },

    /// The archive container could not be read.
    #[error("Archive error: {0}")]
    Archive(String),

    /// Only fragments declaring the same namespace can be merged.
    #[error("Namespace mismatch: cannot merge '{found}' into '{expected}'")]
    NamespaceMismatch { expected: String, found: String },

    /// An archive entry filter did not compile.
    #[error("Invalid entry pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

impl ModelError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn archive(message: impl Into<String>) -> Self {
        Self::Archive(message.into())
    }
}

#[cfg(feature = "archive")]
impl From<zip::result::ZipError> for ModelError {
    fn from(error: zip::result::ZipError) -> Self {
        Self::Archive(error.to_string())
    }
}

/// Why one include could not be loaded. Never fatal for the load.
#[derive(Debug, Error)]
pub enum IncludeError {
    #[error("include '{declared_path}' not found")]
    NotFound { declared_path: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} syntax error(s) in {}", .errors.len(), .path.display())]
    Syntax {
        path: PathBuf,
        errors: Vec<SyntaxError>,
    },
}

impl IncludeError {
    /// Rewraps a document build failure for the include at `path`.
    pub(crate) fn from_model_error(path: PathBuf, error: ModelError) -> Self {
        match error {
            ModelError::Io { path, source } => Self::Io { path, source },
            ModelError::Syntax { errors, .. } => Self::Syntax { path, errors },
            other => Self::Io {
                path,
                source: std::io::Error::other(other.to_string()),
            },
        }
    }
}

/// An include that stayed unloaded, recorded on the pipeline stage.
#[derive(Debug)]
pub struct IncludeFailure {
    /// Document carrying the include directive.
    pub document: DocumentId,
    pub declared_path: String,
    pub error: IncludeError,
}

pub type Result<T, E = ModelError> = std::result::Result<T, E>;
