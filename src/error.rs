use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort generation of inline markup.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The document has no text (absent or empty) to annotate.
    #[error("The \"text\" key is missing.")]
    MissingText,
}

/// The main error type for sita operations.
#[derive(Debug, Error)]
pub enum SitaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse document JSON from {path}: {source}")]
    DocumentJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write document JSON to {path}: {source}")]
    DocumentJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize report: {0}")]
    ReportJson(#[source] serde_json::Error),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
