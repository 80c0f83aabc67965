//! Error types for question paper splitting.

use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for the splitting pipeline.
///
/// Every variant is fatal for the document being processed: a failed run
/// writes nothing rather than a partial export.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("invalid page geometry: width {width}, height {height}")]
    InvalidGeometry { width: f64, height: f64 },

    #[error("layout anchors not found (question 1: {question_1}, paper id: {paper_id})")]
    AnchorNotFound { question_1: bool, paper_id: bool },

    #[error("first slice does not open a question")]
    NoLeadingQuestion,

    #[error("cannot write {path}: {source}")]
    ExportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("document error: {0}")]
    Document(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid paper id pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("remote sources are not supported: {0}")]
    RemoteUnsupported(String),
}

impl SplitError {
    pub(crate) fn export_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SplitError::ExportIo {
            path: path.into(),
            source,
        }
    }
}

/// Convenience Result type alias for SplitError.
pub type Result<T> = std::result::Result<T, SplitError>;
