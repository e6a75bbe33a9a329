//! # Content Errors

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while fetching or decoding content.
///
/// Validation failures of individual records are not here: those records
/// are skipped, not reported.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Transport failure (DNS, TLS, timeout, connection reset).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The CMS answered with a non-success status.
    #[error("CMS returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON envelope.
    #[error("Failed to decode CMS response: {0}")]
    Decode(String),

    /// An image reference that does not follow `image-<id>-<w>x<h>-<ext>`.
    #[error("Invalid image reference: '{0}'")]
    InvalidImageRef(String),

    /// Configuration that can't produce a usable client.
    #[error("Invalid content configuration: {0}")]
    InvalidConfig(String),

    /// Fixture file could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        ContentError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn invalid_config(reason: impl Into<String>) -> Self {
        ContentError::InvalidConfig(reason.into())
    }
}

impl From<serde_json::Error> for ContentError {
    fn from(err: serde_json::Error) -> Self {
        ContentError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ContentError {
    fn from(err: url::ParseError) -> Self {
        ContentError::InvalidConfig(err.to_string())
    }
}

/// Result type for content operations.
pub type ContentResult<T> = Result<T, ContentError>;
