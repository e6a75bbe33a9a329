//! # Storage Error Types
//!
//! Error types for slot operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the slot path                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartState logs it and keeps the in-memory cart                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Read-side failures never reach the shopper: the cart repository turns
//! them into "no saved cart".

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Slot operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    ///
    /// ## When This Occurs
    /// - Data directory can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Slot key is empty or contains characters outside `[A-Za-z0-9_-]`.
    #[error("Invalid slot key: '{0}'")]
    InvalidKey(String),

    /// Slot value could not be encoded.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Creates an Io error for a given path.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
