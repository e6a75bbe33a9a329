//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront-store errors                                               │
//! │  └── StoreError       - Local slot read/write failures                 │
//! │                                                                         │
//! │  storefront-content errors                                             │
//! │  └── ContentError     - CMS fetch / decode failures                    │
//! │                                                                         │
//! │  App errors                                                            │
//! │  └── ApiError         - What the render layer sees (serialized)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Most storefront faults are recovered locally (corrupt cart slot, unknown
//! filter value) and never become one of these. The variants below are the
//! ones that reach a caller.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the loaded catalog.
    ///
    /// ## When This Occurs
    /// - The render layer asks to add an id the catalog never contained
    /// - A product slug does not resolve
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The catalog is still loading or failed to load.
    #[error("Catalog is not ready: {0}")]
    CatalogUnavailable(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when a product record from the Content Provider does not satisfy
/// the Product invariants, or when raw input fails a format check.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. a slug with spaces, a NaN price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
