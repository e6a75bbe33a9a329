//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Render layer / CLI             Rust backend                            │
//! │  ──────────────────             ────────────                            │
//! │                                                                         │
//! │  add_to_cart("p-404", 1)                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Unknown product? ─── CoreError::ProductNotFound ───┐           │  │
//! │  │         │                                           │           │  │
//! │  │         ▼                                           ▼           │  │
//! │  │  CMS down? ─────────── ContentError::Http ──────── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "NOT_FOUND", "message": "Product not found: p-404" }         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage read failures and unknown filter values never get here: those
//! are recovered where they happen.

use serde::Serialize;
use storefront_content::ContentError;
use storefront_core::CoreError;
use storefront_store::StoreError;

use crate::state::ConfigError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: asgaard-sofa"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Catalog could not be loaded
    CatalogUnavailable,

    /// Content Provider request failed
    ContentError,

    /// Local storage operation failed
    StorageError,

    /// Configuration missing or invalid
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ConfigError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::CatalogUnavailable(message) => {
                ApiError::new(ErrorCode::CatalogUnavailable, message)
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts storage errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidKey(key) => {
                ApiError::internal(format!("Invalid storage slot: {}", key))
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!(error = %other, "Local storage operation failed");
                ApiError::new(ErrorCode::StorageError, "Local storage is unavailable")
            }
        }
    }
}

/// Converts content errors to API errors.
impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::InvalidConfig(message) => ApiError::config(message),
            other => {
                tracing::error!(error = %other, "Content request failed");
                ApiError::new(ErrorCode::ContentError, "Failed to load products")
            }
        }
    }
}

/// Converts configuration errors to API errors.
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::config(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
