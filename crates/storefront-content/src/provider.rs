//! # Content Provider
//!
//! The seam between the storefront and wherever its products come from.
//!
//! ## Implementations
//! ```text
//! ┌──────────────────┬─────────────────────────────────────────────────────┐
//! │ SanityClient     │ Live CMS over HTTPS (sanity.rs)                    │
//! │ FixtureProvider  │ JSON file of CMS records, re-read on every fetch   │
//! │ StaticProvider   │ In-memory list, for tests and embedding            │
//! └──────────────────┴─────────────────────────────────────────────────────┘
//! ```
//!
//! Every implementation returns products in source order. None of them
//! retry: a failed fetch is reported once and the caller decides.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use storefront_core::Product;
use tracing::debug;

use crate::error::{ContentError, ContentResult};
use crate::record::products_from_values;

/// Read-only source of product records.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    /// Fetches the whole product collection, in source order.
    async fn fetch_products(&self) -> ContentResult<Vec<Product>>;

    /// Fetches a single product by slug.
    async fn fetch_product_by_slug(&self, slug: &str) -> ContentResult<Option<Product>>;
}

// =============================================================================
// Static Provider
// =============================================================================

/// Serves a fixed, already-validated product list.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    products: Vec<Product>,
}

impl StaticProvider {
    pub fn new(products: Vec<Product>) -> Self {
        StaticProvider { products }
    }
}

#[async_trait]
impl ContentProvider for StaticProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch_products(&self) -> ContentResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn fetch_product_by_slug(&self, slug: &str) -> ContentResult<Option<Product>> {
        Ok(self.products.iter().find(|p| p.slug == slug).cloned())
    }
}

// =============================================================================
// Fixture Provider
// =============================================================================

/// Serves products from a JSON file holding an array of CMS records.
///
/// The file uses the same record shape the CMS query returns, so an export
/// of the live dataset works as an offline catalog.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    path: PathBuf,
}

impl FixtureProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FixtureProvider { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_records(&self) -> ContentResult<Vec<Value>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ContentError::io(&self.path, e))?;

        let records: Vec<Value> = serde_json::from_str(&raw)?;
        debug!(path = %self.path.display(), records = records.len(), "Read fixture catalog");
        Ok(records)
    }
}

#[async_trait]
impl ContentProvider for FixtureProvider {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn fetch_products(&self) -> ContentResult<Vec<Product>> {
        Ok(products_from_values(self.read_records().await?))
    }

    async fn fetch_product_by_slug(&self, slug: &str) -> ContentResult<Option<Product>> {
        let products = self.fetch_products().await?;
        Ok(products.into_iter().find(|p| p.slug == slug))
    }
}
