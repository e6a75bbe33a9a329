//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │      Product        │   │    ImageRef     │   │ CatalogStatus   │   │
//! │  │  ─────────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  id (CMS document)  │   │  opaque CMS     │   │  Loading        │   │
//! │  │  slug (URL-safe)    │   │  asset handle   │   │  Ready          │   │
//! │  │  price (Money)      │   │  resolved by    │   │  Failed         │   │
//! │  │  category           │   │  ImageUrlBuilder│   └─────────────────┘   │
//! │  │  stock_level        │   └─────────────────┘                         │
//! │  └─────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity
//! Every product has:
//! - `id`: CMS document id - what the cart ledger stores
//! - `slug`: human-readable, URL-safe - what product pages are routed by

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Image Reference
// =============================================================================

/// Opaque reference to an image asset held by the Content Provider.
///
/// The storefront never interprets this; an image-URL builder turns it into
/// something fetchable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        ImageRef(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available in the storefront catalog.
///
/// Immutable once loaded; owned by the catalog snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier (CMS document id).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unique, URL-safe identifier used by product pages.
    pub slug: String,

    /// Long-form description shown on the product page.
    pub description: String,

    /// Listed price in minor units (never negative).
    pub price: Money,

    /// Advertised discount in basis points (1000 = 10%).
    pub discount_bps: u32,

    /// Whether the product is highlighted on the landing page.
    pub is_featured: bool,

    /// Units in stock. Informational only: adding to cart does not check it.
    pub stock_level: u32,

    /// Category label, compared case-insensitively by the filter engine.
    pub category: String,

    /// Opaque image handle.
    pub image: ImageRef,
}

impl Product {
    /// Price after the advertised discount.
    ///
    /// Cart subtotals use [`Product::price`]; this is display information.
    pub fn discounted_price(&self) -> Money {
        self.price.apply_percentage_discount(self.discount_bps)
    }

    /// Returns true if at least one unit is in stock.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock_level > 0
    }
}

// =============================================================================
// Catalog Status
// =============================================================================

/// Loading status of the Catalog Store.
///
/// ## State Machine
/// ```text
///              load() ok
///   Loading ─────────────► Ready
///      │
///      │ load() err (no retry)
///      ▼
///   Failed { message }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "state", rename_all = "snake_case")]
#[ts(export)]
pub enum CatalogStatus {
    /// Fetch has not completed yet. The render layer shows a spinner.
    Loading,
    /// Products are available.
    Ready,
    /// Fetch failed; the collection is empty and stays that way.
    Failed { message: String },
}

impl Default for CatalogStatus {
    fn default() -> Self {
        CatalogStatus::Loading
    }
}

impl CatalogStatus {
    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self, CatalogStatus::Ready)
    }

    #[inline]
    pub fn is_loading(&self) -> bool {
        matches!(self, CatalogStatus::Loading)
    }

    /// User-visible error message, if the load failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            CatalogStatus::Failed { message } => Some(message),
            _ => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
