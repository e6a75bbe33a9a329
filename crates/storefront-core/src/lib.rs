//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate holds the storefront state that has actual rules attached to
//! it: the cart ledger and the derived, filtered product view. Everything
//! here is a pure function over owned data; there is no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Render Layer (external)                        │   │
//! │  │    Shop grid ──► Product page ──► Cart page ──► Checkout        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  catalog  │  │  filter   │  │   cart    │  │   │
//! │  │   │  Product  │  │  Catalog  │  │ Selection │  │   Cart    │  │   │
//! │  │   │  Money    │  │ categories│  │ apply()   │  │ CartEntry │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                │                                   │                    │
//! │  ┌─────────────▼──────────────┐   ┌────────────────▼───────────────┐   │
//! │  │ storefront-store           │   │ storefront-content             │   │
//! │  │ cart slot on local disk    │   │ headless CMS product records   │   │
//! │  └────────────────────────────┘   └────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ImageRef, CatalogStatus)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Immutable product snapshot and category derivation
//! - [`filter`] - Filter/Sort Engine
//! - [`cart`] - Cart Ledger entity and its persisted document
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::filter::{self, FilterSelection};
//! use storefront_core::{Catalog, Cart};
//!
//! let catalog = Catalog::default();
//! let selection = FilterSelection::from_params("chairs", "200-500", "price-low-high");
//! assert!(filter::apply(catalog.products(), &selection).is_empty());
//!
//! let mut cart = Cart::new();
//! cart.add("p1", 2);
//! assert_eq!(cart.item_count(), 2);
//! assert!(cart.subtotal(&catalog).is_zero()); // "p1" is not in the catalog
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartDocument, CartEntry, CartLine, CartTotals, StoredCart};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::{FilterSelection, PriceRange, SortMode};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sentinel category meaning "no category filter".
///
/// Always the first entry of [`Catalog::categories`].
pub const ALL_CATEGORIES: &str = "all";

/// Name of the durable storage slot holding the serialized cart.
///
/// Matches the key earlier storefront builds wrote, so carts saved by them
/// are picked up on the first hydrate.
pub const CART_STORAGE_KEY: &str = "cartItems";

/// Version written into every [`CartDocument`].
pub const CART_DOCUMENT_VERSION: u32 = 1;
