//! # storefront-content: Content Provider
//!
//! Supplies the storefront with its product collection.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Content Provider Layer                            │
//! │                                                                         │
//! │  CatalogState::load (apps/storefront)                                  │
//! │       │                                                                 │
//! │       │  &dyn ContentProvider                                          │
//! │       ▼                                                                 │
//! │  ┌──────────────────┬──────────────────┬──────────────────┐            │
//! │  │  SanityClient    │ FixtureProvider  │  StaticProvider  │            │
//! │  │  GROQ over HTTPS │ JSON file        │  Vec<Product>    │            │
//! │  └────────┬─────────┴────────┬─────────┴──────────────────┘            │
//! │           │                  │                                          │
//! │           ▼                  ▼                                          │
//! │       ProductRecord (wire shape, price as JSON number)                 │
//! │           │                                                             │
//! │           │  TryFrom: validate, convert price to Money                  │
//! │           ▼                                                             │
//! │       storefront_core::Product                                         │
//! │                                                                         │
//! │  Product.image ──► ImageUrlBuilder ──► https://cdn.sanity.io/...       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Project, dataset, API version, CDN, token, timeout
//! - [`provider`] - The provider trait and the non-network providers
//! - [`record`] - Wire record and conversion into `Product`
//! - [`sanity`] - HTTP client for the CMS query API
//! - [`image`] - Image reference to URL resolution
//! - [`error`] - Content error types

pub mod config;
pub mod error;
pub mod image;
pub mod provider;
pub mod record;
pub mod sanity;

pub use config::ContentConfig;
pub use error::{ContentError, ContentResult};
pub use image::{Fit, ImageUrlBuilder};
pub use provider::{ContentProvider, FixtureProvider, StaticProvider};
pub use record::ProductRecord;
pub use sanity::SanityClient;
