//! # storefront-store: Durable Client-Side Storage
//!
//! This crate provides the named storage slots the storefront persists into
//! and the cart repository built on top of them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Data Flow                              │
//! │                                                                         │
//! │  CartState::add / remove (apps/storefront)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  storefront-store (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────────┐          ┌────────────────────────┐    │   │
//! │  │   │    LocalStore     │          │    CartRepository      │    │   │
//! │  │   │    (store.rs)     │◄─────────│  (repository/cart.rs)  │    │   │
//! │  │   │                   │          │                        │    │   │
//! │  │   │ read_slot         │          │ load → Option<Cart>    │    │   │
//! │  │   │ write_slot        │          │ save(&Cart)            │    │   │
//! │  │   │ clear_slot        │          │                        │    │   │
//! │  │   └───────────────────┘          └────────────────────────┘    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   <data dir>/cartItems.json   (or an in-memory map in tests)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Slot backend creation and configuration
//! - [`error`] - Storage error types
//! - [`repository`] - Typed access to individual slots
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_store::{LocalStore, StoreConfig};
//!
//! let store = LocalStore::open(StoreConfig::new("./data")).await?;
//!
//! let cart = store.carts().load().await.unwrap_or_default();
//! store.carts().save(&cart).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use repository::cart::CartRepository;
pub use store::{LocalStore, StoreConfig};
