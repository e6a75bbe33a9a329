//! # Repository Module
//!
//! Typed access to individual storage slots.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartState                                                             │
//! │       │                                                                 │
//! │       │  store.carts().save(&cart)                                     │
//! │       ▼                                                                 │
//! │  CartRepository                                                        │
//! │  ├── load(&self)  → Option<Cart>                                       │
//! │  ├── save(&self, cart)                                                 │
//! │  └── clear(&self)                                                      │
//! │       │                                                                 │
//! │       │  JSON text                                                      │
//! │       ▼                                                                 │
//! │  LocalStore slot "cartItems"                                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CartRepository`](cart::CartRepository) - The shopper's cart

pub mod cart;
