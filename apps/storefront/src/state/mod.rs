//! # State Module
//!
//! Session state for the storefront.
//!
//! Separate state types instead of one big struct, so each command touches
//! only what it needs and the catalog never waits on the cart lock.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                         Session                                 │   │
//! │  │  Session::start(config, provider, store)                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ CatalogState │  │  CartState   │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  RwLock<     │  │  Mutex<Cart> │  │  content source  │              │
//! │  │   status,    │  │  + cart      │  │  data dir        │              │
//! │  │   Arc<Catalog│  │  repository  │  │  currency        │              │
//! │  │  >>          │  │              │  │                  │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogState: written once by load(), then read-only snapshots      │
//! │  • CartState: tokio Mutex held across persist                          │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;
mod session;

pub use cart::CartState;
pub use catalog::{CatalogState, LOAD_FAILED_MESSAGE};
pub use config::{ConfigError, ConfigResult, ConfigState, CONFIG_FILE_NAME};
pub use session::Session;
