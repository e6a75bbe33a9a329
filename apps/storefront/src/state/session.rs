//! # Session
//!
//! Explicit context object holding everything a storefront session needs.
//!
//! ## Initialization Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Session::start(config, provider, store)                               │
//! │                                                                         │
//! │  1. construct    CatalogState::new()          (status = Loading)        │
//! │  2. hydrate      CartState::hydrate(store.carts())                      │
//! │                  (the store is open, so storage is known to be usable) │
//! │  3. load         catalog.load(provider)       (Ready | Failed)          │
//! │  4. ready        Session returned to the caller                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands take `&Session`; nothing is global.

use std::sync::Arc;
use storefront_content::{ContentProvider, ImageUrlBuilder};
use storefront_store::LocalStore;
use tracing::info;

use super::{CartState, CatalogState, ConfigState};

/// A running storefront session.
pub struct Session {
    config: ConfigState,
    catalog: CatalogState,
    cart: CartState,
    provider: Arc<dyn ContentProvider>,
    images: Option<ImageUrlBuilder>,
}

impl Session {
    /// Starts a session. Returns once the cart is hydrated and the catalog
    /// load has settled, whichever way it went.
    pub async fn start(
        config: ConfigState,
        provider: Arc<dyn ContentProvider>,
        store: LocalStore,
    ) -> Self {
        let catalog = CatalogState::new();
        let cart = CartState::hydrate(store.carts()).await;
        let status = catalog.load(provider.as_ref()).await;
        let images = config.image_builder();

        info!(provider = provider.name(), ?status, "Session ready");

        Session {
            config,
            catalog,
            cart,
            provider,
            images,
        }
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    pub fn provider(&self) -> &dyn ContentProvider {
        self.provider.as_ref()
    }

    /// Image URL builder, present when a CMS project is configured.
    pub fn images(&self) -> Option<&ImageUrlBuilder> {
        self.images.as_ref()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("provider", &self.provider.name())
            .field("catalog", &self.catalog)
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}
