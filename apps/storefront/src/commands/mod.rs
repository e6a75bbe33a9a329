//! # Commands Module
//!
//! Everything the render layer (or the CLI) can ask of a session.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Shop grid, product page, search, featured
//! └── cart.rs     ◄─── Cart manipulation, checkout summary
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Render layer / CLI                                                     │
//! │  ──────────────────                                                     │
//! │  add_to_cart(&session, "p1", Some(2))                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Rust Backend                                                           │
//! │  ────────────                                                           │
//! │  pub async fn add_to_cart(                                              │
//! │      session: &Session,       ◄── Explicit context, no globals         │
//! │      product_id: &str,                                                  │
//! │      quantity: Option<i64>,   ◄── Optional param                       │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (JSON serialization, camelCase)                               │
//! │         ▼                                                               │
//! │  { lines: [...], totals: { subtotal, itemCount, canCheckout, ... } }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod product;

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use std::sync::Arc;
    use storefront_content::{ContentError, ContentProvider, ContentResult, StaticProvider};
    use storefront_core::{ImageRef, Money, Product};
    use storefront_store::{LocalStore, StoreConfig};

    use crate::state::{ConfigState, Session};

    pub fn product(id: &str, name: &str, category: &str, price: i64, featured: bool) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            description: String::new(),
            price: Money::from_major(price),
            discount_bps: 0,
            is_featured: featured,
            stock_level: 5,
            category: category.to_string(),
            image: ImageRef::new(""),
        }
    }

    pub async fn session_with(products: Vec<Product>) -> Session {
        session_with_config(ConfigState::default(), products).await
    }

    pub async fn session_with_config(config: ConfigState, products: Vec<Product>) -> Session {
        let store = LocalStore::open(StoreConfig::in_memory()).await.unwrap();
        Session::start(config, Arc::new(StaticProvider::new(products)), store).await
    }

    /// Provider whose every request fails like an unreachable CMS.
    pub struct OfflineProvider;

    #[async_trait]
    impl ContentProvider for OfflineProvider {
        fn name(&self) -> &'static str {
            "offline"
        }

        async fn fetch_products(&self) -> ContentResult<Vec<Product>> {
            Err(ContentError::Status {
                status: 502,
                body: "bad gateway".to_string(),
            })
        }

        async fn fetch_product_by_slug(&self, _slug: &str) -> ContentResult<Option<Product>> {
            Err(ContentError::Decode("not a query envelope".to_string()))
        }
    }

    pub async fn failing_session() -> Session {
        let store = LocalStore::open(StoreConfig::in_memory()).await.unwrap();
        Session::start(ConfigState::default(), Arc::new(OfflineProvider), store).await
    }
}
