//! # Catalog State
//!
//! The Catalog Store: one product snapshot plus its loading status.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CatalogState::new()          status = Loading, catalog = empty        │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  load(provider) ── ok ──► status = Ready,  catalog = fetched products  │
//! │          │                                                              │
//! │          └───── err ───► status = Failed("Failed to load products")    │
//! │                          catalog stays empty, nothing retries           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Readers take a cheap `Arc<Catalog>` snapshot and release the lock before
//! doing any filtering.

use std::sync::Arc;
use storefront_content::ContentProvider;
use storefront_core::{Catalog, CatalogStatus, CoreError, CoreResult};
use tokio::sync::RwLock;
use tracing::{error, info, warn};

/// Message shown to the shopper when the catalog cannot be fetched.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load products";

#[derive(Debug, Default)]
struct Inner {
    status: CatalogStatus,
    catalog: Arc<Catalog>,
}

/// Catalog Store.
#[derive(Debug, Default)]
pub struct CatalogState {
    inner: RwLock<Inner>,
}

impl CatalogState {
    /// Creates an empty store in the `Loading` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the product collection once.
    ///
    /// A second call after the store has settled is ignored. Failures are
    /// logged with their cause and surfaced only as the generic message.
    pub async fn load(&self, provider: &dyn ContentProvider) -> CatalogStatus {
        if !self.inner.read().await.status.is_loading() {
            warn!("Catalog already loaded, ignoring reload");
            return self.status().await;
        }

        let result = provider.fetch_products().await;

        let mut inner = self.inner.write().await;
        if !inner.status.is_loading() {
            return inner.status.clone();
        }

        match result {
            Ok(products) => {
                info!(
                    provider = provider.name(),
                    products = products.len(),
                    "Catalog loaded"
                );
                inner.catalog = Arc::new(Catalog::new(products));
                inner.status = CatalogStatus::Ready;
            }
            Err(e) => {
                error!(provider = provider.name(), error = %e, "Catalog load failed");
                inner.status = CatalogStatus::Failed {
                    message: LOAD_FAILED_MESSAGE.to_string(),
                };
            }
        }

        inner.status.clone()
    }

    /// Current product snapshot. Empty until the load succeeds.
    pub async fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.inner.read().await.catalog)
    }

    pub async fn status(&self) -> CatalogStatus {
        self.inner.read().await.status.clone()
    }

    /// Status and snapshot read under one lock.
    pub async fn view(&self) -> (CatalogStatus, Arc<Catalog>) {
        let inner = self.inner.read().await;
        (inner.status.clone(), Arc::clone(&inner.catalog))
    }

    pub async fn is_ready(&self) -> bool {
        self.inner.read().await.status.is_ready()
    }

    /// Category options, `"all"` first.
    pub async fn categories(&self) -> Vec<String> {
        self.snapshot().await.categories()
    }

    /// Returns the snapshot, or `CatalogUnavailable` unless the store is ready.
    pub async fn require_ready(&self) -> CoreResult<Arc<Catalog>> {
        let (status, catalog) = self.view().await;
        match status {
            CatalogStatus::Ready => Ok(catalog),
            CatalogStatus::Loading => Err(CoreError::CatalogUnavailable(
                "Products are still loading".to_string(),
            )),
            CatalogStatus::Failed { message } => Err(CoreError::CatalogUnavailable(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storefront_content::{ContentError, ContentResult, StaticProvider};
    use storefront_core::{ImageRef, Money, Product};

    fn product(id: &str, category: &str) -> Product {
        Product {
            id: id.to_string(),
            name: id.to_uppercase(),
            slug: id.to_string(),
            description: String::new(),
            price: Money::from_major(100),
            discount_bps: 0,
            is_featured: false,
            stock_level: 1,
            category: category.to_string(),
            image: ImageRef::new(""),
        }
    }

    struct DownProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ContentProvider for DownProvider {
        fn name(&self) -> &'static str {
            "down"
        }

        async fn fetch_products(&self) -> ContentResult<Vec<Product>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ContentError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        }

        async fn fetch_product_by_slug(&self, _slug: &str) -> ContentResult<Option<Product>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_starts_loading_and_empty() {
        let state = CatalogState::new();
        assert!(state.status().await.is_loading());
        assert!(state.snapshot().await.is_empty());
        assert_eq!(state.categories().await, vec!["all"]);
        assert!(matches!(
            state.require_ready().await,
            Err(CoreError::CatalogUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_load_success() {
        let state = CatalogState::new();
        let provider = StaticProvider::new(vec![product("p1", "sofas"), product("p2", "chairs")]);

        assert_eq!(state.load(&provider).await, CatalogStatus::Ready);
        assert!(state.is_ready().await);
        assert_eq!(state.snapshot().await.len(), 2);
        assert_eq!(state.categories().await, vec!["all", "sofas", "chairs"]);
        assert!(state.require_ready().await.is_ok());
    }

    #[tokio::test]
    async fn test_load_failure_is_terminal() {
        let state = CatalogState::new();
        let provider = DownProvider {
            calls: AtomicUsize::new(0),
        };

        let status = state.load(&provider).await;
        assert_eq!(status.error(), Some(LOAD_FAILED_MESSAGE));
        assert!(state.snapshot().await.is_empty());

        // No retry: a second load does not call the provider again.
        state.load(&provider).await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.status().await.error(), Some(LOAD_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_reload_after_ready_keeps_snapshot() {
        let state = CatalogState::new();
        state.load(&StaticProvider::new(vec![product("p1", "sofas")])).await;
        state.load(&StaticProvider::new(vec![])).await;

        assert_eq!(state.snapshot().await.len(), 1);
    }
}
