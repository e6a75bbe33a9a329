//! # Cart Repository
//!
//! Reads and writes the cart document in the `cartItems` slot.
//!
//! ## Failure Handling
//! - Missing slot → `None`
//! - Unreadable or unparseable slot → `None`, logged at warn
//! - Write failure → `Err`, the caller decides what to do with it

use storefront_core::{Cart, CartDocument, StoredCart, CART_STORAGE_KEY};
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::store::LocalStore;

/// Repository for the persisted cart.
#[derive(Debug, Clone)]
pub struct CartRepository {
    store: LocalStore,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(store: LocalStore) -> Self {
        CartRepository { store }
    }

    /// Loads the saved cart.
    ///
    /// Never fails: a corrupt or unreadable slot is treated as no cart, so
    /// startup always proceeds.
    pub async fn load(&self) -> Option<Cart> {
        let raw = match self.store.read_slot(CART_STORAGE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No saved cart");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Could not read saved cart, starting empty");
                return None;
            }
        };

        match StoredCart::from_json(&raw) {
            Ok(stored) => {
                let cart = stored.into_cart();
                debug!(entries = cart.len(), "Loaded saved cart");
                Some(cart)
            }
            Err(e) => {
                warn!(error = %e, "Saved cart is malformed, starting empty");
                None
            }
        }
    }

    /// Overwrites the saved cart with `cart`.
    pub async fn save(&self, cart: &Cart) -> StoreResult<()> {
        let json = serde_json::to_string(&CartDocument::from(cart))?;
        self.store.write_slot(CART_STORAGE_KEY, &json).await?;

        debug!(entries = cart.len(), items = cart.item_count(), "Saved cart");
        Ok(())
    }

    /// Deletes the saved cart.
    pub async fn clear(&self) -> StoreResult<()> {
        self.store.clear_slot(CART_STORAGE_KEY).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;

    async fn memory_repo() -> (LocalStore, CartRepository) {
        let store = LocalStore::open(StoreConfig::in_memory()).await.unwrap();
        let repo = store.carts();
        (store, repo)
    }

    #[tokio::test]
    async fn test_missing_slot_loads_none() {
        let (_, repo) = memory_repo().await;
        assert!(repo.load().await.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let (_, repo) = memory_repo().await;

        let mut cart = Cart::new();
        cart.add("p1", 2);
        cart.add("p2", 1);
        repo.save(&cart).await.unwrap();

        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded.entries(), cart.entries());
    }

    #[tokio::test]
    async fn test_last_save_wins() {
        let (_, repo) = memory_repo().await;

        let mut cart = Cart::new();
        cart.add("p1", 1);
        repo.save(&cart).await.unwrap();
        cart.remove("p1");
        cart.add("p2", 4);
        repo.save(&cart).await.unwrap();

        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded.quantity_of("p1"), None);
        assert_eq!(loaded.quantity_of("p2"), Some(4));
    }

    #[tokio::test]
    async fn test_malformed_slot_loads_none() {
        let (store, repo) = memory_repo().await;

        store
            .write_slot(CART_STORAGE_KEY, "{\"entries\": [oops")
            .await
            .unwrap();

        assert!(repo.load().await.is_none());
    }

    #[tokio::test]
    async fn test_legacy_snapshot_slot() {
        let (store, repo) = memory_repo().await;

        store
            .write_slot(
                CART_STORAGE_KEY,
                r#"[{"product":{"id":"p9","name":"Lamp","price":45},"quantity":3}]"#,
            )
            .await
            .unwrap();

        let cart = repo.load().await.unwrap();
        assert_eq!(cart.quantity_of("p9"), Some(3));
    }

    #[tokio::test]
    async fn test_file_backed_round_trip_across_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = LocalStore::open(StoreConfig::new(dir.path())).await.unwrap();
            let mut cart = Cart::new();
            cart.add("p1", 5);
            store.carts().save(&cart).await.unwrap();
        }

        let reopened = LocalStore::open(StoreConfig::new(dir.path())).await.unwrap();
        let cart = reopened.carts().load().await.unwrap();
        assert_eq!(cart.quantity_of("p1"), Some(5));
    }

    #[tokio::test]
    async fn test_clear() {
        let (_, repo) = memory_repo().await;

        let mut cart = Cart::new();
        cart.add("p1", 1);
        repo.save(&cart).await.unwrap();
        repo.clear().await.unwrap();

        assert!(repo.load().await.is_none());
    }
}
