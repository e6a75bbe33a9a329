//! # Cart State
//!
//! The Cart Store: the shopper's cart, mirrored to local storage after
//! every change.
//!
//! ## Thread Safety
//! The cart sits behind a tokio `Mutex` that stays held while the new
//! state is written out. Two concurrent mutations therefore persist in the
//! order they were applied, and the slot always ends with the latest cart.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Shopper Action           Command                 Cart State Change     │
//! │  ──────────────           ───────                 ─────────────────     │
//! │                                                                         │
//! │  Add to Cart ────────────► add_to_cart() ───────► cart.add(id, n)       │
//! │                                                                         │
//! │  Change Quantity ────────► update_cart_item() ──► cart.set_quantity()   │
//! │                                                                         │
//! │  Click Remove ───────────► remove_from_cart() ──► cart.remove(id)       │
//! │                                                                         │
//! │  Place Order ────────────► clear_cart() ────────► cart.clear()          │
//! │                                                                         │
//! │  Every change ───────────► repository.save(&cart)   ("cartItems" slot) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed save is logged and the in-memory cart keeps the change: the
//! shopper is never blocked by storage.

use storefront_core::Cart;
use storefront_store::CartRepository;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Cart Store.
#[derive(Debug)]
pub struct CartState {
    cart: Mutex<Cart>,
    repository: CartRepository,
}

impl CartState {
    /// Restores the saved cart, or starts empty.
    ///
    /// This is the only constructor, so no cart is ever observed before the
    /// saved state has been read.
    pub async fn hydrate(repository: CartRepository) -> Self {
        let cart = match repository.load().await {
            Some(cart) => {
                info!(entries = cart.len(), items = cart.item_count(), "Cart restored");
                cart
            }
            None => Cart::new(),
        };

        CartState {
            cart: Mutex::new(cart),
            repository,
        }
    }

    /// Adds `quantity` units of a product and returns the new quantity.
    pub async fn add(&self, product_id: &str, quantity: i64) -> i64 {
        self.mutate(|cart| {
            let quantity = cart.add(product_id, quantity);
            debug!(product_id, quantity, "Added to cart");
            (quantity, true)
        })
        .await
    }

    /// Removes a product. Returns `true` if it was in the cart.
    pub async fn remove(&self, product_id: &str) -> bool {
        self.mutate(|cart| {
            let removed = cart.remove(product_id);
            (removed, removed)
        })
        .await
    }

    /// Sets a product's quantity; zero or less removes it.
    pub async fn set_quantity(&self, product_id: &str, quantity: i64) -> bool {
        self.mutate(|cart| {
            let changed = cart.set_quantity(product_id, quantity);
            (changed, changed)
        })
        .await
    }

    /// Empties the cart.
    pub async fn clear(&self) {
        self.mutate(|cart| {
            cart.clear();
            ((), true)
        })
        .await
    }

    /// Copy of the current cart.
    pub async fn snapshot(&self) -> Cart {
        self.cart.lock().await.clone()
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = cart_state.with_cart(|cart| cart.item_count()).await;
    /// ```
    pub async fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().await;
        f(&cart)
    }

    /// Applies `f` and, when it reports a change, saves the result before
    /// releasing the lock.
    async fn mutate<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> (R, bool),
    {
        let mut cart = self.cart.lock().await;
        let (result, changed) = f(&mut cart);

        if changed {
            if let Err(e) = self.repository.save(&cart).await {
                warn!(error = %e, "Failed to persist cart, keeping in-memory state");
            }
        }

        result
    }
}
