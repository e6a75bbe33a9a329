//! # Cart Commands
//!
//! Cart manipulation and the checkout summary.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │  Page    │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                │             │
//! │                   add_to_cart     checkout_summary   clear_cart        │
//! │                   update_item                             │             │
//! │                   remove_item                             ▼             │
//! │                                                     (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every response carries the lines resolved against the current catalog,
//! so prices always reflect the latest product data.

use serde::Serialize;
use storefront_core::{Cart, CartLine, CartTotals, Catalog, CoreError};
use tracing::debug;

use crate::error::ApiError;
use crate::state::Session;

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl CartResponse {
    fn build(cart: &Cart, catalog: &Catalog) -> Self {
        CartResponse {
            lines: cart.lines(catalog),
            totals: cart.totals(catalog),
        }
    }
}

/// Checkout page summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    pub subtotal_display: String,
    pub total_display: String,
}

/// Gets the current cart contents.
///
/// ## Returns
/// Cart lines and totals against the current catalog
pub async fn get_cart(session: &Session) -> CartResponse {
    debug!("get_cart command");
    let catalog = session.catalog().snapshot().await;
    session
        .cart()
        .with_cart(|cart| CartResponse::build(cart, &catalog))
        .await
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Already in cart: quantity increases
/// - Not in cart: appended as a new line
/// - Quantity below 1 counts as 1
/// - Stock is not checked
///
/// Ids unknown to a loaded catalog are rejected. While the catalog is not
/// ready the id is accepted as-is and shows up as an unresolved line.
///
/// ## Arguments
/// * `product_id` - Product to add
/// * `quantity` - Quantity to add (default: 1)
pub async fn add_to_cart(
    session: &Session,
    product_id: &str,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id, quantity, "add_to_cart command");

    match session.catalog().require_ready().await {
        Ok(catalog) if catalog.find(product_id).is_none() => {
            return Err(CoreError::ProductNotFound(product_id.to_string()).into());
        }
        Ok(_) => {}
        Err(CoreError::CatalogUnavailable(reason)) => {
            debug!(product_id, %reason, "Catalog not ready, adding unresolved entry");
        }
        Err(e) => return Err(e.into()),
    }

    session.cart().add(product_id, quantity).await;
    Ok(get_cart(session).await)
}

/// Removes a product from the cart. Removing an absent product is a no-op.
pub async fn remove_from_cart(session: &Session, product_id: &str) -> CartResponse {
    debug!(product_id, "remove_from_cart command");
    session.cart().remove(product_id).await;
    get_cart(session).await
}

/// Sets a product's quantity. Zero or less removes the line.
pub async fn update_cart_item(session: &Session, product_id: &str, quantity: i64) -> CartResponse {
    debug!(product_id, quantity, "update_cart_item command");
    session.cart().set_quantity(product_id, quantity).await;
    get_cart(session).await
}

/// Empties the cart, after an order is placed.
pub async fn clear_cart(session: &Session) -> CartResponse {
    debug!("clear_cart command");
    session.cart().clear().await;
    get_cart(session).await
}

/// Summary for the checkout page.
///
/// No tax or shipping is added, so the total equals the subtotal.
pub async fn checkout_summary(session: &Session) -> CheckoutSummary {
    debug!("checkout_summary command");
    let CartResponse { lines, totals } = get_cart(session).await;

    CheckoutSummary {
        subtotal_display: session.config().format_money(totals.subtotal),
        total_display: session.config().format_money(totals.total),
        lines,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{failing_session, product, session_with};
    use crate::error::ErrorCode;
    use storefront_core::Money;

    async fn session() -> Session {
        session_with(vec![
            product("p1", "Asgaard sofa", "Sofas", 1000, false),
            product("p2", "Bar chair", "Chairs", 250, false),
        ])
        .await
    }

    #[tokio::test]
    async fn test_add_and_totals() {
        let session = session().await;

        add_to_cart(&session, "p1", Some(1)).await.unwrap();
        let response = add_to_cart(&session, "p2", Some(2)).await.unwrap();

        assert_eq!(response.lines.len(), 2);
        assert_eq!(response.totals.subtotal, Money::from_major(1500));
        assert_eq!(response.totals.item_count, 3);
        assert!(response.totals.can_checkout);
    }

    #[tokio::test]
    async fn test_add_defaults_to_one_and_merges() {
        let session = session().await;

        add_to_cart(&session, "p1", None).await.unwrap();
        let response = add_to_cart(&session, "p1", Some(0)).await.unwrap();

        assert_eq!(response.lines.len(), 1);
        assert_eq!(response.lines[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let session = session().await;
        let err = add_to_cart(&session, "ghost", Some(1)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: ghost");
        assert!(get_cart(&session).await.lines.is_empty());
    }

    #[tokio::test]
    async fn test_add_while_catalog_unavailable_is_unresolved() {
        let session = failing_session().await;
        let response = add_to_cart(&session, "p1", Some(2)).await.unwrap();

        assert!(!response.lines[0].is_resolved());
        assert_eq!(response.totals.subtotal, Money::zero());
        assert_eq!(response.totals.item_count, 2);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let session = session().await;
        add_to_cart(&session, "p1", Some(1)).await.unwrap();

        let once = remove_from_cart(&session, "p1").await;
        let twice = remove_from_cart(&session, "p1").await;

        assert!(once.lines.is_empty());
        assert_eq!(once.totals, twice.totals);
        assert!(!twice.totals.can_checkout);
    }

    #[tokio::test]
    async fn test_update_and_clear() {
        let session = session().await;
        add_to_cart(&session, "p2", Some(1)).await.unwrap();

        let response = update_cart_item(&session, "p2", 4).await;
        assert_eq!(response.totals.subtotal, Money::from_major(1000));

        let response = update_cart_item(&session, "p2", 0).await;
        assert!(response.lines.is_empty());

        add_to_cart(&session, "p1", Some(1)).await.unwrap();
        assert!(clear_cart(&session).await.lines.is_empty());
    }

    #[tokio::test]
    async fn test_checkout_summary() {
        let session = session().await;
        add_to_cart(&session, "p1", Some(1)).await.unwrap();
        add_to_cart(&session, "p2", Some(2)).await.unwrap();

        let summary = checkout_summary(&session).await;
        assert_eq!(summary.totals.total, summary.totals.subtotal);
        assert_eq!(summary.subtotal_display, "Rs.1,500");
        assert_eq!(summary.total_display, "Rs.1,500");

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totals"]["canCheckout"], true);
        assert_eq!(json["totals"]["itemCount"], 3);
        assert_eq!(json["totals"]["subtotal"], 150_000);
        assert_eq!(json["lines"][1]["lineTotal"], 50_000);
    }

    #[tokio::test]
    async fn test_empty_cart_cannot_checkout() {
        let session = session().await;
        let summary = checkout_summary(&session).await;

        assert!(!summary.totals.can_checkout);
        assert_eq!(summary.total_display, "Rs.0");
    }
}
