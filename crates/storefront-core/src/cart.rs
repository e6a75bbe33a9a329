//! # Cart Ledger
//!
//! The shopper's cart: quantity-keyed product entries in first-added order.
//!
//! ## Entity Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Lifecycle                                  │
//! │                                                                         │
//! │  durable slot ──► StoredCart ──► normalize() ──► Cart                  │
//! │  (missing/bad → Cart::new())                     │                      │
//! │                                                  │ add / remove /       │
//! │                                                  │ set_quantity         │
//! │                                                  ▼                      │
//! │                                  CartDocument ──► durable slot          │
//! │                                  (after every mutation, full overwrite) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one entry per product id
//! - Every quantity is ≥ 1; an entry that would drop below that is removed
//! - Entry order is first-added order
//!
//! ## Persisted Shape
//! Only `productId` and `quantity` are stored. Prices are looked up in the
//! live [`Catalog`] whenever totals are computed, so a reload never replays
//! a stale price. Carts written by earlier builds embedded a full product
//! snapshot per entry; [`StoredCart`] still reads that form and keeps only
//! the id and quantity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::money::Money;
use crate::types::Product;
use crate::validation::normalize_quantity;
use crate::CART_DOCUMENT_VERSION;

// =============================================================================
// Cart Entry
// =============================================================================

/// One product line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartEntry {
    /// Product id (CMS document id).
    pub product_id: String,

    /// Units of the product. Always ≥ 1 inside a [`Cart`].
    pub quantity: i64,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    entries: Vec<CartEntry>,
    updated_at: DateTime<Utc>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart {
            entries: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Builds a cart from raw entries, enforcing the invariants.
    pub fn from_entries(entries: Vec<CartEntry>, updated_at: DateTime<Utc>) -> Self {
        let mut cart = Cart {
            entries,
            updated_at,
        };
        cart.normalize();
        cart
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds `quantity` units of a product.
    ///
    /// ## Behavior
    /// - Quantity below 1 is clamped to 1
    /// - Existing entry: quantity increases (saturating, no upper bound)
    /// - New product: appended at the end
    ///
    /// Stock levels are not consulted.
    ///
    /// ## Returns
    /// The entry's quantity after the add.
    pub fn add(&mut self, product_id: &str, quantity: i64) -> i64 {
        let quantity = normalize_quantity(quantity);
        self.touch();

        if let Some(entry) = self.entry_mut(product_id) {
            entry.quantity = entry.quantity.saturating_add(quantity);
            return entry.quantity;
        }

        self.entries.push(CartEntry {
            product_id: product_id.to_string(),
            quantity,
        });
        quantity
    }

    /// Removes a product's entry.
    ///
    /// Removing a product that is not in the cart is a no-op.
    ///
    /// ## Returns
    /// `true` if an entry was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.product_id != product_id);

        let removed = self.entries.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Sets a product's quantity outright.
    ///
    /// A quantity of zero or less removes the entry. Products not in the
    /// cart are left alone.
    ///
    /// ## Returns
    /// `true` if the cart changed.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        if quantity < 1 {
            return self.remove(product_id);
        }

        match self.entry_mut(product_id) {
            Some(entry) if entry.quantity != quantity => {
                entry.quantity = quantity;
                self.touch();
                true
            }
            _ => false,
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.touch();
    }

    /// Restores the invariants on entries that came from outside.
    ///
    /// Duplicate ids merge into the first occurrence (quantities summed) and
    /// non-positive quantities are dropped.
    pub fn normalize(&mut self) {
        let mut merged: Vec<CartEntry> = Vec::with_capacity(self.entries.len());

        for entry in self.entries.drain(..) {
            if entry.quantity < 1 {
                warn!(
                    product_id = %entry.product_id,
                    quantity = entry.quantity,
                    "Dropping cart entry with non-positive quantity"
                );
                continue;
            }

            match merged.iter_mut().find(|m| m.product_id == entry.product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(entry.quantity)
                }
                None => merged.push(entry),
            }
        }

        self.entries = merged;
    }

    fn entry_mut(&mut self, product_id: &str) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|e| e.product_id == product_id)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    // -------------------------------------------------------------------------
    // Derived Views
    // -------------------------------------------------------------------------

    /// Entries in first-added order.
    #[inline]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// When the cart last changed.
    #[inline]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Number of distinct products.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Quantity held for a product, if present.
    pub fn quantity_of(&self, product_id: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|e| e.product_id == product_id)
            .map(|e| e.quantity)
    }

    /// Total units across all entries (the header badge number).
    pub fn item_count(&self) -> i64 {
        self.entries
            .iter()
            .fold(0i64, |acc, e| acc.saturating_add(e.quantity))
    }

    /// Checkout is offered only when there is something to buy.
    #[inline]
    pub fn can_checkout(&self) -> bool {
        !self.is_empty()
    }

    /// Sum of `price × quantity` over entries found in the catalog.
    ///
    /// Entries whose product is missing from the catalog contribute nothing.
    pub fn subtotal(&self, catalog: &Catalog) -> Money {
        self.entries
            .iter()
            .filter_map(|e| catalog.find(&e.product_id).map(|p| p.price * e.quantity))
            .sum()
    }

    /// Entries joined with their catalog products.
    pub fn lines(&self, catalog: &Catalog) -> Vec<CartLine> {
        self.entries
            .iter()
            .map(|e| CartLine::resolve(e, catalog.find(&e.product_id)))
            .collect()
    }

    /// Summary figures for the cart page and header.
    pub fn totals(&self, catalog: &Catalog) -> CartTotals {
        let lines = self.lines(catalog);
        let subtotal: Money = lines.iter().map(|l| l.line_total).sum();
        let unresolved_count = lines.iter().filter(|l| l.product.is_none()).count();

        CartTotals {
            line_count: self.len(),
            item_count: self.item_count(),
            subtotal,
            total: subtotal,
            unresolved_count,
            can_checkout: self.can_checkout(),
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// A cart entry resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: i64,

    /// `None` when the product is no longer in the catalog.
    pub product: Option<Product>,

    /// `unit price × quantity` in minor units, zero for unresolved lines.
    pub line_total: Money,
}

impl CartLine {
    fn resolve(entry: &CartEntry, product: Option<&Product>) -> Self {
        let line_total = product
            .map(|p| p.price * entry.quantity)
            .unwrap_or_else(Money::zero);

        CartLine {
            product_id: entry.product_id.clone(),
            quantity: entry.quantity,
            product: product.cloned(),
            line_total,
        }
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.product.is_some()
    }
}

/// Cart totals summary for API responses.
///
/// No tax or shipping is charged, so `total` equals `subtotal`. Both are
/// minor-unit integers on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Distinct products.
    pub line_count: usize,
    /// Total units.
    pub item_count: i64,
    pub subtotal: Money,
    pub total: Money,
    /// Entries whose product could not be found in the catalog.
    pub unresolved_count: usize,
    pub can_checkout: bool,
}

// =============================================================================
// Persisted Representation
// =============================================================================

/// The cart as written to the durable slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDocument {
    pub version: u32,
    pub entries: Vec<CartEntry>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Cart> for CartDocument {
    fn from(cart: &Cart) -> Self {
        CartDocument {
            version: CART_DOCUMENT_VERSION,
            entries: cart.entries.clone(),
            updated_at: cart.updated_at,
        }
    }
}

/// Entry of the snapshot array written by earlier storefront builds.
///
/// ```text
/// [{ "product": { "id": "p1", "name": "...", "price": 100, ... }, "quantity": 2 }]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyCartItem {
    pub product: LegacyProductRef,
    pub quantity: i64,
}

/// Only the id survives from a legacy product snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyProductRef {
    pub id: String,
}

/// Any cart representation the durable slot may contain.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StoredCart {
    Current(CartDocument),
    Legacy(Vec<LegacyCartItem>),
}

impl StoredCart {
    /// Parses slot content.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Converts into a normalized [`Cart`].
    pub fn into_cart(self) -> Cart {
        match self {
            StoredCart::Current(doc) => {
                if doc.version > CART_DOCUMENT_VERSION {
                    warn!(
                        version = doc.version,
                        "Cart document is newer than this build, reading known fields"
                    );
                }
                Cart::from_entries(doc.entries, doc.updated_at)
            }
            StoredCart::Legacy(items) => {
                let entries = items
                    .into_iter()
                    .map(|item| CartEntry {
                        product_id: item.product.id,
                        quantity: item.quantity,
                    })
                    .collect();
                Cart::from_entries(entries, Utc::now())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageRef;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            slug: format!("product-{}", id),
            description: String::new(),
            price: Money::from_major(price),
            discount_bps: 0,
            is_featured: false,
            stock_level: 3,
            category: "chairs".to_string(),
            image: ImageRef::new("image-a-1x1-png"),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![product("p1", 100), product("p2", 250)])
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::new();
        assert_eq!(cart.item_count(), 0);
        assert!(cart.subtotal(&catalog()).is_zero());
        assert!(!cart.can_checkout());
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut cart = Cart::new();

        assert_eq!(cart.add("p1", 2), 2);
        assert_eq!(cart.add("p1", 3), 5);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of("p1"), Some(5));
        assert_eq!(cart.subtotal(&catalog()), Money::from_major(500));
        assert!(cart.can_checkout());
    }

    #[test]
    fn test_add_appends_in_first_added_order() {
        let mut cart = Cart::new();
        cart.add("p2", 1);
        cart.add("p1", 1);
        cart.add("p2", 1);

        let ids: Vec<_> = cart.entries().iter().map(|e| e.product_id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p1"]);
    }

    #[test]
    fn test_add_clamps_non_positive_quantity() {
        let mut cart = Cart::new();
        assert_eq!(cart.add("p1", 0), 1);
        assert_eq!(cart.add("p1", -4), 2);
    }

    #[test]
    fn test_add_saturates() {
        let mut cart = Cart::new();
        cart.add("p1", i64::MAX);
        assert_eq!(cart.add("p1", 10), i64::MAX);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add("p1", 1);
        cart.add("p2", 1);

        assert!(cart.remove("p1"));
        let once = cart.entries().to_vec();
        assert!(!cart.remove("p1"));

        assert_eq!(cart.entries(), once.as_slice());
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add("p1", 1);

        assert!(cart.set_quantity("p1", 4));
        assert_eq!(cart.quantity_of("p1"), Some(4));
        assert!(!cart.set_quantity("p1", 4));

        assert!(cart.set_quantity("p1", 0));
        assert!(cart.is_empty());

        assert!(!cart.set_quantity("missing", 3));
    }

    #[test]
    fn test_unresolved_entries_counted_but_not_priced() {
        let mut cart = Cart::new();
        cart.add("p1", 1);
        cart.add("gone", 2);

        let totals = cart.totals(&catalog());
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.unresolved_count, 1);
        assert_eq!(totals.subtotal, Money::from_major(100));
        assert_eq!(totals.total, totals.subtotal);

        let lines = cart.lines(&catalog());
        assert!(lines[0].is_resolved());
        assert!(!lines[1].is_resolved());
        assert!(lines[1].line_total.is_zero());
    }

    #[test]
    fn test_subtotal_uses_live_price() {
        let mut cart = Cart::new();
        cart.add("p1", 2);

        let repriced = Catalog::new(vec![product("p1", 80)]);
        assert_eq!(cart.subtotal(&repriced), Money::from_major(160));
    }

    #[test]
    fn test_normalize_merges_and_drops() {
        let cart = Cart::from_entries(
            vec![
                CartEntry {
                    product_id: "a".to_string(),
                    quantity: 2,
                },
                CartEntry {
                    product_id: "b".to_string(),
                    quantity: 0,
                },
                CartEntry {
                    product_id: "a".to_string(),
                    quantity: 3,
                },
                CartEntry {
                    product_id: "c".to_string(),
                    quantity: -1,
                },
            ],
            Utc::now(),
        );

        assert_eq!(
            cart.entries(),
            &[CartEntry {
                product_id: "a".to_string(),
                quantity: 5
            }]
        );
    }

    #[test]
    fn test_document_round_trip() {
        let mut cart = Cart::new();
        cart.add("p1", 2);
        cart.add("p2", 1);

        let json = serde_json::to_string(&CartDocument::from(&cart)).unwrap();
        assert!(json.contains("\"productId\":\"p1\""));
        assert!(json.contains("\"version\":1"));

        let restored = StoredCart::from_json(&json).unwrap().into_cart();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_legacy_snapshot_is_read() {
        let raw = r#"[
            {"product": {"id": "p1", "name": "Chair", "price": 100, "slug": "chair"}, "quantity": 2},
            {"product": {"id": "p2", "name": "Sofa", "price": 999}, "quantity": 1},
            {"product": {"id": "p1", "name": "Chair", "price": 100}, "quantity": 1}
        ]"#;

        let cart = StoredCart::from_json(raw).unwrap().into_cart();
        assert_eq!(cart.quantity_of("p1"), Some(3));
        assert_eq!(cart.quantity_of("p2"), Some(1));
        // Legacy prices are ignored in favour of the catalog.
        assert_eq!(cart.subtotal(&catalog()), Money::from_major(550));
    }

    #[test]
    fn test_malformed_content_is_an_error() {
        assert!(StoredCart::from_json("{not json").is_err());
        assert!(StoredCart::from_json(r#"{"items": 3}"#).is_err());
    }

    // -------------------------------------------------------------------------
    // Property Tests
    // -------------------------------------------------------------------------

    #[derive(Debug, Clone)]
    enum Op {
        Add(String, i64),
        Remove(String),
        Set(String, i64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let id = prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(String::from);
        prop_oneof![
            (id.clone(), -3i64..20).prop_map(|(id, q)| Op::Add(id, q)),
            id.clone().prop_map(Op::Remove),
            (id, -3i64..20).prop_map(|(id, q)| Op::Set(id, q)),
        ]
    }

    fn apply_ops(ops: &[Op]) -> Cart {
        let mut cart = Cart::new();
        for op in ops {
            match op {
                Op::Add(id, q) => {
                    cart.add(id, *q);
                }
                Op::Remove(id) => {
                    cart.remove(id);
                }
                Op::Set(id, q) => {
                    cart.set_quantity(id, *q);
                }
            }
        }
        cart
    }

    proptest! {
        #[test]
        fn prop_unique_ids_and_positive_quantities(ops in prop::collection::vec(op_strategy(), 0..60)) {
            let cart = apply_ops(&ops);

            let mut seen = std::collections::HashSet::new();
            for entry in cart.entries() {
                prop_assert!(seen.insert(entry.product_id.clone()));
                prop_assert!(entry.quantity >= 1);
            }

            let sum: i64 = cart.entries().iter().map(|e| e.quantity).sum();
            prop_assert_eq!(cart.item_count(), sum);
        }

        #[test]
        fn prop_remove_twice_equals_once(ops in prop::collection::vec(op_strategy(), 0..40), id in "[a-d]") {
            let mut once = apply_ops(&ops);
            once.remove(&id);
            let mut twice = once.clone();
            twice.remove(&id);

            prop_assert_eq!(once.entries(), twice.entries());
        }

        #[test]
        fn prop_persist_then_hydrate_round_trips(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let cart = apply_ops(&ops);
            let json = serde_json::to_string(&CartDocument::from(&cart)).unwrap();
            let restored = StoredCart::from_json(&json).unwrap().into_cart();

            let as_map = |c: &Cart| -> BTreeMap<String, i64> {
                c.entries().iter().map(|e| (e.product_id.clone(), e.quantity)).collect()
            };
            prop_assert_eq!(as_map(&restored), as_map(&cart));
        }
    }
}
