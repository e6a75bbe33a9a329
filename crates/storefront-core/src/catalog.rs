//! # Catalog Snapshot
//!
//! The full product collection as fetched once from the Content Provider.
//!
//! A [`Catalog`] is immutable. The Catalog Store in the app crate swaps in a
//! new snapshot when a load completes; everything downstream (filtering,
//! cart price resolution) borrows from it.

use serde::Serialize;

use crate::types::Product;
use crate::ALL_CATEGORIES;

/// Ordered, immutable product collection.
///
/// Source order is preserved: it is the "default" sort of the shop grid.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Wraps a fetched product list, keeping its order.
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// All products in source order.
    #[inline]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product by its id.
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks up a product by its slug.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    /// Products flagged as featured, in source order.
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_featured).collect()
    }

    /// Category options for the shop filter.
    ///
    /// ## Rules
    /// - Always starts with the `"all"` sentinel
    /// - Then each distinct category in first-seen order
    /// - Duplicates collapse on exact match
    ///
    /// ## Example
    /// ```text
    /// products: [sofas, chairs, chairs, tables]
    ///      │
    ///      ▼
    /// categories(): ["all", "sofas", "chairs", "tables"]
    /// ```
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for product in &self.products {
            if !categories.iter().any(|c| c == &product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(products: Vec<Product>) -> Self {
        Catalog::new(products)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::ImageRef;

    fn product(id: &str, category: &str, featured: bool) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            slug: format!("product-{}", id),
            description: String::new(),
            price: Money::from_major(100),
            discount_bps: 0,
            is_featured: featured,
            stock_level: 5,
            category: category.to_string(),
            image: ImageRef::new(format!("image-{}-10x10-png", id)),
        }
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = Catalog::new(vec![
            product("1", "sofas", false),
            product("2", "chairs", false),
            product("3", "chairs", false),
            product("4", "tables", false),
            product("5", "sofas", false),
        ]);

        assert_eq!(catalog.categories(), vec!["all", "sofas", "chairs", "tables"]);
    }

    #[test]
    fn test_categories_of_empty_catalog() {
        assert_eq!(Catalog::default().categories(), vec!["all"]);
    }

    #[test]
    fn test_find_by_id_and_slug() {
        let catalog = Catalog::new(vec![product("1", "sofas", false), product("2", "chairs", false)]);

        assert_eq!(catalog.find("2").map(|p| p.slug.as_str()), Some("product-2"));
        assert_eq!(catalog.find_by_slug("product-1").map(|p| p.id.as_str()), Some("1"));
        assert!(catalog.find("missing").is_none());
        assert!(catalog.find_by_slug("missing").is_none());
    }

    #[test]
    fn test_featured_keeps_source_order() {
        let catalog = Catalog::new(vec![
            product("1", "sofas", true),
            product("2", "chairs", false),
            product("3", "chairs", true),
        ]);

        let ids: Vec<_> = catalog.featured().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
