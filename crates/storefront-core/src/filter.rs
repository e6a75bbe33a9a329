//! # Filter/Sort Engine
//!
//! Derives the displayed product list from the catalog and the shopper's
//! filter selections.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    apply(products, selection)                           │
//! │                                                                         │
//! │  catalog order ──► 1. category  ──► 2. price range ──► 3. sort ──► out │
//! │                      (ignore case)    (inclusive)       (stable)        │
//! │                                                                         │
//! │  "all" category  → step 1 skipped                                      │
//! │  "all" range     → step 2 skipped                                      │
//! │  default sort    → step 3 keeps the order produced by steps 1-2        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purity
//! `apply` and `search` borrow the product slice immutably and return
//! references into it. There is no cache; callers that want memoization
//! should key it by the full selection plus the catalog snapshot.
//!
//! ## Lenient Input
//! Selections arrive as raw strings from the render layer (select boxes,
//! radio buttons, query params). Anything unrecognized normalizes to the
//! default for that field. Parsing never fails.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;
use crate::ALL_CATEGORIES;

// =============================================================================
// Sort Mode
// =============================================================================

/// How the filtered list is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum SortMode {
    /// Catalog order.
    #[default]
    Default,
    /// Cheapest first; ties keep catalog order.
    PriceAscending,
    /// Most expensive first; ties keep catalog order.
    PriceDescending,
}

impl SortMode {
    /// Parses a sort token, falling back to [`SortMode::Default`].
    ///
    /// Accepts the canonical tokens plus the `price-low-high` /
    /// `price-high-low` values the shop's select box sends.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "price-ascending" | "price-low-high" | "price-asc" => SortMode::PriceAscending,
            "price-descending" | "price-high-low" | "price-desc" => SortMode::PriceDescending,
            _ => SortMode::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Default => "default",
            SortMode::PriceAscending => "price-ascending",
            SortMode::PriceDescending => "price-descending",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Price Range
// =============================================================================

/// A price band, bounds inclusive.
///
/// ## Bound Test
/// - `min` and `max` present → `min ≤ price ≤ max`
/// - only `min` present      → `price ≥ min`
/// - anything else           → no filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceRange {
    pub min: Option<Money>,
    pub max: Option<Money>,
}

impl PriceRange {
    /// The "all prices" range.
    pub const ALL: PriceRange = PriceRange {
        min: None,
        max: None,
    };

    /// Closed range `[min, max]`.
    pub const fn between(min: Money, max: Money) -> Self {
        PriceRange {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Half-open range `[min, ∞)`.
    pub const fn at_least(min: Money) -> Self {
        PriceRange {
            min: Some(min),
            max: None,
        }
    }

    /// Parses a range token in major units.
    ///
    /// ## Accepted Forms
    /// ```text
    /// "all"       → PriceRange::ALL
    /// "200-500"   → [200, 500]
    /// "1500"      → [1500, ∞)
    /// "1500-"     → [1500, ∞)
    /// "500-200"   → PriceRange::ALL   (inverted)
    /// "cheap"     → PriceRange::ALL   (unrecognized)
    /// ```
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case(ALL_CATEGORIES) {
            return PriceRange::ALL;
        }

        let parsed = match raw.split_once('-') {
            Some((min, "")) => parse_bound(min).map(PriceRange::at_least),
            Some((min, max)) => match (parse_bound(min), parse_bound(max)) {
                (Some(min), Some(max)) if min <= max => Some(PriceRange::between(min, max)),
                _ => None,
            },
            None => parse_bound(raw).map(PriceRange::at_least),
        };

        parsed.unwrap_or(PriceRange::ALL)
    }

    #[inline]
    pub fn is_all(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Applies the bound test to a price.
    pub fn contains(&self, price: Money) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min <= price && price <= max,
            (Some(min), None) => price >= min,
            _ => true,
        }
    }
}

fn parse_bound(raw: &str) -> Option<Money> {
    let value: f64 = raw.trim().parse().ok()?;
    if value < 0.0 {
        return None;
    }
    Money::from_major_f64(value)
}

/// A price band offered by the shop's filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRangePreset {
    pub label: &'static str,
    pub value: &'static str,
}

impl PriceRangePreset {
    pub fn range(&self) -> PriceRange {
        PriceRange::parse(self.value)
    }
}

/// The radio options shown in the shop's price filter, in display order.
pub const PRICE_RANGE_PRESETS: [PriceRangePreset; 5] = [
    PriceRangePreset {
        label: "All Prices",
        value: "all",
    },
    PriceRangePreset {
        label: "Under 200",
        value: "0-200",
    },
    PriceRangePreset {
        label: "200 - 500",
        value: "200-500",
    },
    PriceRangePreset {
        label: "500 - 1500",
        value: "500-1500",
    },
    PriceRangePreset {
        label: "Over 1500",
        value: "1500",
    },
];

// =============================================================================
// Filter Selection
// =============================================================================

/// The shopper's current filter and sort choices. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FilterSelection {
    /// Category to keep, or `"all"`.
    pub category: String,
    pub price_range: PriceRange,
    pub sort: SortMode,
}

impl Default for FilterSelection {
    fn default() -> Self {
        FilterSelection {
            category: ALL_CATEGORIES.to_string(),
            price_range: PriceRange::ALL,
            sort: SortMode::Default,
        }
    }
}

impl FilterSelection {
    /// Builds a selection from raw render-layer values.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::filter::{FilterSelection, PriceRange, SortMode};
    /// use storefront_core::Money;
    ///
    /// let selection = FilterSelection::from_params("Chairs", "200-500", "price-high-low");
    /// assert_eq!(selection.category, "Chairs");
    /// assert_eq!(
    ///     selection.price_range,
    ///     PriceRange::between(Money::from_major(200), Money::from_major(500))
    /// );
    /// assert_eq!(selection.sort, SortMode::PriceDescending);
    ///
    /// let fallback = FilterSelection::from_params("", "???", "newest");
    /// assert_eq!(fallback, FilterSelection::default());
    /// ```
    pub fn from_params(category: &str, price_range: &str, sort: &str) -> Self {
        let category = category.trim();
        let category = if category.is_empty() || category.eq_ignore_ascii_case(ALL_CATEGORIES) {
            ALL_CATEGORIES.to_string()
        } else {
            category.to_string()
        };

        FilterSelection {
            category,
            price_range: PriceRange::parse(price_range),
            sort: SortMode::parse(sort),
        }
    }

    #[inline]
    pub fn is_all_categories(&self) -> bool {
        self.category.eq_ignore_ascii_case(ALL_CATEGORIES)
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.is_all_categories() || product.category.to_lowercase() == self.category.to_lowercase()
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Derives the displayed product list.
///
/// Deterministic: identical arguments always give an identical result, and
/// the input slice is only borrowed.
pub fn apply<'a>(products: &'a [Product], selection: &FilterSelection) -> Vec<&'a Product> {
    let mut shown: Vec<&Product> = products
        .iter()
        .filter(|p| selection.matches_category(p))
        .filter(|p| selection.price_range.contains(p.price))
        .collect();

    // slice::sort_by is stable, so equal prices keep catalog order.
    match selection.sort {
        SortMode::PriceAscending => shown.sort_by(|a, b| a.price.cmp(&b.price)),
        SortMode::PriceDescending => shown.sort_by(|a, b| b.price.cmp(&a.price)),
        SortMode::Default => {}
    }

    shown
}

/// Header search: products whose name or category contains `query`,
/// ignoring case, in catalog order.
///
/// An empty or whitespace query matches everything.
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.category.to_lowercase().contains(&needle)
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageRef;

    fn product(id: &str, category: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            slug: format!("product-{}", id),
            description: String::new(),
            price: Money::from_major(price),
            discount_bps: 0,
            is_featured: false,
            stock_level: 1,
            category: category.to_string(),
            image: ImageRef::new("image-x-1x1-png"),
        }
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_category_filter_keeps_relative_order() {
        let products = vec![
            product("a", "sofas", 100),
            product("b", "chairs", 300),
            product("c", "chairs", 200),
        ];
        let selection = FilterSelection::from_params("chairs", "all", "default");

        assert_eq!(ids(&apply(&products, &selection)), vec!["b", "c"]);
    }

    #[test]
    fn test_category_filter_ignores_case() {
        let products = vec![product("a", "Chairs", 100), product("b", "sofas", 100)];
        let selection = FilterSelection::from_params("CHAIRS", "all", "default");

        assert_eq!(ids(&apply(&products, &selection)), vec!["a"]);
    }

    #[test]
    fn test_price_range_bounds_are_inclusive() {
        let products = vec![
            product("low", "x", 199),
            product("min", "x", 200),
            product("mid", "x", 350),
            product("max", "x", 500),
            product("high", "x", 501),
        ];
        let selection = FilterSelection::from_params("all", "200-500", "default");

        assert_eq!(ids(&apply(&products, &selection)), vec!["min", "mid", "max"]);
    }

    #[test]
    fn test_lower_bound_only_range() {
        let products = vec![product("a", "x", 1499), product("b", "x", 1500), product("c", "x", 9000)];
        let selection = FilterSelection::from_params("all", "1500", "default");

        assert_eq!(ids(&apply(&products, &selection)), vec!["b", "c"]);
    }

    #[test]
    fn test_upper_bound_only_range_does_not_filter() {
        let range = PriceRange {
            min: None,
            max: Some(Money::from_major(10)),
        };
        assert!(range.contains(Money::from_major(1_000_000)));
    }

    #[test]
    fn test_sort_descending_is_stable() {
        let products = vec![
            product("ten", "x", 10),
            product("fifty", "x", 50),
            product("thirty-a", "x", 30),
            product("thirty-b", "x", 30),
        ];
        let selection = FilterSelection::from_params("all", "all", "price-descending");

        assert_eq!(
            ids(&apply(&products, &selection)),
            vec!["fifty", "thirty-a", "thirty-b", "ten"]
        );
    }

    #[test]
    fn test_sort_ascending_is_stable() {
        let products = vec![
            product("b1", "x", 20),
            product("a", "x", 10),
            product("b2", "x", 20),
        ];
        let selection = FilterSelection::from_params("all", "all", "price-low-high");

        assert_eq!(ids(&apply(&products, &selection)), vec!["a", "b1", "b2"]);
    }

    #[test]
    fn test_empty_collection() {
        let selection = FilterSelection::from_params("chairs", "0-200", "price-ascending");
        assert!(apply(&[], &selection).is_empty());
    }

    #[test]
    fn test_unknown_values_normalize_to_defaults() {
        assert_eq!(SortMode::parse("newest"), SortMode::Default);
        assert_eq!(PriceRange::parse("cheap"), PriceRange::ALL);
        assert_eq!(PriceRange::parse("500-200"), PriceRange::ALL);
        assert_eq!(PriceRange::parse("-200"), PriceRange::ALL);
        assert_eq!(PriceRange::parse("1500-"), PriceRange::at_least(Money::from_major(1500)));
    }

    #[test]
    fn test_apply_is_pure() {
        let products = vec![product("a", "x", 30), product("b", "x", 10), product("c", "x", 20)];
        let before = products.clone();
        let selection = FilterSelection::from_params("all", "all", "price-ascending");

        let first = ids(&apply(&products, &selection));
        let second = ids(&apply(&products, &selection));

        assert_eq!(first, second);
        assert_eq!(products, before);
    }

    #[test]
    fn test_presets_parse() {
        let ranges: Vec<_> = PRICE_RANGE_PRESETS.iter().map(|p| p.range()).collect();
        assert_eq!(ranges[0], PriceRange::ALL);
        assert_eq!(
            ranges[2],
            PriceRange::between(Money::from_major(200), Money::from_major(500))
        );
        assert_eq!(ranges[4], PriceRange::at_least(Money::from_major(1500)));
    }

    #[test]
    fn test_search_matches_name_or_category() {
        let mut sofa = product("1", "Sofas", 100);
        sofa.name = "Asgaard sofa".to_string();
        let mut chair = product("2", "Chairs", 100);
        chair.name = "Outdoor bar table".to_string();
        let products = vec![sofa, chair];

        assert_eq!(ids(&search(&products, "SOFA")), vec!["1"]);
        assert_eq!(ids(&search(&products, "chair")), vec!["2"]);
        assert_eq!(ids(&search(&products, "  ")), vec!["1", "2"]);
        assert!(search(&products, "lamp").is_empty());
    }
}
