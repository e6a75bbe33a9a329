//! # Product Records
//!
//! The product shape as the CMS query projects it, and its conversion into
//! a validated [`Product`].
//!
//! ## Wire Shape
//! ```text
//! {
//!   "id": "8f3c...",            required
//!   "name": "Asgaard sofa",     required
//!   "slug": "asgaard-sofa",     required, URL-safe (A-Za-z0-9 - _ . ~)
//!   "description": "...",       optional → ""
//!   "price": 250000,            required, JSON number ≥ 0
//!   "discountPercentage": 20,   optional → 0, clamped to 0..=100
//!   "isFeaturedProduct": true,  optional → false
//!   "stockLevel": 4,            optional → 0, whole number ≥ 0 (4.0 ok)
//!   "category": "Sofas",        required
//!   "image": "image-..-png"     optional → "" (no image)
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use storefront_core::validation::{
    validate_discount_percentage, validate_price, validate_required, validate_slug,
    validate_stock_level,
};
use storefront_core::{ImageRef, Money, Product, ValidationError};
use tracing::warn;

/// A product as received from the CMS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub discount_percentage: Option<f64>,
    pub is_featured_product: Option<bool>,
    pub stock_level: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ValidationError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        validate_required("id", &record.id)?;
        validate_required("name", &record.name)?;

        let slug = record.slug.unwrap_or_default();
        validate_slug(&slug)?;

        let category = record.category.unwrap_or_default();
        validate_required("category", &category)?;

        validate_price(record.price)?;
        let price =
            Money::from_major_f64(record.price).ok_or_else(|| ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: "out of range".to_string(),
            })?;

        let discount_bps = validate_discount_percentage(record.discount_percentage.unwrap_or(0.0))?;
        let stock_level = validate_stock_level(record.stock_level.unwrap_or(0.0))?;

        Ok(Product {
            id: record.id,
            name: record.name,
            slug,
            description: record.description.unwrap_or_default(),
            price,
            discount_bps,
            is_featured: record.is_featured_product.unwrap_or(false),
            stock_level,
            category,
            image: ImageRef::new(record.image.unwrap_or_default()),
        })
    }
}

/// Decodes and validates one raw record.
///
/// Returns `None` (with a warn log) for anything that isn't a valid product.
pub fn product_from_value(value: Value) -> Option<Product> {
    let id_hint = value
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or("<unknown>")
        .to_string();

    let record: ProductRecord = match serde_json::from_value(value) {
        Ok(record) => record,
        Err(e) => {
            warn!(id = %id_hint, error = %e, "Skipping undecodable product record");
            return None;
        }
    };

    match Product::try_from(record) {
        Ok(product) => Some(product),
        Err(e) => {
            warn!(id = %id_hint, error = %e, "Skipping invalid product record");
            None
        }
    }
}

/// Converts a list of raw records, keeping source order and skipping
/// invalid ones.
pub fn products_from_values(values: Vec<Value>) -> Vec<Product> {
    let total = values.len();
    let products: Vec<Product> = values.into_iter().filter_map(product_from_value).collect();

    if products.len() < total {
        warn!(
            kept = products.len(),
            skipped = total - products.len(),
            "Some product records were skipped"
        );
    }
    products
}
