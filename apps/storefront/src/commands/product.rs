//! # Product Commands
//!
//! Catalog browsing for the shop grid, product pages and the header search.
//!
//! ## Shop Grid Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Sidebar: category = "chairs", price = "200-500", sort = "price-asc"   │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  list_products(session, "chairs", "200-500", "price-asc")               │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  FilterSelection::from_params ──► filter::apply(catalog, &selection)    │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  { status, items, showing: 3, total: 12, categories, priceRanges }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! While the catalog is loading, or after it failed, list commands still
//! succeed with an empty list: the `status` field tells the render layer
//! which screen to show.

use serde::Serialize;
use storefront_content::Fit;
use storefront_core::filter::{self, PriceRangePreset, PRICE_RANGE_PRESETS};
use storefront_core::{CatalogStatus, FilterSelection, Money, Product};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::Session;

/// Width requested for grid and page images.
const IMAGE_WIDTH: u32 = 800;

/// Product data transfer object for the render layer.
///
/// `price` and `discountedPrice` are integers in minor units (paisa):
/// Rs.450 is `45000`. Show `priceDisplay` to people.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    /// Minor units.
    pub price: Money,
    /// `price` formatted with the configured currency, e.g. "Rs.450".
    pub price_display: String,
    pub discount_percentage: f64,
    /// Minor units, after the discount.
    pub discounted_price: Money,
    pub is_featured: bool,
    pub stock_level: u32,
    pub in_stock: bool,
    /// Resolved CDN URL, when the reference could be resolved.
    pub image_url: Option<String>,
}

impl ProductDto {
    fn build(session: &Session, product: &Product) -> Self {
        let image_url = match session.images() {
            Some(builder) if !product.image.as_str().is_empty() => {
                match builder.clone().width(IMAGE_WIDTH).fit(Fit::Max).url_for(&product.image) {
                    Ok(url) => Some(String::from(url)),
                    Err(e) => {
                        warn!(product_id = %product.id, error = %e, "Unresolvable product image");
                        None
                    }
                }
            }
            _ => None,
        };

        ProductDto {
            id: product.id.clone(),
            name: product.name.clone(),
            slug: product.slug.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: product.price,
            price_display: session.config().format_money(product.price),
            discount_percentage: f64::from(product.discount_bps) / 100.0,
            discounted_price: product.discounted_price(),
            is_featured: product.is_featured,
            stock_level: product.stock_level,
            in_stock: product.in_stock(),
            image_url,
        }
    }
}

/// Shop grid response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub status: CatalogStatus,
    pub items: Vec<ProductDto>,
    /// Number of items after filtering ("Showing 3 results").
    pub showing: usize,
    /// Number of products in the catalog.
    pub total: usize,
    pub categories: Vec<String>,
    pub price_ranges: Vec<PriceRangePreset>,
    /// The normalized selection actually applied.
    pub selection: FilterSelection,
}

/// Lists products for the shop grid.
///
/// ## Arguments
/// * `category` - Category name or `"all"`
/// * `price_range` - Preset value such as `"200-500"`, or `"all"`
/// * `sort` - `"default"`, `"price-ascending"` or `"price-descending"`
///
/// Unknown values fall back to the defaults.
pub async fn list_products(
    session: &Session,
    category: &str,
    price_range: &str,
    sort: &str,
) -> ProductListResponse {
    let selection = FilterSelection::from_params(category, price_range, sort);
    debug!(?selection, "list_products command");

    let (status, catalog) = session.catalog().view().await;
    let items: Vec<ProductDto> = filter::apply(catalog.products(), &selection)
        .into_iter()
        .map(|p| ProductDto::build(session, p))
        .collect();

    ProductListResponse {
        status,
        showing: items.len(),
        total: catalog.len(),
        items,
        categories: catalog.categories(),
        price_ranges: PRICE_RANGE_PRESETS.to_vec(),
        selection,
    }
}

/// Gets a product for its page.
///
/// Looks in the loaded catalog first and falls back to a by-slug fetch
/// from the Content Provider.
pub async fn get_product(session: &Session, slug: &str) -> Result<ProductDto, ApiError> {
    debug!(slug, "get_product command");

    let catalog = session.catalog().snapshot().await;
    if let Some(product) = catalog.find_by_slug(slug) {
        return Ok(ProductDto::build(session, product));
    }

    let product = session
        .provider()
        .fetch_product_by_slug(slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", slug))?;

    Ok(ProductDto::build(session, &product))
}

/// Header search: products whose name or category contains `query`.
pub async fn search_products(session: &Session, query: &str) -> Vec<ProductDto> {
    debug!(query, "search_products command");

    let catalog = session.catalog().snapshot().await;
    filter::search(catalog.products(), query)
        .into_iter()
        .map(|p| ProductDto::build(session, p))
        .collect()
}

/// Category options for the filter panel, `"all"` first.
pub async fn list_categories(session: &Session) -> Vec<String> {
    session.catalog().categories().await
}

/// Featured products for the landing page.
pub async fn featured_products(session: &Session) -> Vec<ProductDto> {
    let catalog = session.catalog().snapshot().await;
    catalog
        .featured()
        .into_iter()
        .map(|p| ProductDto::build(session, p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{
        failing_session, product, session_with, session_with_config,
    };
    use crate::error::ErrorCode;
    use crate::state::ConfigState;
    use storefront_core::ImageRef;

    fn catalog() -> Vec<Product> {
        vec![
            product("p1", "Asgaard sofa", "Sofas", 250_000, true),
            product("p2", "Bar chair", "Chairs", 450, false),
            product("p3", "Side table", "Tables", 180, true),
            product("p4", "Lounge chair", "chairs", 1200, false),
        ]
    }

    #[tokio::test]
    async fn test_list_products_all() {
        let session = session_with(catalog()).await;
        let response = list_products(&session, "all", "all", "default").await;

        assert_eq!(response.status, CatalogStatus::Ready);
        assert_eq!(response.showing, 4);
        assert_eq!(response.total, 4);
        assert_eq!(response.categories, vec!["all", "Sofas", "Chairs", "Tables", "chairs"]);
        assert_eq!(response.price_ranges.len(), 5);
    }

    #[tokio::test]
    async fn test_list_products_filtered_and_sorted() {
        let session = session_with(catalog()).await;
        let response = list_products(&session, "CHAIRS", "all", "price-descending").await;

        let ids: Vec<_> = response.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p4", "p2"]);
        assert_eq!(response.showing, 2);
    }

    #[tokio::test]
    async fn test_list_products_unknown_params_fall_back() {
        let session = session_with(catalog()).await;
        let response = list_products(&session, "all", "cheap", "random").await;

        assert_eq!(response.selection, FilterSelection::default());
        assert_eq!(response.showing, 4);
    }

    #[tokio::test]
    async fn test_list_products_when_catalog_failed() {
        let session = failing_session().await;
        let response = list_products(&session, "all", "all", "default").await;

        assert_eq!(response.status.error(), Some("Failed to load products"));
        assert!(response.items.is_empty());
        assert_eq!(response.categories, vec!["all"]);
    }

    #[tokio::test]
    async fn test_get_product() {
        let session = session_with(catalog()).await;

        let dto = get_product(&session, "bar-chair").await.unwrap();
        assert_eq!(dto.id, "p2");
        assert_eq!(dto.price_display, "Rs.450");

        let err = get_product(&session, "lamp").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_prices_serialize_in_minor_units() {
        let session = session_with(catalog()).await;
        let dto = get_product(&session, "bar-chair").await.unwrap();

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["price"], 45_000);
        assert_eq!(json["discountedPrice"], 45_000);
        assert_eq!(json["priceDisplay"], "Rs.450");
        assert_eq!(json["discountPercentage"], 0.0);
    }

    #[tokio::test]
    async fn test_image_urls_resolve_or_stay_empty() {
        let mut config = ConfigState::default();
        config.content.project_id = Some("abc123".to_string());

        let mut products = catalog();
        products[0].image = ImageRef::new("image-a1b2-800x600-jpg");
        products[1].image = ImageRef::new("not-an-asset");
        let session = session_with_config(config, products).await;

        let items = list_products(&session, "all", "all", "default").await.items;
        assert_eq!(
            items[0].image_url.as_deref(),
            Some("https://cdn.sanity.io/images/abc123/production/a1b2-800x600.jpg?w=800&fit=max")
        );
        assert_eq!(items[1].image_url, None);
        assert_eq!(items[2].image_url, None);
    }

    #[tokio::test]
    async fn test_get_product_provider_failure() {
        let session = failing_session().await;
        let err = get_product(&session, "bar-chair").await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ContentError);
        assert_eq!(err.message, "Failed to load products");
    }

    #[tokio::test]
    async fn test_search_and_featured() {
        let session = session_with(catalog()).await;

        let hits: Vec<_> = search_products(&session, "chair")
            .await
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(hits, vec!["p2", "p4"]);

        let featured: Vec<_> = featured_products(&session)
            .await
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(featured, vec!["p1", "p3"]);

        assert_eq!(list_categories(&session).await.len(), 5);
    }
}
