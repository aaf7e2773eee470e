use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::catalog::engine::{ActiveFilterTag, CatalogState};
use crate::features::catalog::filters::{FilterKey, PriceBand, SortKey};
use crate::features::catalog::models::CatalogProduct;
use crate::features::categories::dtos::CategoryResponseDto;

/// Category name and slug embedded in a product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryRefDto {
    pub name: String,
    pub slug: String,
}

/// Product as shown on catalog and home page cards
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogProductDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub price: f64,
    pub original_price: Option<f64>,
    /// Whole-percent discount, present only when `original_price` is higher
    pub discount_percent: Option<i32>,
    /// Primary image (first of `images`)
    pub image: Option<String>,
    pub images: Vec<String>,
    pub brand: Option<String>,
    pub category: Option<CategoryRefDto>,
    pub stock: i32,
    pub in_stock: bool,
    pub featured: bool,
    pub rating: Option<f64>,
    pub is_new: bool,
}

impl From<CatalogProduct> for CatalogProductDto {
    fn from(p: CatalogProduct) -> Self {
        let discount_percent = p.discount_percent();
        let in_stock = p.in_stock();
        let image = p.primary_image().map(str::to_string);
        let category = match (p.category_name, p.category_slug) {
            (Some(name), Some(slug)) => Some(CategoryRefDto { name, slug }),
            _ => None,
        };

        Self {
            id: p.id,
            name: p.name,
            slug: p.slug,
            price: p.price.to_f64().unwrap_or(0.0),
            original_price: p.original_price.and_then(|v| v.to_f64()),
            discount_percent,
            image,
            images: p.images,
            brand: p.brand,
            category,
            stock: p.stock,
            in_stock,
            featured: p.featured,
            rating: p.rating,
            is_new: p.is_new,
        }
    }
}

/// One removable active-filter tag
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActiveFilterDto {
    pub key: FilterKey,
    /// Query parameter the filter is stored under
    pub param: String,
    /// Display label, e.g. `Marca: Bella`
    pub label: String,
    pub value: String,
    /// Query string that removes only this filter
    pub clear_query: String,
}

impl From<ActiveFilterTag> for ActiveFilterDto {
    fn from(t: ActiveFilterTag) -> Self {
        Self {
            key: t.key,
            param: t.key.query_key().to_string(),
            label: t.label,
            value: t.value,
            clear_query: t.clear_query,
        }
    }
}

/// Selectable price band
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PriceBandDto {
    pub value: String,
    pub label: String,
}

impl From<PriceBand> for PriceBandDto {
    fn from(b: PriceBand) -> Self {
        Self {
            value: b.token().to_string(),
            label: b.label().to_string(),
        }
    }
}

/// Values the filter controls can offer
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogFacetsDto {
    /// Distinct brands, in the order they first appear
    pub brands: Vec<String>,
    /// All categories, ordered by name
    pub categories: Vec<CategoryResponseDto>,
    pub price_bands: Vec<PriceBandDto>,
}

/// A filtered, sorted catalog page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogPageDto {
    pub products: Vec<CatalogProductDto>,
    pub total: usize,
    pub state: CatalogState,
    pub sort: SortKey,
    /// Number of active filter criteria; sorting does not count
    pub active_filter_count: usize,
    pub active_filters: Vec<ActiveFilterDto>,
    /// Canonical query string for the current filters
    pub query: String,
    /// Query string with every filter removed
    pub clear_all_query: String,
    pub facets: CatalogFacetsDto,
}

/// Product detail page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetailDto {
    pub product: CatalogProductDto,
    pub description: Option<String>,
    /// Stock label, e.g. "3 disponibles" or "Sin stock"
    pub availability: String,
    /// Public storefront URL of this product
    pub url: String,
    /// Chat deep link prefilled with an order message
    pub order_url: String,
    /// Up to four other products from the same category
    pub related: Vec<CatalogProductDto>,
}
