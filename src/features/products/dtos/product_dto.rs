use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::catalog::dtos::CategoryRefDto;
use crate::features::products::models::{Product, ProductRecord};
use crate::shared::constants::{
    LOW_STOCK_THRESHOLD, MAX_PRICE, MAX_PRODUCT_IMAGES, RESERVED_PRODUCT_SLUGS,
};
use crate::shared::validation::{non_blank, slug_or_derive, SLUG_REGEX};

// Create / update request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductInputDto {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    /// Derived from `name` when omitted
    #[validate(regex(
        path = *SLUG_REGEX,
        message = "Slug must be lowercase letters and digits separated by single hyphens"
    ))]
    pub slug: Option<String>,

    #[validate(range(
        exclusive_min = 0.0,
        max = 9_999_999_999.99,
        message = "Price must be greater than 0 and at most 9999999999.99"
    ))]
    pub price: f64,

    /// Price before discount
    #[validate(range(
        exclusive_min = 0.0,
        max = 9_999_999_999.99,
        message = "Original price must be greater than 0 and at most 9999999999.99"
    ))]
    pub original_price: Option<f64>,

    /// Image URLs, the first one is the primary image
    #[serde(default)]
    pub images: Vec<String>,

    #[validate(length(max = 100, message = "Brand must not exceed 100 characters"))]
    pub brand: Option<String>,

    pub category_id: Option<Uuid>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[serde(default)]
    pub stock: i32,

    #[serde(default)]
    pub featured: bool,

    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,

    #[serde(default)]
    pub is_new: bool,

    pub description: Option<String>,
}

fn to_price(value: f64, field: &str) -> Result<Decimal, AppError> {
    let max = Decimal::new((MAX_PRICE * 100.0).round() as i64, 2);
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp(2))
        .filter(|d| *d > Decimal::ZERO && *d <= max)
        .ok_or_else(|| {
            AppError::Validation(format!(
                "{}: must be greater than 0 and at most {}",
                field, max
            ))
        })
}

impl ProductInputDto {
    /// Trim, derive the slug and blank-to-NULL the optional text fields.
    ///
    /// Also checks what the field rules cannot see: a name made only of
    /// whitespace, the image count and prices that round to zero.
    pub fn normalize(self) -> Result<ProductRecord, AppError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("name: Name is required".to_string()));
        }

        let slug = slug_or_derive(self.slug.as_deref(), &name);
        if slug.is_empty() {
            return Err(AppError::Validation(
                "name: Name must contain letters or digits".to_string(),
            ));
        }
        if RESERVED_PRODUCT_SLUGS.contains(&slug.as_str()) {
            return Err(AppError::Validation(format!(
                "slug: '{}' is reserved, choose another slug",
                slug
            )));
        }

        let images: Vec<String> = self
            .images
            .into_iter()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .collect();
        if images.len() > MAX_PRODUCT_IMAGES {
            return Err(AppError::Validation(format!(
                "images: A product can have at most {} images",
                MAX_PRODUCT_IMAGES
            )));
        }

        Ok(ProductRecord {
            name,
            slug,
            price: to_price(self.price, "price")?,
            original_price: self
                .original_price
                .map(|p| to_price(p, "original_price"))
                .transpose()?,
            images,
            brand: non_blank(self.brand),
            category_id: self.category_id,
            stock: self.stock,
            featured: self.featured,
            rating: self.rating,
            is_new: self.is_new,
            description: non_blank(self.description),
        })
    }
}

/// Product as listed in the admin panel
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminProductDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub images: Vec<String>,
    pub brand: Option<String>,
    pub category_id: Option<Uuid>,
    pub category: Option<CategoryRefDto>,
    pub stock: i32,
    /// Stock at or below the low-stock threshold
    pub low_stock: bool,
    pub featured: bool,
    pub rating: Option<f64>,
    pub is_new: bool,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for AdminProductDto {
    fn from(p: Product) -> Self {
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
            images: p.images,
            brand: p.brand,
            category_id: p.category_id,
            category,
            low_stock: p.stock <= LOW_STOCK_THRESHOLD,
            stock: p.stock,
            featured: p.featured,
            rating: p.rating,
            is_new: p.is_new,
            description: p.description,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
