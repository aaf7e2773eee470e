use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::{Category, CategoryWithCount};
use crate::shared::validation::{slug_or_derive, SLUG_REGEX};

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
        }
    }
}

/// Category as shown in the admin panel, with its product count
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminCategoryDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub product_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CategoryWithCount> for AdminCategoryDto {
    fn from(c: CategoryWithCount) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            product_count: c.product_count,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

// Create / update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CategoryInputDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Derived from `name` when omitted
    #[validate(regex(
        path = *SLUG_REGEX,
        message = "Slug must be lowercase letters and digits separated by single hyphens"
    ))]
    pub slug: Option<String>,
}

impl CategoryInputDto {
    /// Trimmed name and the final slug
    pub fn normalized(&self) -> (String, String) {
        let name = self.name.trim().to_string();
        let slug = slug_or_derive(self.slug.as_deref(), &name);
        (name, slug)
    }
}

/// Result of deleting a category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteCategoryResponseDto {
    pub id: Uuid,
    /// Products that were filed under the category and now have none
    pub detached_products: i64,
}
