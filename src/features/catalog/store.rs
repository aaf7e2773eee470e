use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::catalog::models::CatalogProduct;
use crate::features::categories::models::Category;

/// Read side of the catalog: products joined with their category, plus the
/// category list.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every product, newest first
    async fn list_products(&self) -> Result<Vec<CatalogProduct>>;

    /// Every category, ordered by name
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// Featured products, newest first
    async fn list_featured(&self) -> Result<Vec<CatalogProduct>>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<CatalogProduct>>;

    /// Products sharing `category_id`, excluding `exclude_id`, newest first
    async fn list_related(
        &self,
        category_id: Uuid,
        exclude_id: Uuid,
        limit: usize,
    ) -> Result<Vec<CatalogProduct>>;
}

const PRODUCT_SELECT: &str = r#"
    SELECT p.id, p.name, p.slug, p.price, p.original_price, p.images, p.brand,
           p.category_id, c.name AS category_name, c.slug AS category_slug,
           p.stock, p.featured, p.rating, p.is_new, p.description, p.created_at
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list_products(&self) -> Result<Vec<CatalogProduct>> {
        let sql = format!("{} ORDER BY p.created_at DESC", PRODUCT_SELECT);
        sqlx::query_as::<_, CatalogProduct>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list catalog products: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, slug, created_at, updated_at
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list catalog categories: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_featured(&self) -> Result<Vec<CatalogProduct>> {
        let sql = format!(
            "{} WHERE p.featured = TRUE ORDER BY p.created_at DESC",
            PRODUCT_SELECT
        );
        sqlx::query_as::<_, CatalogProduct>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list featured products: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<CatalogProduct>> {
        let sql = format!("{} WHERE p.slug = $1", PRODUCT_SELECT);
        sqlx::query_as::<_, CatalogProduct>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get product by slug: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list_related(
        &self,
        category_id: Uuid,
        exclude_id: Uuid,
        limit: usize,
    ) -> Result<Vec<CatalogProduct>> {
        let sql = format!(
            "{} WHERE p.category_id = $1 AND p.id <> $2 ORDER BY p.created_at DESC LIMIT $3",
            PRODUCT_SELECT
        );
        sqlx::query_as::<_, CatalogProduct>(&sql)
            .bind(category_id)
            .bind(exclude_id)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list related products: {:?}", e);
                AppError::Database(e)
            })
    }
}
