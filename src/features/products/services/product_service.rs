use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::products::dtos::{AdminProductDto, ProductInputDto};
use crate::features::products::models::{Product, ProductRecord};
use crate::shared::types::PaginationQuery;

const PRODUCT_EXISTS: &str = "A product with that name or slug already exists";

const PRODUCT_SELECT: &str = r#"
    SELECT p.id, p.name, p.slug, p.price, p.original_price, p.images, p.brand,
           p.category_id, c.name AS category_name, c.slug AS category_slug,
           p.stock, p.featured, p.rating, p.is_new, p.description,
           p.created_at, p.updated_at
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

/// Admin-side product management
pub struct ProductService {
    pool: PgPool,
}

impl ProductService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List products newest first. Returns the page and the total count.
    pub async fn list(&self, pagination: &PaginationQuery) -> Result<(Vec<AdminProductDto>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count products: {:?}", e);
                AppError::Database(e)
            })?;

        let sql = format!(
            "{} ORDER BY p.created_at DESC LIMIT $1 OFFSET $2",
            PRODUCT_SELECT
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list products: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((products.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, id: Uuid) -> Result<AdminProductDto> {
        self.fetch(id).await.map(Into::into)
    }

    pub async fn create(&self, dto: ProductInputDto) -> Result<AdminProductDto> {
        let record = dto.normalize()?;
        let id = Uuid::now_v7();

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, slug, price, original_price, images, brand, category_id,
                stock, featured, rating, is_new, description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(id)
        .bind(&record.name)
        .bind(&record.slug)
        .bind(record.price)
        .bind(record.original_price)
        .bind(&record.images)
        .bind(&record.brand)
        .bind(record.category_id)
        .bind(record.stock)
        .bind(record.featured)
        .bind(record.rating)
        .bind(record.is_new)
        .bind(&record.description)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_write_error(e, PRODUCT_EXISTS))?;

        tracing::info!("Created product {} ({})", record.slug, id);
        self.get(id).await
    }

    /// Replace every editable field of a product
    pub async fn update(&self, id: Uuid, dto: ProductInputDto) -> Result<AdminProductDto> {
        let record: ProductRecord = dto.normalize()?;

        let updated = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, slug = $3, price = $4, original_price = $5, images = $6,
                brand = $7, category_id = $8, stock = $9, featured = $10, rating = $11,
                is_new = $12, description = $13, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&record.name)
        .bind(&record.slug)
        .bind(record.price)
        .bind(record.original_price)
        .bind(&record.images)
        .bind(&record.brand)
        .bind(record.category_id)
        .bind(record.stock)
        .bind(record.featured)
        .bind(record.rating)
        .bind(record.is_new)
        .bind(&record.description)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_write_error(e, PRODUCT_EXISTS))?
        .rows_affected();

        if updated == 0 {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }

        tracing::info!("Updated product {} ({})", record.slug, id);
        self.get(id).await
    }

    /// Flip the featured flag
    pub async fn toggle_featured(&self, id: Uuid) -> Result<AdminProductDto> {
        let featured: Option<bool> = sqlx::query_scalar(
            r#"
            UPDATE products
            SET featured = NOT featured, updated_at = NOW()
            WHERE id = $1
            RETURNING featured
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let featured =
            featured.ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

        tracing::info!("Product {} featured = {}", id, featured);
        self.get(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let deleted = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }

        tracing::info!("Deleted product {}", id);
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Product> {
        let sql = format!("{} WHERE p.id = $1", PRODUCT_SELECT);
        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get product {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }
}
