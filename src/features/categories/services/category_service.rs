use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    AdminCategoryDto, CategoryInputDto, CategoryResponseDto, DeleteCategoryResponseDto,
};
use crate::features::categories::models::{Category, CategoryWithCount};

const CATEGORY_EXISTS: &str = "A category with that name or slug already exists";

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all categories ordered by name
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, slug, created_at, updated_at
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Get category by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, slug, created_at, updated_at
            FROM categories
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category by slug: {:?}", e);
            AppError::Database(e)
        })?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
    }

    /// List categories with product counts for the admin panel
    pub async fn list_with_counts(&self) -> Result<Vec<AdminCategoryDto>> {
        let categories = sqlx::query_as::<_, CategoryWithCount>(
            r#"
            SELECT c.id, c.name, c.slug, COUNT(p.id) AS product_count,
                   c.created_at, c.updated_at
            FROM categories c
            LEFT JOIN products p ON p.category_id = c.id
            GROUP BY c.id
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories with counts: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    pub async fn create(&self, dto: CategoryInputDto) -> Result<AdminCategoryDto> {
        let (name, slug) = normalized_input(&dto)?;

        let category = sqlx::query_as::<_, CategoryWithCount>(
            r#"
            INSERT INTO categories (id, name, slug)
            VALUES ($1, $2, $3)
            RETURNING id, name, slug, 0::BIGINT AS product_count, created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&name)
        .bind(&slug)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write_error(e, CATEGORY_EXISTS))?;

        tracing::info!("Created category {} ({})", category.slug, category.id);
        Ok(category.into())
    }

    pub async fn update(&self, id: Uuid, dto: CategoryInputDto) -> Result<AdminCategoryDto> {
        let (name, slug) = normalized_input(&dto)?;

        let category = sqlx::query_as::<_, CategoryWithCount>(
            r#"
            UPDATE categories
            SET name = $2, slug = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, slug,
                      (SELECT COUNT(*) FROM products WHERE category_id = $1) AS product_count,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&name)
        .bind(&slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write_error(e, CATEGORY_EXISTS))?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        tracing::info!("Updated category {} ({})", category.slug, category.id);
        Ok(category.into())
    }

    /// Delete a category. Its products stay, with no category.
    pub async fn delete(&self, id: Uuid) -> Result<DeleteCategoryResponseDto> {
        let mut tx = self.pool.begin().await?;

        let detached = sqlx::query(
            "UPDATE products SET category_id = NULL, updated_at = NOW() WHERE category_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let deleted = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        tx.commit().await?;

        if detached > 0 {
            tracing::warn!(
                "Deleted category {}; {} products left without category",
                id,
                detached
            );
        } else {
            tracing::info!("Deleted category {}", id);
        }

        Ok(DeleteCategoryResponseDto {
            id,
            detached_products: detached as i64,
        })
    }
}

fn normalized_input(dto: &CategoryInputDto) -> Result<(String, String)> {
    let (name, slug) = dto.normalized();
    if name.is_empty() {
        return Err(AppError::Validation("name: Name is required".to_string()));
    }
    if slug.is_empty() {
        return Err(AppError::Validation(
            "name: Name must contain letters or digits".to_string(),
        ));
    }
    Ok((name, slug))
}
