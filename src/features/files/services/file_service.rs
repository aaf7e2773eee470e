use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::files::dtos::{extension_for, purpose_folder, FileResponseDto};
use crate::features::files::models::File;
use crate::modules::storage::MinIOClient;

const FILE_COLUMNS: &str = "id, file_key, original_filename, content_type, file_size, url, \
                            purpose, uploaded_by, is_active, created_at, updated_at";

/// Service for product image uploads
pub struct FileService {
    pool: PgPool,
    minio_client: Arc<MinIOClient>,
}

impl FileService {
    pub fn new(pool: PgPool, minio_client: Arc<MinIOClient>) -> Self {
        Self { pool, minio_client }
    }

    /// Store an already validated image and record its metadata.
    ///
    /// Objects are keyed `{public_prefix}/{purpose}/{file_id}.{ext}`.
    pub async fn upload_image(
        &self,
        data: Vec<u8>,
        original_filename: &str,
        content_type: &str,
        purpose: Option<&str>,
        uploaded_by: &str,
    ) -> Result<FileResponseDto> {
        let file_size = data.len() as i64;
        let file_id = Uuid::now_v7();
        let purpose = purpose_folder(purpose);
        let extension = extension_for(content_type).unwrap_or("bin");

        let file_key = self
            .minio_client
            .public_key(&format!("{}/{}.{}", purpose, file_id, extension));
        self.minio_client
            .upload(&file_key, &data, content_type)
            .await?;

        debug!("Image uploaded to MinIO: {}", file_key);

        let url = self.minio_client.public_url(&file_key);
        let sql = format!(
            r#"
            INSERT INTO files (id, file_key, original_filename, content_type, file_size, url, purpose, uploaded_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            FILE_COLUMNS
        );

        let file = sqlx::query_as::<_, File>(&sql)
            .bind(file_id)
            .bind(&file_key)
            .bind(original_filename)
            .bind(content_type)
            .bind(file_size)
            .bind(&url)
            .bind(&purpose)
            .bind(uploaded_by)
            .fetch_one(&self.pool)
            .await?;

        info!(
            "Image metadata saved: id={}, key={}, size={}",
            file.id, file.file_key, file.file_size
        );

        Ok(file.into())
    }

    /// Remove an image from storage and soft delete its record
    pub async fn delete_by_url(&self, url: &str) -> Result<()> {
        let sql = format!(
            "SELECT {} FROM files WHERE url = $1 AND is_active = TRUE",
            FILE_COLUMNS
        );
        let file = sqlx::query_as::<_, File>(&sql)
            .bind(url)
            .fetch_optional(&self.pool)
            .await?;

        let file_key = match file {
            Some(ref f) => f.file_key.clone(),
            // Images referenced by URL but never recorded, e.g. seeded data
            None => self
                .minio_client
                .extract_key_from_url(url)
                .filter(|key| self.minio_client.is_public_key(key))
                .ok_or_else(|| AppError::NotFound("File not found".to_string()))?,
        };

        self.minio_client.delete(&file_key).await?;
        debug!("Image deleted from MinIO: {}", file_key);

        if let Some(file) = file {
            sqlx::query(
                r#"
                UPDATE files
                SET is_active = FALSE, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(file.id)
            .execute(&self.pool)
            .await?;

            info!("Image soft deleted: id={}, key={}", file.id, file.file_key);
        }

        Ok(())
    }
}
