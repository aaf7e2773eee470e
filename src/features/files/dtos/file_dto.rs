use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::files::models::File;

/// Upload image request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageDto {
    /// The image to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// Folder the image is stored under, defaults to "products"
    #[schema(example = "products")]
    pub purpose: Option<String>,
}

/// Response DTO for an uploaded image
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileResponseDto {
    pub id: Uuid,
    /// Original filename as uploaded
    pub original_filename: String,
    pub content_type: String,
    /// Size in bytes
    pub file_size: i64,
    /// Public URL to store in a product's `images`
    pub url: String,
    pub purpose: String,
    pub created_at: DateTime<Utc>,
}

impl From<File> for FileResponseDto {
    fn from(f: File) -> Self {
        Self {
            id: f.id,
            original_filename: f.original_filename,
            content_type: f.content_type,
            file_size: f.file_size,
            url: f.url,
            purpose: f.purpose,
            created_at: f.created_at,
        }
    }
}

/// Request DTO for deleting a file by URL
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteFileByUrlDto {
    /// The URL of the file to delete
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

/// Response DTO for delete operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteFileResponseDto {
    pub deleted: bool,
}

/// Image types accepted for product photos
pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/avif",
];

/// Maximum image size in bytes (5MB)
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Folder used when the upload names no purpose
pub const DEFAULT_PURPOSE: &str = "products";

/// File extension for an allowed image type
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/avif" => Some("avif"),
        _ => None,
    }
}

/// Reject anything that is not an allowed image within the size limit.
pub fn validate_image(content_type: &str, size: usize) -> Result<(), AppError> {
    if size == 0 {
        return Err(AppError::BadRequest("File is empty".to_string()));
    }

    if size > MAX_IMAGE_SIZE {
        return Err(AppError::BadRequest(format!(
            "File too large. Maximum size is {} MB",
            MAX_IMAGE_SIZE / 1024 / 1024
        )));
    }

    if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
        return Err(AppError::BadRequest(format!(
            "File type '{}' is not allowed. Allowed types: {}",
            content_type,
            ALLOWED_IMAGE_TYPES.join(", ")
        )));
    }

    Ok(())
}

/// Storage folder for a purpose: slugified, falling back to the default.
pub fn purpose_folder(purpose: Option<&str>) -> String {
    let folder = purpose.map(crate::shared::validation::slugify).unwrap_or_default();
    if folder.is_empty() {
        DEFAULT_PURPOSE.to_string()
    } else {
        folder
    }
}
