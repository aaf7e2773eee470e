use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::core::extractor::ValidatedJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::files::dtos::{
    validate_image, DeleteFileByUrlDto, DeleteFileResponseDto, FileResponseDto, UploadImageDto,
};
use crate::features::files::services::FileService;
use crate::shared::types::ApiResponse;

/// Upload a product image (admin only)
///
/// Accepts multipart/form-data with:
/// - `file`: the image (required)
/// - `purpose`: folder to store it under (optional, defaults to "products")
#[utoipa::path(
    post,
    path = "/api/admin/files/upload",
    tag = "admin-files",
    request_body(
        content = UploadImageDto,
        content_type = "multipart/form-data",
        description = "Image upload form with an optional purpose field",
    ),
    responses(
        (status = 201, description = "Image uploaded", body = ApiResponse<FileResponseDto>),
        (status = 400, description = "Missing, empty, oversized or unsupported image"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 413, description = "Request body too large"),
        (status = 502, description = "Storage unavailable")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_image(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<FileService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<FileResponseDto>>)> {
    let mut upload: Option<(Vec<u8>, String, String)> = None;
    let mut purpose: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "file" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let file_name = field.file_name().unwrap_or("unnamed").to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;
                upload = Some((data.to_vec(), file_name, content_type));
            }
            "purpose" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read purpose field: {}", e))
                })?;
                purpose = Some(text).filter(|p| !p.trim().is_empty());
            }
            other => debug!("Ignoring unknown field: {}", other),
        }
    }

    let (data, file_name, content_type) =
        upload.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;
    validate_image(&content_type, data.len())?;

    let response = service
        .upload_image(data, &file_name, &content_type, purpose.as_deref(), &user.sub)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(response),
            Some("Image uploaded successfully".to_string()),
            None,
        )),
    ))
}

/// Delete a product image by its public URL (admin only)
#[utoipa::path(
    delete,
    path = "/api/admin/files",
    tag = "admin-files",
    request_body = DeleteFileByUrlDto,
    responses(
        (status = 200, description = "Image deleted", body = ApiResponse<DeleteFileResponseDto>),
        (status = 400, description = "Invalid URL"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Image not found"),
        (status = 502, description = "Storage unavailable")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_file_by_url(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<FileService>>,
    ValidatedJson(dto): ValidatedJson<DeleteFileByUrlDto>,
) -> Result<Json<ApiResponse<DeleteFileResponseDto>>> {
    service.delete_by_url(&dto.url).await?;

    Ok(Json(ApiResponse::success(
        Some(DeleteFileResponseDto { deleted: true }),
        Some("Image deleted successfully".to_string()),
        None,
    )))
}
