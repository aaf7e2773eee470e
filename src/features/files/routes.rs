use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, post},
    Router,
};

use crate::features::files::dtos::MAX_IMAGE_SIZE;
use crate::features::files::handlers;
use crate::features::files::services::FileService;

/// Admin image routes (requires the admin role)
pub fn admin_routes(service: Arc<FileService>) -> Router {
    Router::new()
        .route(
            "/api/admin/files/upload",
            // One extra MB covers multipart framing around the image
            post(handlers::upload_image).layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + 1024 * 1024)),
        )
        .route("/api/admin/files", delete(handlers::delete_file_by_url))
        .with_state(service)
}
