use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::products::dtos::{AdminProductDto, ProductInputDto};
use crate::features::products::services::ProductService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List products, newest first (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/products",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Products retrieved", body = ApiResponse<Vec<AdminProductDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-products",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_products(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<AdminProductDto>>>> {
    let (products, total) = service.list(&pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(products),
        None,
        Some(Meta { total }),
    )))
}

/// Get a product by ID (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<AdminProductDto>),
        (status = 404, description = "Product not found")
    ),
    tag = "admin-products",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_product(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AdminProductDto>>> {
    let product = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}

/// Create a product (admin only)
///
/// The slug is derived from the name when omitted. Blank brand and
/// description are stored as null.
#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = ProductInputDto,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<AdminProductDto>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 409, description = "Name or slug already in use")
    ),
    tag = "admin-products",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_product(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    ValidatedJson(dto): ValidatedJson<ProductInputDto>,
) -> Result<(StatusCode, Json<ApiResponse<AdminProductDto>>)> {
    let product = service.create(dto).await?;
    tracing::debug!("Product {} created by {}", product.id, user.sub);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(product),
            Some("Product created".to_string()),
            None,
        )),
    ))
}

/// Update a product (admin only)
#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = ProductInputDto,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<AdminProductDto>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Name or slug already in use")
    ),
    tag = "admin-products",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_product(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<ProductInputDto>,
) -> Result<Json<ApiResponse<AdminProductDto>>> {
    let product = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(product),
        Some("Product updated".to_string()),
        None,
    )))
}

/// Toggle the featured flag of a product (admin only)
#[utoipa::path(
    patch,
    path = "/api/admin/products/{id}/featured",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Featured flag toggled", body = ApiResponse<AdminProductDto>),
        (status = 404, description = "Product not found")
    ),
    tag = "admin-products",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn toggle_featured(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AdminProductDto>>> {
    let product = service.toggle_featured(id).await?;
    let message = if product.featured {
        "Product marked as featured"
    } else {
        "Product removed from featured"
    };
    Ok(Json(ApiResponse::success(
        Some(product),
        Some(message.to_string()),
        None,
    )))
}

/// Delete a product (admin only)
#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Product not found")
    ),
    tag = "admin-products",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_product(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Product deleted".to_string()),
        None,
    )))
}
