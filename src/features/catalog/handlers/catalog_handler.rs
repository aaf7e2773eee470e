use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    Json,
};

use crate::core::error::Result;
use crate::features::catalog::dtos::{CatalogPageDto, CatalogProductDto, ProductDetailDto};
use crate::features::catalog::filters::CatalogQuery;
use crate::features::catalog::services::CatalogService;
use crate::shared::types::{ApiResponse, Meta};

/// Browse the catalog
///
/// Filters and sorts all products by the query parameters. Unknown
/// parameters are ignored and kept in the returned clear links.
#[utoipa::path(
    get,
    path = "/api/catalog",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Filtered catalog page", body = ApiResponse<CatalogPageDto>),
    ),
    tag = "catalog"
)]
pub async fn browse_catalog(
    State(service): State<Arc<CatalogService>>,
    RawQuery(query): RawQuery,
) -> Json<ApiResponse<CatalogPageDto>> {
    let page = service.browse(query.as_deref().unwrap_or_default()).await;
    let total = page.total as i64;
    Json(ApiResponse::success(Some(page), None, Some(Meta { total })))
}

/// List featured products
#[utoipa::path(
    get,
    path = "/api/products/featured",
    responses(
        (status = 200, description = "Featured products", body = ApiResponse<Vec<CatalogProductDto>>),
    ),
    tag = "catalog"
)]
pub async fn list_featured_products(
    State(service): State<Arc<CatalogService>>,
) -> Json<ApiResponse<Vec<CatalogProductDto>>> {
    let products = service.featured().await;
    let total = products.len() as i64;
    Json(ApiResponse::success(Some(products), None, Some(Meta { total })))
}

/// Get product detail by slug
///
/// Includes related products from the same category and a prefilled order link.
#[utoipa::path(
    get,
    path = "/api/products/{slug}",
    params(
        ("slug" = String, Path, description = "Product slug")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductDetailDto>),
        (status = 404, description = "Product not found")
    ),
    tag = "catalog"
)]
pub async fn get_product_detail(
    State(service): State<Arc<CatalogService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<ProductDetailDto>>> {
    let detail = service.product_detail(&slug).await?;
    Ok(Json(ApiResponse::success(Some(detail), None, None)))
}
