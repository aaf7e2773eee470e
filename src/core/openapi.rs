use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::catalog::{
    dtos as catalog_dtos, engine as catalog_engine, filters as catalog_filters,
    handlers as catalog_handlers,
};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::contact::{dtos as contact_dtos, handlers as contact_handlers};
use crate::features::files::{dtos as files_dtos, handlers as files_handlers};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Catalog (public)
        catalog_handlers::browse_catalog,
        catalog_handlers::list_featured_products,
        catalog_handlers::get_product_detail,
        // Categories (public)
        categories_handlers::list_categories,
        categories_handlers::get_category,
        // Contact (public)
        contact_handlers::get_contact,
        // Categories (admin)
        categories_handlers::admin_list_categories,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Products (admin)
        products_handlers::list_products,
        products_handlers::get_product,
        products_handlers::create_product,
        products_handlers::update_product,
        products_handlers::toggle_featured,
        products_handlers::delete_product,
        // Files (admin)
        files_handlers::upload_image,
        files_handlers::delete_file_by_url,
    ),
    components(
        schemas(
            ApiResponse<catalog_dtos::CatalogPageDto>,
            ApiResponse<Vec<catalog_dtos::CatalogProductDto>>,
            ApiResponse<catalog_dtos::ProductDetailDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::AdminCategoryDto>>,
            ApiResponse<categories_dtos::AdminCategoryDto>,
            ApiResponse<categories_dtos::DeleteCategoryResponseDto>,
            ApiResponse<contact_dtos::ContactChannelsDto>,
            ApiResponse<Vec<products_dtos::AdminProductDto>>,
            ApiResponse<products_dtos::AdminProductDto>,
            ApiResponse<files_dtos::FileResponseDto>,
            ApiResponse<files_dtos::DeleteFileResponseDto>,
            Meta,
            // Catalog
            catalog_dtos::CatalogPageDto,
            catalog_dtos::CatalogProductDto,
            catalog_dtos::CategoryRefDto,
            catalog_dtos::ActiveFilterDto,
            catalog_dtos::PriceBandDto,
            catalog_dtos::CatalogFacetsDto,
            catalog_dtos::ProductDetailDto,
            catalog_engine::CatalogState,
            catalog_filters::FilterKey,
            catalog_filters::PriceBand,
            catalog_filters::SortKey,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::AdminCategoryDto,
            categories_dtos::CategoryInputDto,
            categories_dtos::DeleteCategoryResponseDto,
            // Contact
            contact_dtos::ContactChannelsDto,
            // Products
            products_dtos::ProductInputDto,
            products_dtos::AdminProductDto,
            // Files
            files_dtos::UploadImageDto,
            files_dtos::FileResponseDto,
            files_dtos::DeleteFileByUrlDto,
            files_dtos::DeleteFileResponseDto,
        )
    ),
    tags(
        (name = "catalog", description = "Product browsing with search, filters and sorting (public)"),
        (name = "categories", description = "Product categories (public)"),
        (name = "contact", description = "Chat, email and phone contact links (public)"),
        (name = "admin-categories", description = "Category management (admin only)"),
        (name = "admin-products", description = "Product management (admin only)"),
        (name = "admin-files", description = "Product image uploads (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "Catalog, product detail and admin API for the storefront",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_public_and_admin_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/catalog",
            "/api/products/featured",
            "/api/products/{slug}",
            "/api/contact",
            "/api/admin/products/{id}/featured",
            "/api/admin/files/upload",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Tienda".to_string(),
            version: "2.0.0".to_string(),
            description: "Docs".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Tienda");
        assert_eq!(doc.info.version, "2.0.0");
        assert!(doc
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("bearer_auth")));
    }
}
