use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::products::{handlers, services::ProductService};

/// Create admin routes for product management (requires the admin role)
pub fn admin_routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route(
            "/api/admin/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/api/admin/products/{id}",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route(
            "/api/admin/products/{id}/featured",
            patch(handlers::toggle_featured),
        )
        .with_state(service)
}
