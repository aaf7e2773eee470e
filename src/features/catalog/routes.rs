use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::catalog::handlers;
use crate::features::catalog::services::CatalogService;

/// Create routes for the catalog feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route("/api/catalog", get(handlers::browse_catalog))
        .route(
            "/api/products/featured",
            get(handlers::list_featured_products),
        )
        .route("/api/products/{slug}", get(handlers::get_product_detail))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{contact_service, sample_catalog, InMemoryCatalogStore};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;

    fn server() -> TestServer {
        let (products, categories) = sample_catalog();
        let service = CatalogService::new(
            Arc::new(InMemoryCatalogStore::new(products, categories)),
            Arc::new(contact_service()),
        );
        TestServer::new(routes(Arc::new(service))).unwrap()
    }

    #[tokio::test]
    async fn test_browse_catalog_with_filters() {
        let response = server()
            .get("/api/catalog")
            .add_query_param("precio", "3000-5000")
            .add_query_param("ref", "home")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["meta"]["total"], 1);

        let data = &body["data"];
        assert_eq!(data["state"], "results");
        assert_eq!(data["products"][0]["slug"], "sombra-azul");
        assert_eq!(data["products"][0]["price"], 3500.0);
        assert_eq!(data["products"][0]["category"]["slug"], "sombras");
        assert_eq!(data["active_filters"][0]["key"], "price");
        assert_eq!(data["active_filters"][0]["param"], "precio");
        assert_eq!(data["active_filters"][0]["label"], "Precio: $3,000 - $5,000");
        assert_eq!(data["active_filters"][0]["clear_query"], "ref=home");
        assert_eq!(data["query"], "precio=3000-5000");
    }

    #[tokio::test]
    async fn test_browse_catalog_default_sort_by_name() {
        let response = server().get("/api/catalog").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let names: Vec<&str> = body["data"]["products"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            ["Labial Mate Cereza", "Labial Rojo", "Paleta Profesional", "Sombra Azul"]
        );
        assert_eq!(body["data"]["sort"], "name");
        assert_eq!(body["data"]["active_filter_count"], 0);
    }

    #[tokio::test]
    async fn test_browse_catalog_no_matches() {
        let response = server()
            .get("/api/catalog")
            .add_query_param("buscar", "rímel")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["state"], "no_matches");
        assert_eq!(body["data"]["total"], 0);
        assert_eq!(body["data"]["active_filters"][0]["label"], "Búsqueda: \"rímel\"");
    }

    #[tokio::test]
    async fn test_featured_products() {
        let response = server().get("/api/products/featured").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["featured"], true);
    }

    #[tokio::test]
    async fn test_product_detail() {
        let response = server().get("/api/products/paleta-profesional").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["availability"], "Sin stock");
        assert_eq!(body["data"]["product"]["in_stock"], false);
        assert_eq!(body["data"]["related"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_product_detail_not_found() {
        let response = server().get("/api/products/no-existe").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }
}
