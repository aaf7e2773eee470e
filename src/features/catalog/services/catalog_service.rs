use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::catalog::dtos::{
    CatalogFacetsDto, CatalogPageDto, CatalogProductDto, PriceBandDto, ProductDetailDto,
};
use crate::features::catalog::engine::{build_view, distinct_brands};
use crate::features::catalog::filters::{FilterState, PriceBand};
use crate::features::catalog::store::CatalogStore;
use crate::features::contact::ContactService;
use crate::shared::constants::RELATED_PRODUCTS_LIMIT;

/// Storefront read side: catalog browsing, featured products and product
/// detail pages.
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    contact: Arc<ContactService>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>, contact: Arc<ContactService>) -> Self {
        Self { store, contact }
    }

    /// Filter and sort the catalog for a raw query string.
    ///
    /// A store failure is logged and shown as an empty catalog.
    pub async fn browse(&self, query: &str) -> CatalogPageDto {
        let state = FilterState::from_query(query);

        let (products, categories) =
            match tokio::try_join!(self.store.list_products(), self.store.list_categories()) {
                Ok(loaded) => loaded,
                Err(e) => {
                    tracing::error!("Failed to load catalog, showing it empty: {}", e);
                    (Vec::new(), Vec::new())
                }
            };

        let view = build_view(&products, &categories, &state, query);
        tracing::debug!(
            "Catalog query '{}' matched {} of {} products",
            query,
            view.products.len(),
            products.len()
        );

        let facets = CatalogFacetsDto {
            brands: distinct_brands(&products),
            categories: categories.into_iter().map(Into::into).collect(),
            price_bands: PriceBand::ALL.into_iter().map(PriceBandDto::from).collect(),
        };

        CatalogPageDto {
            total: view.products.len(),
            products: view.products.into_iter().map(Into::into).collect(),
            state: view.state,
            sort: state.sort,
            active_filter_count: view.active_filter_count,
            active_filters: view.tags.into_iter().map(Into::into).collect(),
            query: state.to_query(),
            clear_all_query: view.clear_all_query,
            facets,
        }
    }

    /// Featured products for the home page. A store failure yields none.
    pub async fn featured(&self) -> Vec<CatalogProductDto> {
        match self.store.list_featured().await {
            Ok(products) => products.into_iter().map(Into::into).collect(),
            Err(e) => {
                tracing::error!("Failed to load featured products: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn product_detail(&self, slug: &str) -> Result<ProductDetailDto> {
        let product = self
            .store
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product '{}' not found", slug)))?;

        let related = match product.category_id {
            Some(category_id) => self
                .store
                .list_related(category_id, product.id, RELATED_PRODUCTS_LIMIT)
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!("Failed to load related products for {}: {}", slug, e);
                    Vec::new()
                }),
            None => Vec::new(),
        };

        let order_url = self
            .contact
            .product_order_link(&product.name, product.price, &product.slug);

        Ok(ProductDetailDto {
            url: self.contact.product_url(&product.slug),
            availability: product.availability_label(),
            description: product.description.clone(),
            order_url,
            related: related
                .into_iter()
                .take(RELATED_PRODUCTS_LIMIT)
                .map(Into::into)
                .collect(),
            product: product.into(),
        })
    }
}
