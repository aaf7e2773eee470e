//! Catalog filtering and ordering.
//!
//! Everything here is a pure function of the product list and a
//! [`FilterState`]; nothing touches the database or the network.

use std::cmp::Ordering;

use deunicode::deunicode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::filters::{clear_filters_query, FilterKey, FilterState, SortKey};
use crate::features::catalog::models::CatalogProduct;
use crate::features::categories::models::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CatalogState {
    /// The store holds no products at all
    NoProductsAvailable,
    /// Products exist but none pass the active filters
    NoMatches,
    Results,
}

/// One removable description of an active filter criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilterTag {
    pub key: FilterKey,
    pub label: String,
    pub value: String,
    /// Query string with this criterion alone removed
    pub clear_query: String,
}

#[derive(Debug, Clone)]
pub struct CatalogView {
    pub products: Vec<CatalogProduct>,
    pub active_filter_count: usize,
    pub tags: Vec<ActiveFilterTag>,
    pub state: CatalogState,
    /// Query string with every criterion removed (sort and unrelated keys stay)
    pub clear_all_query: String,
}

/// Whether `product` passes every active criterion of `state`.
pub fn matches(product: &CatalogProduct, state: &FilterState) -> bool {
    if let Some(search) = &state.search {
        let needle = search.to_lowercase();
        let contains = |field: Option<&str>| {
            field.is_some_and(|value| value.to_lowercase().contains(&needle))
        };
        if !(contains(Some(&product.name))
            || contains(product.brand.as_deref())
            || contains(product.category_name.as_deref()))
        {
            return false;
        }
    }

    if let Some(category) = &state.category {
        if product.category_slug.as_deref() != Some(category.as_str()) {
            return false;
        }
    }

    if let Some(brand) = &state.brand {
        if product.brand.as_deref() != Some(brand.as_str()) {
            return false;
        }
    }

    if let Some(band) = state.price {
        if !band.contains(product.price) {
            return false;
        }
    }

    true
}

/// Key used for name ordering: accents folded, case ignored.
fn collation_key(name: &str) -> String {
    deunicode(name).to_lowercase()
}

fn compare(a: &CatalogProduct, b: &CatalogProduct, sort: SortKey) -> Ordering {
    match sort {
        SortKey::Name => collation_key(&a.name)
            .cmp(&collation_key(&b.name))
            .then_with(|| a.name.cmp(&b.name)),
        SortKey::PriceLow => a.price.cmp(&b.price),
        SortKey::PriceHigh => b.price.cmp(&a.price),
        SortKey::Featured => b.featured.cmp(&a.featured),
    }
}

/// Sort in place. The sort is stable, so equal keys keep their input order.
pub fn sort_products(products: &mut [CatalogProduct], sort: SortKey) {
    products.sort_by(|a, b| compare(a, b, sort));
}

/// Filter then sort: the ordered list of products visible under `state`.
pub fn compute_visible(products: &[CatalogProduct], state: &FilterState) -> Vec<CatalogProduct> {
    let mut visible: Vec<CatalogProduct> = products
        .iter()
        .filter(|p| matches(p, state))
        .cloned()
        .collect();
    sort_products(&mut visible, state.sort);
    visible
}

fn tag_label(key: FilterKey, value: &str, state: &FilterState, categories: &[Category]) -> String {
    match key {
        FilterKey::Search => format!("Búsqueda: \"{}\"", value),
        FilterKey::Category => {
            let name = categories
                .iter()
                .find(|c| c.slug == value)
                .map(|c| c.name.as_str())
                .unwrap_or(value);
            format!("Categoría: {}", name)
        }
        FilterKey::Brand => format!("Marca: {}", value),
        FilterKey::Price => {
            let band = state.price.map(|b| b.label()).unwrap_or(value);
            format!("Precio: {}", band)
        }
        FilterKey::Sort => value.to_string(),
    }
}

/// Tags for every active criterion, in the fixed criterion order.
pub fn active_tags(state: &FilterState, categories: &[Category], query: &str) -> Vec<ActiveFilterTag> {
    FilterKey::CRITERIA
        .iter()
        .filter_map(|&key| {
            let value = state.value_of(key)?;
            let clear_query = state.clone().apply(query, key, "");
            Some(ActiveFilterTag {
                key,
                label: tag_label(key, &value, state, categories),
                clear_query,
                value,
            })
        })
        .collect()
}

/// Full catalog view for one request.
///
/// `query` is the request's raw query string; clear links are derived from
/// it so unrelated keys survive.
pub fn build_view(
    products: &[CatalogProduct],
    categories: &[Category],
    state: &FilterState,
    query: &str,
) -> CatalogView {
    let visible = compute_visible(products, state);

    let catalog_state = if products.is_empty() {
        CatalogState::NoProductsAvailable
    } else if visible.is_empty() {
        CatalogState::NoMatches
    } else {
        CatalogState::Results
    };

    CatalogView {
        products: visible,
        active_filter_count: state.active_count(),
        tags: active_tags(state, categories, query),
        state: catalog_state,
        clear_all_query: clear_filters_query(query),
    }
}

/// Distinct non-empty brands in first-seen order.
pub fn distinct_brands(products: &[CatalogProduct]) -> Vec<String> {
    let mut brands: Vec<String> = Vec::new();
    for brand in products.iter().filter_map(|p| p.brand.as_deref()) {
        if !brand.is_empty() && !brands.iter().any(|b| b == brand) {
            brands.push(brand.to_string());
        }
    }
    brands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::catalog::filters::PriceBand;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn product(name: &str, price: i64, brand: Option<&str>, category: Option<&str>) -> CatalogProduct {
        CatalogProduct {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: crate::shared::validation::slugify(name),
            price: Decimal::from(price),
            original_price: None,
            images: vec![],
            brand: brand.map(str::to_string),
            category_id: category.map(|_| Uuid::new_v4()),
            category_name: category.map(|c| {
                let mut name = c.to_string();
                name[..1].make_ascii_uppercase();
                name
            }),
            category_slug: category.map(str::to_string),
            stock: 10,
            featured: false,
            rating: None,
            is_new: false,
            description: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn category(name: &str, slug: &str) -> Category {
        let now = Utc::now();
        Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: slug.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn two_products() -> Vec<CatalogProduct> {
        vec![
            product("Labial Rojo", 1200, Some("A"), Some("labiales")),
            product("Sombra Azul", 3500, Some("B"), Some("sombras")),
        ]
    }

    fn names(products: &[CatalogProduct]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    fn sample() -> Vec<CatalogProduct> {
        let mut featured = product("Base Líquida", 2800, Some("B"), Some("rostro"));
        featured.featured = true;
        vec![
            product("Sombra Azul", 3500, Some("B"), Some("sombras")),
            product("labial nude", 900, Some("A"), Some("labiales")),
            featured,
            product("Labial Rojo", 1200, Some("A"), Some("labiales")),
            product("Paleta Profesional", 5200, None, None),
            product("Esmalte Ámbar", 1500, Some("C"), None),
        ]
    }

    fn all_states() -> Vec<FilterState> {
        let mut states = Vec::new();
        for search in [None, Some("labial"), Some("b")] {
            for category in [None, Some("labiales"), Some("inexistente")] {
                for brand in [None, Some("A"), Some("B")] {
                    for price in [None, Some(PriceBand::UpTo1500), Some(PriceBand::From5000)] {
                        for sort in [SortKey::Name, SortKey::PriceHigh, SortKey::Featured] {
                            states.push(FilterState {
                                search: search.map(str::to_string),
                                category: category.map(str::to_string),
                                brand: brand.map(str::to_string),
                                price,
                                sort,
                            });
                        }
                    }
                }
            }
        }
        states
    }

    #[test]
    fn test_category_filter_scenario() {
        let state = FilterState::from_query("categoria=labiales");
        assert_eq!(names(&compute_visible(&two_products(), &state)), ["Labial Rojo"]);
    }

    #[test]
    fn test_price_band_scenario() {
        let state = FilterState::from_query("precio=3000-5000");
        assert_eq!(names(&compute_visible(&two_products(), &state)), ["Sombra Azul"]);
    }

    #[test]
    fn test_price_high_scenario() {
        let state = FilterState::from_query("orden=price-high");
        assert_eq!(
            names(&compute_visible(&two_products(), &state)),
            ["Sombra Azul", "Labial Rojo"]
        );
    }

    #[test]
    fn test_empty_store_is_not_no_matches() {
        let state = FilterState::from_query("buscar=labial");
        let view = build_view(&[], &[], &state, "buscar=labial");
        assert_eq!(view.state, CatalogState::NoProductsAvailable);

        let view = build_view(&two_products(), &[], &state, "buscar=labial");
        assert_eq!(view.state, CatalogState::Results);

        let state = FilterState::from_query("marca=Z");
        let view = build_view(&two_products(), &[], &state, "marca=Z");
        assert_eq!(view.state, CatalogState::NoMatches);
        assert!(view.products.is_empty());
    }

    #[test]
    fn test_visible_is_subset_for_all_states() {
        let products = sample();
        for state in all_states() {
            for p in compute_visible(&products, &state) {
                assert!(products.iter().any(|q| q.id == p.id), "{:?}", state);
            }
        }
    }

    #[test]
    fn test_filter_then_clear_returns_sorted_original() {
        let products = sample();
        let base = FilterState {
            sort: SortKey::PriceLow,
            ..Default::default()
        };
        let expected = compute_visible(&products, &base);
        assert_eq!(expected.len(), products.len());

        for key in FilterKey::CRITERIA {
            let mut state = base.clone();
            state.set(
                key,
                match key {
                    FilterKey::Search => "labial",
                    FilterKey::Category => "labiales",
                    FilterKey::Brand => "A",
                    _ => "0-1500",
                },
            );
            assert!(compute_visible(&products, &state).len() < products.len());

            let mut cleared = state.clone();
            cleared.apply("", key, "");
            assert_eq!(
                names(&compute_visible(&products, &cleared)),
                names(&expected)
            );
        }
    }

    #[test]
    fn test_sorting_is_idempotent() {
        for sort in [SortKey::Name, SortKey::PriceLow, SortKey::PriceHigh, SortKey::Featured] {
            let mut once = sample();
            sort_products(&mut once, sort);
            let mut twice = once.clone();
            sort_products(&mut twice, sort);
            assert_eq!(names(&once), names(&twice));
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let products = sample();
        let upper = compute_visible(&products, &FilterState::from_query("buscar=LABIAL"));
        let lower = compute_visible(&products, &FilterState::from_query("buscar=labial"));
        assert_eq!(names(&upper), names(&lower));
        assert_eq!(names(&lower), ["labial nude", "Labial Rojo"]);
    }

    #[test]
    fn test_search_covers_brand_and_category_name() {
        let products = sample();
        let by_category = compute_visible(&products, &FilterState::from_query("buscar=ROSTRO"));
        assert_eq!(names(&by_category), ["Base Líquida"]);

        let by_brand = compute_visible(&products, &FilterState::from_query("buscar=c"));
        assert!(names(&by_brand).contains(&"Esmalte Ámbar"));
    }

    #[test]
    fn test_url_round_trip_yields_same_visible_list() {
        let products = sample();
        for state in all_states() {
            let restored = FilterState::from_query(&state.to_query());
            assert_eq!(
                names(&compute_visible(&products, &state)),
                names(&compute_visible(&products, &restored))
            );
        }
    }

    #[test]
    fn test_name_sort_ignores_case_and_accents() {
        let visible = compute_visible(&sample(), &FilterState::default());
        assert_eq!(
            names(&visible),
            [
                "Base Líquida",
                "Esmalte Ámbar",
                "labial nude",
                "Labial Rojo",
                "Paleta Profesional",
                "Sombra Azul"
            ]
        );
    }

    #[test]
    fn test_featured_sort_is_stable() {
        let mut products = two_products();
        products[1].featured = true;
        products.push(product("Rubor Coral", 800, Some("A"), None));

        let visible = compute_visible(&products, &FilterState::from_query("orden=featured"));
        assert_eq!(names(&visible), ["Sombra Azul", "Labial Rojo", "Rubor Coral"]);
    }

    #[test]
    fn test_products_without_brand_or_category() {
        let products = sample();
        let unfiltered = compute_visible(&products, &FilterState::default());
        assert!(names(&unfiltered).contains(&"Paleta Profesional"));

        let by_brand = compute_visible(&products, &FilterState::from_query("marca=A"));
        assert!(!names(&by_brand).contains(&"Paleta Profesional"));

        let by_category = compute_visible(&products, &FilterState::from_query("categoria=labiales"));
        assert!(!names(&by_category).contains(&"Paleta Profesional"));
    }

    #[test]
    fn test_unknown_price_token_applies_no_filter() {
        let products = sample();
        let state = FilterState::from_query("precio=barato");
        let view = build_view(&products, &[], &state, "precio=barato");
        assert_eq!(view.products.len(), products.len());
        assert_eq!(view.active_filter_count, 0);
        assert!(view.tags.is_empty());
    }

    #[test]
    fn test_tags_describe_each_active_criterion() {
        let query = "ref=ig&buscar=rojo&categoria=labiales&marca=A&precio=0-1500&orden=price-low";
        let state = FilterState::from_query(query);
        let categories = vec![category("Labiales", "labiales")];
        let view = build_view(&sample(), &categories, &state, query);

        let labels: Vec<&str> = view.tags.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Búsqueda: \"rojo\"",
                "Categoría: Labiales",
                "Marca: A",
                "Precio: Hasta $1,500"
            ]
        );
        assert_eq!(view.active_filter_count, 4);
        assert_eq!(names(&view.products), ["Labial Rojo"]);

        let brand_tag = &view.tags[2];
        assert_eq!(brand_tag.key, FilterKey::Brand);
        assert_eq!(brand_tag.value, "A");
        assert_eq!(
            brand_tag.clear_query,
            "ref=ig&buscar=rojo&categoria=labiales&precio=0-1500&orden=price-low"
        );
        assert_eq!(view.clear_all_query, "ref=ig&orden=price-low");
    }

    #[test]
    fn test_unknown_category_tag_falls_back_to_slug() {
        let state = FilterState::from_query("categoria=brochas");
        let tags = active_tags(&state, &[], "categoria=brochas");
        assert_eq!(tags[0].label, "Categoría: brochas");
        assert_eq!(tags[0].clear_query, "");
    }

    #[test]
    fn test_distinct_brands_in_first_seen_order() {
        assert_eq!(distinct_brands(&sample()), ["B", "A", "C"]);
        assert!(distinct_brands(&[]).is_empty());
    }
}
