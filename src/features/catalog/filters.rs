//! Catalog filter state and its URL query codec.
//!
//! The storefront keeps filter state in the query string so a filtered
//! catalog can be bookmarked or shared. Keys are `buscar`, `categoria`,
//! `marca`, `precio` and `orden`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use utoipa::{IntoParams, ToSchema};

/// One filter dimension and the query key it is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FilterKey {
    Search,
    Category,
    Brand,
    Price,
    Sort,
}

impl FilterKey {
    /// Filter criteria in display order. `Sort` is not a criterion.
    pub const CRITERIA: [FilterKey; 4] = [
        FilterKey::Search,
        FilterKey::Category,
        FilterKey::Brand,
        FilterKey::Price,
    ];

    pub fn query_key(&self) -> &'static str {
        match self {
            FilterKey::Search => "buscar",
            FilterKey::Category => "categoria",
            FilterKey::Brand => "marca",
            FilterKey::Price => "precio",
            FilterKey::Sort => "orden",
        }
    }

    pub fn from_query_key(key: &str) -> Option<Self> {
        match key {
            "buscar" => Some(FilterKey::Search),
            "categoria" => Some(FilterKey::Category),
            "marca" => Some(FilterKey::Brand),
            "precio" => Some(FilterKey::Price),
            "orden" => Some(FilterKey::Sort),
            _ => None,
        }
    }
}

/// Coarse price bands offered by the catalog. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PriceBand {
    #[serde(rename = "0-1500")]
    UpTo1500,
    #[serde(rename = "1500-3000")]
    From1500To3000,
    #[serde(rename = "3000-5000")]
    From3000To5000,
    #[serde(rename = "5000")]
    From5000,
}

impl PriceBand {
    pub const ALL: [PriceBand; 4] = [
        PriceBand::UpTo1500,
        PriceBand::From1500To3000,
        PriceBand::From3000To5000,
        PriceBand::From5000,
    ];

    /// Parse a `precio` token. Anything outside the fixed set is `None`.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "0-1500" => Some(PriceBand::UpTo1500),
            "1500-3000" => Some(PriceBand::From1500To3000),
            "3000-5000" => Some(PriceBand::From3000To5000),
            "5000" => Some(PriceBand::From5000),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            PriceBand::UpTo1500 => "0-1500",
            PriceBand::From1500To3000 => "1500-3000",
            PriceBand::From3000To5000 => "3000-5000",
            PriceBand::From5000 => "5000",
        }
    }

    /// Inclusive lower bound and optional inclusive upper bound.
    pub fn bounds(&self) -> (Decimal, Option<Decimal>) {
        match self {
            PriceBand::UpTo1500 => (Decimal::ZERO, Some(Decimal::from(1500))),
            PriceBand::From1500To3000 => (Decimal::from(1500), Some(Decimal::from(3000))),
            PriceBand::From3000To5000 => (Decimal::from(3000), Some(Decimal::from(5000))),
            PriceBand::From5000 => (Decimal::from(5000), None),
        }
    }

    pub fn contains(&self, price: Decimal) -> bool {
        let (min, max) = self.bounds();
        price >= min && max.is_none_or(|max| price <= max)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceBand::UpTo1500 => "Hasta $1,500",
            PriceBand::From1500To3000 => "$1,500 - $3,000",
            PriceBand::From3000To5000 => "$3,000 - $5,000",
            PriceBand::From5000 => "Más de $5,000",
        }
    }
}

/// Catalog ordering. `Name` is the default and is never written to the URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SortKey {
    #[default]
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "price-low")]
    PriceLow,
    #[serde(rename = "price-high")]
    PriceHigh,
    #[serde(rename = "featured")]
    Featured,
}

impl SortKey {
    /// Unknown tokens fall back to the default ordering.
    pub fn parse(token: &str) -> Self {
        match token {
            "price-low" => SortKey::PriceLow,
            "price-high" => SortKey::PriceHigh,
            "featured" => SortKey::Featured,
            _ => SortKey::Name,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Featured => "featured",
        }
    }
}

/// Raw catalog query parameters, as they appear in the URL.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    /// Free-text search over name, brand and category name
    pub buscar: Option<String>,
    /// Category slug
    pub categoria: Option<String>,
    /// Exact brand name
    pub marca: Option<String>,
    /// Price band: `0-1500`, `1500-3000`, `3000-5000` or `5000`
    pub precio: Option<String>,
    /// Sort key: `name` (default), `price-low`, `price-high`, `featured`
    pub orden: Option<String>,
}

/// Normalized filter state. Blank values are unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price: Option<PriceBand>,
    pub sort: SortKey,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<CatalogQuery> for FilterState {
    fn from(q: CatalogQuery) -> Self {
        Self {
            search: present(q.buscar),
            category: present(q.categoria),
            brand: present(q.marca),
            price: q.precio.as_deref().and_then(PriceBand::parse),
            sort: q.orden.as_deref().map(SortKey::parse).unwrap_or_default(),
        }
    }
}

impl FilterState {
    /// Seed state from an existing query string (leading `?` allowed).
    ///
    /// Unknown keys are ignored; for repeated keys the first value wins.
    pub fn from_query(query: &str) -> Self {
        let mut raw = CatalogQuery::default();

        for (key, value) in parse_pairs(query) {
            let slot = match FilterKey::from_query_key(&key) {
                Some(FilterKey::Search) => &mut raw.buscar,
                Some(FilterKey::Category) => &mut raw.categoria,
                Some(FilterKey::Brand) => &mut raw.marca,
                Some(FilterKey::Price) => &mut raw.precio,
                Some(FilterKey::Sort) => &mut raw.orden,
                None => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        raw.into()
    }

    /// Canonical query string for this state: active keys only, in a fixed
    /// order, `orden` only when it is not the default.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for key in FilterKey::CRITERIA {
            if let Some(value) = self.value_of(key) {
                serializer.append_pair(key.query_key(), &value);
            }
        }
        if self.sort != SortKey::default() {
            serializer.append_pair(FilterKey::Sort.query_key(), self.sort.token());
        }
        serializer.finish()
    }

    /// Current value of one dimension in its URL form.
    pub fn value_of(&self, key: FilterKey) -> Option<String> {
        match key {
            FilterKey::Search => self.search.clone(),
            FilterKey::Category => self.category.clone(),
            FilterKey::Brand => self.brand.clone(),
            FilterKey::Price => self.price.map(|p| p.token().to_string()),
            FilterKey::Sort => {
                (self.sort != SortKey::default()).then(|| self.sort.token().to_string())
            }
        }
    }

    /// Set one dimension from its URL form; an empty value clears it.
    pub fn set(&mut self, key: FilterKey, value: &str) {
        let value = Some(value.to_string());
        match key {
            FilterKey::Search => self.search = present(value),
            FilterKey::Category => self.category = present(value),
            FilterKey::Brand => self.brand = present(value),
            FilterKey::Price => self.price = value.as_deref().and_then(PriceBand::parse),
            FilterKey::Sort => self.sort = value.as_deref().map(SortKey::parse).unwrap_or_default(),
        }
    }

    /// Update the state and the query string together.
    ///
    /// Returns the new query string: `key` set (or removed when `value` is
    /// empty), every other key of `current_query` left as it was.
    pub fn apply(&mut self, current_query: &str, key: FilterKey, value: &str) -> String {
        self.set(key, value);
        set_query_param(current_query, key.query_key(), value)
    }

    /// Number of active filter criteria. Sorting does not count.
    pub fn active_count(&self) -> usize {
        FilterKey::CRITERIA
            .iter()
            .filter(|key| self.value_of(**key).is_some())
            .count()
    }
}

fn parse_pairs(query: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .into_owned()
        .collect()
}

/// Set or remove one key in a query string without touching the others.
///
/// An existing key keeps its position; duplicates of it are dropped. A new
/// key is appended. An empty `value` removes the key entirely.
pub fn set_query_param(query: &str, key: &str, value: &str) -> String {
    let mut pairs = parse_pairs(query);
    let position = pairs.iter().position(|(k, _)| k == key);
    pairs.retain(|(k, _)| k != key);

    if !value.is_empty() {
        let index = position.unwrap_or(pairs.len()).min(pairs.len());
        pairs.insert(index, (key.to_string(), value.to_string()));
    }

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Remove every filter criterion from a query string, keeping sort order
/// and unrelated keys.
pub fn clear_filters_query(query: &str) -> String {
    FilterKey::CRITERIA
        .iter()
        .fold(query.trim_start_matches('?').to_string(), |acc, key| {
            set_query_param(&acc, key.query_key(), "")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_band_tokens() {
        for band in PriceBand::ALL {
            assert_eq!(PriceBand::parse(band.token()), Some(band));
        }
        assert_eq!(PriceBand::parse("100-200"), None);
        assert_eq!(PriceBand::parse(""), None);
        assert_eq!(PriceBand::parse("abc"), None);
    }

    #[test]
    fn test_price_band_bounds_are_inclusive() {
        let low = PriceBand::UpTo1500;
        assert!(low.contains(Decimal::from(0)));
        assert!(low.contains(Decimal::from(1500)));
        assert!(!low.contains(Decimal::new(150001, 2)));

        let mid = PriceBand::From1500To3000;
        assert!(mid.contains(Decimal::from(1500)));
        assert!(mid.contains(Decimal::from(3000)));
        assert!(!mid.contains(Decimal::new(149999, 2)));

        let top = PriceBand::From5000;
        assert!(top.contains(Decimal::from(5000)));
        assert!(top.contains(Decimal::from(1_000_000)));
        assert!(!top.contains(Decimal::from(4999)));
    }

    #[test]
    fn test_sort_key_defaults_to_name() {
        assert_eq!(SortKey::parse("price-high"), SortKey::PriceHigh);
        assert_eq!(SortKey::parse("bogus"), SortKey::Name);
        assert_eq!(SortKey::default(), SortKey::Name);
    }

    #[test]
    fn test_from_query_reads_known_keys() {
        let state =
            FilterState::from_query("?buscar=labial&categoria=labiales&marca=Bella+Cosmetics&precio=1500-3000&orden=price-low&page=2");

        assert_eq!(state.search.as_deref(), Some("labial"));
        assert_eq!(state.category.as_deref(), Some("labiales"));
        assert_eq!(state.brand.as_deref(), Some("Bella Cosmetics"));
        assert_eq!(state.price, Some(PriceBand::From1500To3000));
        assert_eq!(state.sort, SortKey::PriceLow);
        assert_eq!(state.active_count(), 4);
    }

    #[test]
    fn test_from_query_ignores_blank_and_unknown_price() {
        let state = FilterState::from_query("buscar=&marca=%20%20&precio=42");
        assert_eq!(state, FilterState::default());
        assert_eq!(state.active_count(), 0);
    }

    #[test]
    fn test_from_query_first_value_wins() {
        let state = FilterState::from_query("marca=A&marca=B");
        assert_eq!(state.brand.as_deref(), Some("A"));
    }

    #[test]
    fn test_to_query_round_trip() {
        let state = FilterState {
            search: Some("sombra azul".to_string()),
            category: Some("sombras".to_string()),
            brand: Some("B & Co".to_string()),
            price: Some(PriceBand::From5000),
            sort: SortKey::Featured,
        };

        let query = state.to_query();
        assert_eq!(FilterState::from_query(&query), state);
    }

    #[test]
    fn test_to_query_omits_default_sort() {
        let state = FilterState {
            brand: Some("A".to_string()),
            ..Default::default()
        };
        assert_eq!(state.to_query(), "marca=A");
        assert_eq!(FilterState::default().to_query(), "");
    }

    #[test]
    fn test_set_query_param_keeps_unrelated_keys() {
        let query = "utm_source=ig&marca=A&page=2";

        assert_eq!(
            set_query_param(query, "marca", "B"),
            "utm_source=ig&marca=B&page=2"
        );
        assert_eq!(
            set_query_param(query, "precio", "5000"),
            "utm_source=ig&marca=A&page=2&precio=5000"
        );
        assert_eq!(set_query_param(query, "marca", ""), "utm_source=ig&page=2");
        assert_eq!(set_query_param("", "buscar", ""), "");
    }

    #[test]
    fn test_set_query_param_drops_duplicates() {
        assert_eq!(set_query_param("marca=A&x=1&marca=B", "marca", "C"), "marca=C&x=1");
    }

    #[test]
    fn test_apply_updates_state_and_query() {
        let mut state = FilterState::from_query("categoria=labiales&ref=home");
        let query = state.apply("categoria=labiales&ref=home", FilterKey::Price, "0-1500");

        assert_eq!(query, "categoria=labiales&ref=home&precio=0-1500");
        assert_eq!(state.price, Some(PriceBand::UpTo1500));
        assert_eq!(FilterState::from_query(&query), state);

        let query = state.apply(&query, FilterKey::Category, "");
        assert_eq!(query, "ref=home&precio=0-1500");
        assert_eq!(state.category, None);
    }

    #[test]
    fn test_clearing_one_dimension_leaves_the_others() {
        let query = "buscar=rojo&marca=A&orden=price-high";
        let mut cleared = FilterState::from_query(query);
        let next_query = cleared.apply(query, FilterKey::Brand, "");

        assert_eq!(next_query, "buscar=rojo&orden=price-high");
        assert_eq!(cleared.brand, None);
        assert_eq!(cleared.search.as_deref(), Some("rojo"));
        assert_eq!(cleared.sort, SortKey::PriceHigh);
    }

    #[test]
    fn test_clear_filters_query_keeps_sort_and_unrelated_keys() {
        assert_eq!(
            clear_filters_query("?buscar=x&orden=featured&categoria=c&ref=nav&precio=5000"),
            "orden=featured&ref=nav"
        );
    }
}
