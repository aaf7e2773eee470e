use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::FromRow;
use uuid::Uuid;

/// A product row joined with its category's name and slug.
#[derive(Debug, Clone, FromRow)]
pub struct CatalogProduct {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub images: Vec<String>,
    pub brand: Option<String>,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub stock: i32,
    pub featured: bool,
    pub rating: Option<f64>,
    pub is_new: bool,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CatalogProduct {
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Whole-percent discount against `original_price`, only when the
    /// original price is actually higher.
    pub fn discount_percent(&self) -> Option<i32> {
        let original = self.original_price?;
        if original <= self.price || original <= Decimal::ZERO {
            return None;
        }
        let percent = (original - self.price) / original * Decimal::ONE_HUNDRED;
        percent
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i32()
    }

    /// Customer-facing stock label, e.g. "3 disponibles" or "Sin stock".
    pub fn availability_label(&self) -> String {
        match self.stock {
            s if s <= 0 => "Sin stock".to_string(),
            1 => "1 disponible".to_string(),
            s => format!("{} disponibles", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: i64, original: Option<i64>, stock: i32) -> CatalogProduct {
        CatalogProduct {
            id: Uuid::new_v4(),
            name: "Labial Rojo".to_string(),
            slug: "labial-rojo".to_string(),
            price: Decimal::from(price),
            original_price: original.map(Decimal::from),
            images: vec![],
            brand: None,
            category_id: None,
            category_name: None,
            category_slug: None,
            stock,
            featured: false,
            rating: None,
            is_new: false,
            description: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_discount_percent_rounds() {
        assert_eq!(product(1200, Some(1500), 1).discount_percent(), Some(20));
        assert_eq!(product(2000, Some(3000), 1).discount_percent(), Some(33));
        assert_eq!(product(1000, Some(1500), 1).discount_percent(), Some(33));
        assert_eq!(product(500, Some(1500), 1).discount_percent(), Some(67));
    }

    #[test]
    fn test_discount_requires_higher_original_price() {
        assert_eq!(product(1500, None, 1).discount_percent(), None);
        assert_eq!(product(1500, Some(1500), 1).discount_percent(), None);
        assert_eq!(product(1500, Some(1000), 1).discount_percent(), None);
    }

    #[test]
    fn test_availability_label() {
        assert_eq!(product(1, None, 0).availability_label(), "Sin stock");
        assert_eq!(product(1, None, 1).availability_label(), "1 disponible");
        assert_eq!(product(1, None, 7).availability_label(), "7 disponibles");
        assert!(!product(1, None, 0).in_stock());
    }
}
