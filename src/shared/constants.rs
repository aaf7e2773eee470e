/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Shop administrator - can manage products, categories and images
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// CATALOG CONSTANTS
// =============================================================================

/// Maximum number of images attached to one product
pub const MAX_PRODUCT_IMAGES: usize = 5;

/// Number of related products shown on a product detail page
pub const RELATED_PRODUCTS_LIMIT: usize = 4;

/// Stock at or below this level is flagged as low in the admin list
pub const LOW_STOCK_THRESHOLD: i32 = 5;

/// Largest price a `NUMERIC(12, 2)` column holds
pub const MAX_PRICE: f64 = 9_999_999_999.99;

/// Slugs taken by fixed routes under `/api/products`
pub const RESERVED_PRODUCT_SLUGS: &[&str] = &["featured"];
