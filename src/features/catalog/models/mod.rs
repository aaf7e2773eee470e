mod catalog_product;

pub use catalog_product::CatalogProduct;
