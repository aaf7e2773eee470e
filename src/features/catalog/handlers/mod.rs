pub mod catalog_handler;

pub use catalog_handler::{
    __path_browse_catalog, __path_get_product_detail, __path_list_featured_products,
    browse_catalog, get_product_detail, list_featured_products,
};
