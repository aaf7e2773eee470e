pub mod dtos;
pub mod engine;
pub mod filters;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use routes::routes;
pub use services::CatalogService;
pub use store::{CatalogStore, PgCatalogStore};
