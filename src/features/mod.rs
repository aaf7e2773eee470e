pub mod auth;
pub mod catalog;
pub mod categories;
pub mod contact;
pub mod files;
pub mod products;
