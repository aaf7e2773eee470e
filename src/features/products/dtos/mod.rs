mod product_dto;

pub use product_dto::{AdminProductDto, ProductInputDto};
