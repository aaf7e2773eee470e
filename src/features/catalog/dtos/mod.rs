mod catalog_dto;

pub use catalog_dto::{
    ActiveFilterDto, CatalogFacetsDto, CatalogPageDto, CatalogProductDto, CategoryRefDto,
    PriceBandDto, ProductDetailDto,
};
