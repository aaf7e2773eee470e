mod category_dto;

pub use category_dto::{
    AdminCategoryDto, CategoryInputDto, CategoryResponseDto, DeleteCategoryResponseDto,
};
