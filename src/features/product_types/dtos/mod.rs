mod product_type_dto;

pub use product_type_dto::*;
