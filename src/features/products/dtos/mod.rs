mod product_dto;
mod variant_dto;

pub use product_dto::*;
pub use variant_dto::*;
