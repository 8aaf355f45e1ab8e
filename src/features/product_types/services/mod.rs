mod product_type_service;

pub use product_type_service::*;
