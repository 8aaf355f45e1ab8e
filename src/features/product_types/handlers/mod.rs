mod product_type_handler;

pub use product_type_handler::*;
