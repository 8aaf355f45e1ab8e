mod product_type;

pub use product_type::*;
