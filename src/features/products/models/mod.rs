mod product;
mod product_variant;

pub use product::*;
pub use product_variant::*;
