mod product_handler;
mod variant_handler;

pub use product_handler::*;
pub use variant_handler::*;
