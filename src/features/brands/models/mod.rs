mod brand;

pub use brand::*;
