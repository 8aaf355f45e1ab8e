mod coupon_handler;

pub use coupon_handler::*;
