pub mod auth;
pub mod brands;
pub mod categories;
pub mod contact;
pub mod coupons;
pub mod dashboard;
pub mod product_types;
pub mod products;
