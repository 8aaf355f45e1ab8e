pub mod constants;
pub mod query_cache;
pub mod resource;
pub mod test_helpers;
pub mod types;
pub mod validation;
