pub mod cache_gateway;
pub mod error;
