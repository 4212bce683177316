pub mod birken_route;
pub mod error;
