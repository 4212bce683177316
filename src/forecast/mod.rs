pub mod error;
pub mod met_client;
pub mod met_types;
pub mod session;
