pub mod chart;
pub mod error;
