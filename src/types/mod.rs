pub mod combined_record;
pub mod error;
pub mod forecast_sample;
pub mod into_utc_trait;
pub mod race;
pub mod track_point;
