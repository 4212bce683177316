use crate::types::error::RecordError;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse forecast JSON from {url}")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Forecast response contains no time steps")]
    EmptyTimeseries,

    #[error("Forecast time step {0} has no air temperature")]
    MissingTemperature(DateTime<Utc>),

    #[error("Forecast returned an invalid sample")]
    InvalidSample(#[from] RecordError),
}
