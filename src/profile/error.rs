use crate::forecast::error::ForecastError;
use crate::types::error::RecordError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JoinError {
    #[error("Forecast unavailable for bucket {bucket} of {bucket_count}")]
    ForecastUnavailable {
        bucket: usize,
        bucket_count: usize,
        #[source]
        source: ForecastError,
    },

    #[error("Track point {index} produced an invalid record")]
    InvalidRecord {
        index: usize,
        #[source]
        source: RecordError,
    },
}
