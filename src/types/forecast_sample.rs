use crate::types::error::{ensure_finite, ensure_range, RecordError};
use crate::types::track_point::LatLon;
use chrono::{DateTime, Utc};

/// A forecast temperature range for one place and time.
///
/// Construct through [`ForecastSample::new`], which guarantees finite values and
/// `temp_low <= temp_high`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    timestamp: DateTime<Utc>,
    location: LatLon,
    temp_low: f64,
    temp_high: f64,
}

impl ForecastSample {
    pub fn new(
        timestamp: DateTime<Utc>,
        location: LatLon,
        temp_low: f64,
        temp_high: f64,
    ) -> Result<Self, RecordError> {
        ensure_finite("latitude", location.0)?;
        ensure_finite("longitude", location.1)?;
        ensure_range(temp_low, temp_high)?;
        Ok(Self {
            timestamp,
            location,
            temp_low,
            temp_high,
        })
    }

    /// The forecast time step the temperatures belong to.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn location(&self) -> LatLon {
        self.location
    }

    pub fn temp_low(&self) -> f64 {
        self.temp_low
    }

    pub fn temp_high(&self) -> f64 {
        self.temp_high
    }
}
