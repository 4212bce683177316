//! The joined track/forecast record that is cached and plotted.

use crate::types::error::{ensure_finite, ensure_range, RecordError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One point of the temperature profile: track geometry plus the forecast
/// range of the bucket the point belongs to.
///
/// Values are checked on construction and again when deserialized, so a
/// tampered cache file surfaces as a decode error instead of a bogus chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCombinedRecord")]
pub struct CombinedRecord {
    distance_m: f64,
    elevation_m: f64,
    timestamp: DateTime<Utc>,
    temp_low: f64,
    temp_high: f64,
}

#[derive(Deserialize)]
struct RawCombinedRecord {
    distance_m: f64,
    elevation_m: f64,
    timestamp: DateTime<Utc>,
    temp_low: f64,
    temp_high: f64,
}

impl TryFrom<RawCombinedRecord> for CombinedRecord {
    type Error = RecordError;

    fn try_from(raw: RawCombinedRecord) -> Result<Self, Self::Error> {
        CombinedRecord::new(
            raw.distance_m,
            raw.elevation_m,
            raw.timestamp,
            raw.temp_low,
            raw.temp_high,
        )
    }
}

impl CombinedRecord {
    pub fn new(
        distance_m: f64,
        elevation_m: f64,
        timestamp: DateTime<Utc>,
        temp_low: f64,
        temp_high: f64,
    ) -> Result<Self, RecordError> {
        ensure_finite("distance_m", distance_m)?;
        ensure_finite("elevation_m", elevation_m)?;
        ensure_range(temp_low, temp_high)?;
        Ok(Self {
            distance_m,
            elevation_m,
            timestamp,
            temp_low,
            temp_high,
        })
    }

    pub fn distance_m(&self) -> f64 {
        self.distance_m
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }

    pub fn elevation_m(&self) -> f64 {
        self.elevation_m
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn temp_low(&self) -> f64 {
        self.temp_low
    }

    pub fn temp_high(&self) -> f64 {
        self.temp_high
    }
}
