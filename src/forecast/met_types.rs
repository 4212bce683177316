//! Subset of the met.no Locationforecast 2.0 `complete` response that the
//! profiler reads. Unknown fields are ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct MetResponse {
    pub properties: MetProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetProperties {
    pub timeseries: Vec<MetTimeStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetTimeStep {
    pub time: DateTime<Utc>,
    pub data: MetStepData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetStepData {
    pub instant: MetInstant,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetInstant {
    pub details: MetInstantDetails,
}

/// Instant values of one time step. Percentiles are only published for the
/// first part of the forecast horizon.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetInstantDetails {
    pub air_temperature: Option<f64>,
    pub air_temperature_percentile_10: Option<f64>,
    pub air_temperature_percentile_90: Option<f64>,
}

impl MetInstantDetails {
    /// Low/high temperature for the step: the 10th/90th percentiles when
    /// present, otherwise the point estimate for both.
    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        match (
            self.air_temperature_percentile_10,
            self.air_temperature_percentile_90,
        ) {
            (Some(low), Some(high)) => Some((low, high)),
            _ => self.air_temperature.map(|t| (t, t)),
        }
    }
}
