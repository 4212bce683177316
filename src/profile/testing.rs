use crate::forecast::error::ForecastError;
use crate::forecast::met_client::{ForecastRequest, ForecastSource};
use crate::route::birken_route::RouteSource;
use crate::route::error::RouteError;
use crate::types::forecast_sample::ForecastSample;
use crate::types::race::{RaceParameters, RaceType};
use crate::types::track_point::{AlignedPoint, LatLon, TrackPoint};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Mutex;

/// In-memory forecast source that records every request. Call `n` (zero based)
/// answers `(-n - 2, -n)`, or fails when `n` is the configured failing call.
#[derive(Default)]
pub(crate) struct ScriptedForecast {
    pub(crate) fail_on_call: Option<usize>,
    pub(crate) requests: Mutex<Vec<ForecastRequest>>,
}

impl ScriptedForecast {
    pub(crate) fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl ForecastSource for ScriptedForecast {
    async fn forecast(&self, request: &ForecastRequest) -> Result<ForecastSample, ForecastError> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };
        if self.fail_on_call == Some(call) {
            return Err(ForecastError::EmptyTimeseries);
        }
        let high = -(call as f64);
        Ok(ForecastSample::new(request.at, request.location, high - 2.0, high)?)
    }
}

pub(crate) fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 16, 8, 0, 0).unwrap()
}

/// A straight northbound track, one point per minute and 50 m apart.
pub(crate) fn track(len: usize) -> Vec<TrackPoint> {
    let t0 = Utc.with_ymd_and_hms(2023, 3, 18, 0, 0, 0).unwrap();
    (0..len)
        .map(|i| TrackPoint {
            sequence_index: i,
            original_timestamp: t0 + Duration::minutes(i as i64),
            distance_m: i as f64 * 50.0,
            elevation_m: 250.0 + (i % 17) as f64 * 12.5,
            location: LatLon(61.0 + i as f64 * 0.00045, 11.0),
        })
        .collect()
}

pub(crate) fn aligned_track(len: usize) -> Vec<AlignedPoint> {
    crate::profile::time_aligner::align(track(len), start_time())
}

/// Route source serving a fixed track, or failing when `track` is `None`.
pub(crate) struct StaticRoute {
    pub(crate) track: Option<Vec<TrackPoint>>,
    pub(crate) calls: Mutex<usize>,
}

impl StaticRoute {
    pub(crate) fn new(track: Vec<TrackPoint>) -> Self {
        Self {
            track: Some(track),
            calls: Mutex::new(0),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            track: None,
            calls: Mutex::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl RouteSource for StaticRoute {
    async fn fetch_track(&self, _race: &RaceParameters) -> Result<Vec<TrackPoint>, RouteError> {
        *self.calls.lock().unwrap() += 1;
        self.track.clone().ok_or(RouteError::EmptyTrack)
    }
}

pub(crate) fn race_parameters() -> RaceParameters {
    RaceParameters::new(RaceType::Rennet, start_time(), Duration::hours(4)).unwrap()
}
