//! Per-run memo of forecast responses, so bucket representatives that land on
//! the same truncated location share one HTTP request.

use crate::forecast::met_types::MetTimeStep;
use crate::types::track_point::LatLon;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Location key with coordinates at the 4-decimal precision met.no accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionKey {
    lat_e4: i64,
    lon_e4: i64,
    altitude_m: Option<i32>,
}

impl SessionKey {
    pub fn new(location: LatLon, altitude_m: Option<f64>) -> Self {
        Self {
            lat_e4: truncate_e4(location.0),
            lon_e4: truncate_e4(location.1),
            altitude_m: altitude_m.map(|a| a.trunc() as i32),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.lat_e4 as f64 / 1e4
    }

    pub fn longitude(&self) -> f64 {
        self.lon_e4 as f64 / 1e4
    }

    pub fn altitude_m(&self) -> Option<i32> {
        self.altitude_m
    }
}

// Snap to micro-degrees first so 61.1234 stored as 61.12339999.. keeps its last digit.
fn truncate_e4(degrees: f64) -> i64 {
    (degrees * 1e6).round() as i64 / 100
}

/// Response memo with a lifetime of one profiling run.
#[derive(Debug, Default)]
pub struct ForecastSession {
    responses: Mutex<HashMap<SessionKey, Arc<Vec<MetTimeStep>>>>,
}

impl ForecastSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &SessionKey) -> Option<Arc<Vec<MetTimeStep>>> {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    pub fn insert(&self, key: SessionKey, timeseries: Vec<MetTimeStep>) -> Arc<Vec<MetTimeStep>> {
        let shared = Arc::new(timeseries);
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key, Arc::clone(&shared));
        shared
    }

    pub fn len(&self) -> usize {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_truncates_to_four_decimals() {
        let key = SessionKey::new(LatLon(61.123_46, 10.456_79), Some(454.7));
        assert_eq!(key.latitude(), 61.1234);
        assert_eq!(key.longitude(), 10.4567);
        assert_eq!(key.altitude_m(), Some(454));

        let same_cell = SessionKey::new(LatLon(61.123_41, 10.456_70), Some(454.2));
        assert_eq!(key, same_cell);
    }

    #[test]
    fn test_key_keeps_exact_fourth_decimal() {
        let key = SessionKey::new(LatLon(61.1234, -10.4567), None);
        assert_eq!(key.latitude(), 61.1234);
        assert_eq!(key.longitude(), -10.4567);
        assert_eq!(key.altitude_m(), None);
    }

    #[test]
    fn test_insert_then_get() {
        let session = ForecastSession::new();
        let key = SessionKey::new(LatLon(61.0, 10.0), None);
        assert!(session.get(&key).is_none());
        session.insert(key, Vec::new());
        assert!(session.get(&key).is_some());
        assert_eq!(session.len(), 1);
    }
}
