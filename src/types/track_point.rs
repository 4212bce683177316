//! Track geometry as delivered by a [`crate::RouteSource`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use birken_temp::LatLon;
///
/// let lillehammer = LatLon(61.1153, 10.4662);
/// assert_eq!(lillehammer.0, 61.1153); // Latitude
/// assert_eq!(lillehammer.1, 10.4662); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }
}

/// One GPS sample along the race route.
///
/// `distance_m` is the cumulative distance from the first point of the route and
/// never decreases along a well-formed track.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    /// Position of the point in the route's document order, starting at 0.
    pub sequence_index: usize,
    /// Timestamp as recorded in the route file, before alignment.
    pub original_timestamp: DateTime<Utc>,
    pub distance_m: f64,
    pub elevation_m: f64,
    pub location: LatLon,
}

/// A [`TrackPoint`] paired with its timestamp shifted onto the race start.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPoint {
    pub point: TrackPoint,
    pub aligned_timestamp: DateTime<Utc>,
}
