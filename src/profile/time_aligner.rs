//! Moves a recorded track onto the race start time.

use crate::types::track_point::{AlignedPoint, TrackPoint};
use chrono::{DateTime, Duration, Utc};

/// Translates every timestamp so the first point lands exactly on `start_time`.
///
/// Gaps between points are preserved; the track is neither rescaled nor
/// reordered, so a non-monotonic input stays non-monotonic.
pub fn align(track: Vec<TrackPoint>, start_time: DateTime<Utc>) -> Vec<AlignedPoint> {
    let Some(origin) = track.first().map(|p| p.original_timestamp) else {
        return Vec::new();
    };
    track
        .into_iter()
        .map(|point| {
            let aligned_timestamp = start_time + (point.original_timestamp - origin);
            AlignedPoint {
                point,
                aligned_timestamp,
            }
        })
        .collect()
}

/// Elapsed time between the first and last recorded point.
pub fn route_span(track: &[TrackPoint]) -> Option<Duration> {
    match (track.first(), track.last()) {
        (Some(first), Some(last)) => Some(last.original_timestamp - first.original_timestamp),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::track_point::LatLon;
    use chrono::TimeZone;

    fn point(index: usize, timestamp: DateTime<Utc>) -> TrackPoint {
        TrackPoint {
            sequence_index: index,
            original_timestamp: timestamp,
            distance_m: index as f64 * 100.0,
            elevation_m: 300.0,
            location: LatLon(61.0, 11.0),
        }
    }

    #[test]
    fn test_align_three_points() {
        let t0 = Utc.with_ymd_and_hms(2019, 6, 1, 0, 0, 0).unwrap();
        let track = vec![
            point(0, t0),
            point(1, t0 + Duration::minutes(10)),
            point(2, t0 + Duration::minutes(25)),
        ];
        let start = Utc.with_ymd_and_hms(2024, 3, 16, 8, 0, 0).unwrap();

        let aligned = align(track, start);
        let stamps: Vec<_> = aligned.iter().map(|p| p.aligned_timestamp).collect();
        assert_eq!(
            stamps,
            vec![
                start,
                start + Duration::minutes(10),
                start + Duration::minutes(25)
            ]
        );
    }

    #[test]
    fn test_align_preserves_gaps_and_points() {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 16, 0, 0, 0).unwrap();
        let offsets = [0, 7, 7, 61, 3600, 3601, 9000];
        let track: Vec<_> = offsets
            .iter()
            .enumerate()
            .map(|(i, s)| point(i, t0 + Duration::seconds(*s)))
            .collect();
        let start = Utc.with_ymd_and_hms(2024, 3, 16, 9, 15, 30).unwrap();

        let aligned = align(track.clone(), start);
        assert_eq!(aligned.len(), track.len());
        assert_eq!(aligned[0].aligned_timestamp, start);
        for i in 1..track.len() {
            assert_eq!(
                aligned[i].aligned_timestamp - aligned[i - 1].aligned_timestamp,
                track[i].original_timestamp - track[i - 1].original_timestamp
            );
            assert_eq!(aligned[i].point, track[i]);
        }
    }

    #[test]
    fn test_align_empty() {
        let start = Utc.with_ymd_and_hms(2024, 3, 16, 8, 0, 0).unwrap();
        assert!(align(Vec::new(), start).is_empty());
        assert_eq!(route_span(&[]), None);
    }

    #[test]
    fn test_align_keeps_non_monotonic_order() {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 16, 0, 30, 0).unwrap();
        let track = vec![point(0, t0), point(1, t0 - Duration::minutes(5))];
        let start = Utc.with_ymd_and_hms(2024, 3, 16, 8, 0, 0).unwrap();

        let aligned = align(track, start);
        assert_eq!(aligned[1].aligned_timestamp, start - Duration::minutes(5));
    }

    #[test]
    fn test_route_span() {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 16, 0, 0, 0).unwrap();
        let track = vec![point(0, t0), point(1, t0 + Duration::hours(4))];
        assert_eq!(route_span(&track), Some(Duration::hours(4)));
    }
}
