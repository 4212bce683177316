//! Merges aligned track geometry with forecast temperatures.
//!
//! GPS tracks are sampled far more densely than any forecast grid, so the
//! track is cut into at most `resolution` contiguous buckets and each bucket is
//! served by one forecast lookup at its midpoint. Geometry is never averaged:
//! every record keeps its own distance, elevation and timestamp.

use crate::forecast::met_client::{ForecastRequest, ForecastSource};
use crate::profile::error::JoinError;
use crate::types::combined_record::CombinedRecord;
use crate::types::track_point::AlignedPoint;
use log::debug;
use std::num::NonZeroUsize;
use std::ops::Range;

pub const DEFAULT_RESOLUTION: NonZeroUsize = match NonZeroUsize::new(24) {
    Some(n) => n,
    None => unreachable!(),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Joiner {
    resolution: NonZeroUsize,
}

impl Default for Joiner {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLUTION)
    }
}

impl Joiner {
    pub fn new(resolution: NonZeroUsize) -> Self {
        Self { resolution }
    }

    pub fn resolution(&self) -> NonZeroUsize {
        self.resolution
    }

    /// Produces one [`CombinedRecord`] per aligned point, in input order.
    ///
    /// Forecast requests are issued sequentially in bucket order. The first
    /// failing request aborts the join; no partial result is returned.
    pub async fn join<F: ForecastSource>(
        &self,
        source: &F,
        points: &[AlignedPoint],
    ) -> Result<Vec<CombinedRecord>, JoinError> {
        let buckets = bucket_ranges(points.len(), self.resolution);
        let bucket_count = buckets.len();
        let mut records = Vec::with_capacity(points.len());

        for (bucket, range) in buckets.into_iter().enumerate() {
            let representative = &points[representative_index(&range)];
            let request = ForecastRequest {
                location: representative.point.location,
                elevation_m: Some(representative.point.elevation_m),
                at: representative.aligned_timestamp,
            };
            debug!(
                "Bucket {}/{}: points {:?}, forecast at {}",
                bucket + 1,
                bucket_count,
                range,
                request.at
            );
            let sample = source.forecast(&request).await.map_err(|source| {
                JoinError::ForecastUnavailable {
                    bucket,
                    bucket_count,
                    source,
                }
            })?;

            for aligned in &points[range] {
                let record = CombinedRecord::new(
                    aligned.point.distance_m,
                    aligned.point.elevation_m,
                    aligned.aligned_timestamp,
                    sample.temp_low(),
                    sample.temp_high(),
                )
                .map_err(|source| JoinError::InvalidRecord {
                    index: aligned.point.sequence_index,
                    source,
                })?;
                records.push(record);
            }
        }

        Ok(records)
    }
}

/// Splits `len` points into `min(len, resolution)` contiguous ranges of equal
/// point count. Sizes differ by at most one; empty input gives no ranges.
pub fn bucket_ranges(len: usize, resolution: NonZeroUsize) -> Vec<Range<usize>> {
    let count = len.min(resolution.get());
    (0..count)
        .map(|i| (i * len / count)..((i + 1) * len / count))
        .collect()
}

fn representative_index(range: &Range<usize>) -> usize {
    range.start + (range.len() - 1) / 2
}
