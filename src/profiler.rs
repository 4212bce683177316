//! This module provides the main entry point of the profiler: it wires a route
//! source, a forecast source and the profile cache into one run.

use crate::cache::cache_gateway::CacheGateway;
use crate::error::ProfileError;
use crate::forecast::met_client::ForecastSource;
use crate::profile::joiner::{Joiner, DEFAULT_RESOLUTION};
use crate::profile::time_aligner::{align, route_span};
use crate::route::birken_route::RouteSource;
use crate::types::combined_record::CombinedRecord;
use crate::types::race::RaceParameters;
use bon::bon;
use chrono::Duration;
use log::{info, warn};
use std::num::NonZeroUsize;

/// Track spans further than this from the requested race duration are logged.
const SPAN_TOLERANCE_MINUTES: i64 = 5;

/// Where the records of a [`Profile`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileOrigin {
    Cache,
    Fresh,
}

/// The result of one profiling run.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub records: Vec<CombinedRecord>,
    pub origin: ProfileOrigin,
}

/// Runs the fetch, align, join and cache pipeline for a race.
///
/// Create one through [`Profiler::builder()`]; only the two sources and the
/// cache are required.
///
/// # Examples
///
/// ```no_run
/// # use birken_temp::{BirkenRouteSource, CacheGateway, MetForecastSource, Profiler, ProfileError};
/// # use birken_temp::{RaceParameters, RaceType};
/// # use chrono::{Duration, TimeZone, Utc};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let profiler = Profiler::builder()
///     .route_source(BirkenRouteSource::new())
///     .forecast_source(MetForecastSource::new()?)
///     .cache(CacheGateway::new()?)
///     .build();
///
/// let start = Utc.with_ymd_and_hms(2024, 3, 16, 7, 0, 0).unwrap();
/// let race = RaceParameters::new(RaceType::Rennet, start, Duration::hours(4))?;
/// let profile = profiler.run().race(&race).call().await?;
/// println!("{} points", profile.records.len());
/// # Ok(())
/// # }
/// ```
pub struct Profiler<R, F> {
    route_source: R,
    forecast_source: F,
    cache: CacheGateway,
    joiner: Joiner,
}

#[bon]
impl<R: RouteSource, F: ForecastSource> Profiler<R, F> {
    #[builder]
    pub fn new(
        route_source: R,
        forecast_source: F,
        cache: CacheGateway,
        resolution: Option<NonZeroUsize>,
    ) -> Self {
        Self {
            route_source,
            forecast_source,
            cache,
            joiner: Joiner::new(resolution.unwrap_or(DEFAULT_RESOLUTION)),
        }
    }

    pub fn cache(&self) -> &CacheGateway {
        &self.cache
    }

    pub fn route_source(&self) -> &R {
        &self.route_source
    }

    pub fn forecast_source(&self) -> &F {
        &self.forecast_source
    }

    /// Produces the temperature profile for `race`.
    ///
    /// Unless `.fresh(true)` is set, a cached profile for the same race
    /// parameters is returned without touching either source. A freshly
    /// computed profile is stored only after every forecast lookup succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::RouteUnavailable`] if the route cannot be fetched,
    /// [`ProfileError::Join`] if any bucket's forecast fails, and
    /// [`ProfileError::Cache`] if the finished profile cannot be written.
    #[builder]
    pub async fn run(
        &self,
        race: &RaceParameters,
        fresh: Option<bool>,
    ) -> Result<Profile, ProfileError> {
        if !fresh.unwrap_or(false) {
            if let Some(records) = self.cache.load(race).await {
                return Ok(Profile {
                    records,
                    origin: ProfileOrigin::Cache,
                });
            }
        }

        let track = self.route_source.fetch_track(race).await?;
        if let Some(span) = route_span(&track) {
            let deviation = (span - race.total_duration()).abs();
            if deviation > Duration::minutes(SPAN_TOLERANCE_MINUTES) {
                warn!(
                    "Route spans {} min but the race duration is {} min; keeping the route's own spacing",
                    span.num_minutes(),
                    race.total_duration().num_minutes()
                );
            }
        }

        let aligned = align(track, race.start_time());
        info!(
            "Joining {} points with at most {} forecast lookups",
            aligned.len(),
            self.joiner.resolution()
        );
        let records = self.joiner.join(&self.forecast_source, &aligned).await?;

        self.cache.store(race, &records).await?;
        Ok(Profile {
            records,
            origin: ProfileOrigin::Fresh,
        })
    }
}
