//! Fetches race routes from the Birkebeiner split tracker and turns the GPX
//! payload into [`TrackPoint`]s with cumulative distance.

use crate::route::error::RouteError;
use crate::types::race::RaceParameters;
use crate::types::track_point::{LatLon, TrackPoint};
use chrono::{DateTime, Utc};
use haversine::{distance, Location as HaversineLocation, Units};
use log::{debug, info, warn};
use reqwest::Client;
use std::io::Cursor;

const TRACKER_URL: &str = "http://tracker.birkebeiner.no";
const ROUTE_PATH: &str = "/splitLive/dumpRoute.php";

/// Supplies the ordered track of a race.
///
/// Implementations own the transport; the profile core only sees the points.
#[allow(async_fn_in_trait)]
pub trait RouteSource {
    async fn fetch_track(&self, race: &RaceParameters) -> Result<Vec<TrackPoint>, RouteError>;
}

impl<T: RouteSource> RouteSource for &T {
    async fn fetch_track(&self, race: &RaceParameters) -> Result<Vec<TrackPoint>, RouteError> {
        (**self).fetch_track(race).await
    }
}

/// [`RouteSource`] backed by the Birkebeiner tracker's route dump.
///
/// The tracker scales the route's timestamps to the requested finishing time,
/// so the returned track already spans roughly `total_duration`.
pub struct BirkenRouteSource {
    base_url: String,
    client: Client,
}

impl BirkenRouteSource {
    pub fn new() -> Self {
        Self::with_base_url(TRACKER_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    async fn download(&self, race: &RaceParameters) -> Result<String, RouteError> {
        let url = format!("{}{}", self.base_url, ROUTE_PATH);
        let query = [
            ("project", race.race_type().project_name().to_string()),
            ("sluttid", race.total_duration().num_seconds().to_string()),
            ("fileFormat", "gpx".to_string()),
        ];
        info!("Downloading {} route from {}", race.race_type(), url);

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| RouteError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    RouteError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    RouteError::NetworkRequest(url, e)
                });
            }
        };

        response
            .text()
            .await
            .map_err(|e| RouteError::NetworkRequest(url, e))
    }
}

impl Default for BirkenRouteSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteSource for BirkenRouteSource {
    async fn fetch_track(&self, race: &RaceParameters) -> Result<Vec<TrackPoint>, RouteError> {
        let body = self.download(race).await?;
        let track = parse_gpx_track(&body)?;
        info!("Parsed {} track points", track.len());
        Ok(track)
    }
}

/// Parses every track segment of a GPX document, in document order.
///
/// Points without a timestamp are skipped. Distance accumulates across
/// segment boundaries.
pub fn parse_gpx_track(input: &str) -> Result<Vec<TrackPoint>, RouteError> {
    let gpx = gpx::read(Cursor::new(input.as_bytes()))
        .map_err(|e| RouteError::GpxParse(e.to_string()))?;

    let mut out: Vec<TrackPoint> = Vec::new();
    let mut cumulative_m = 0.0;
    let mut last: Option<LatLon> = None;
    let mut raw_index = 0usize;

    for track in gpx.tracks {
        for segment in track.segments {
            for point in segment.points {
                let index = raw_index;
                raw_index += 1;

                let Some(time) = point.time else {
                    debug!("Skipping track point {} without timestamp", index);
                    continue;
                };
                let iso = time.format().map_err(|e| RouteError::InvalidTimestamp {
                    index,
                    message: e.to_string(),
                })?;
                let timestamp = DateTime::parse_from_rfc3339(&iso)
                    .map_err(|e| RouteError::InvalidTimestamp {
                        index,
                        message: e.to_string(),
                    })?
                    .with_timezone(&Utc);
                let elevation_m = point
                    .elevation
                    .ok_or(RouteError::MissingElevation { index })?;

                let geo = point.point();
                let location = LatLon(geo.y(), geo.x());
                if let Some(previous) = last {
                    cumulative_m += haversine_m(previous, location);
                }
                last = Some(location);

                out.push(TrackPoint {
                    sequence_index: out.len(),
                    original_timestamp: timestamp,
                    distance_m: cumulative_m,
                    elevation_m,
                    location,
                });
            }
        }
    }

    if out.is_empty() {
        return Err(RouteError::EmptyTrack);
    }
    Ok(out)
}

fn haversine_m(from: LatLon, to: LatLon) -> f64 {
    let km = distance(
        HaversineLocation {
            latitude: from.0,
            longitude: from.1,
        },
        HaversineLocation {
            latitude: to.0,
            longitude: to.1,
        },
        Units::Kilometers,
    );
    km * 1000.0
}
