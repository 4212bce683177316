//! [`ForecastSource`] implementation for the met.no Locationforecast API.

use crate::forecast::error::ForecastError;
use crate::forecast::met_types::{MetResponse, MetTimeStep};
use crate::forecast::session::{ForecastSession, SessionKey};
use crate::types::forecast_sample::ForecastSample;
use crate::types::track_point::LatLon;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

const MET_URL: &str = "https://api.met.no";
const LOCATIONFORECAST_PATH: &str = "/weatherapi/locationforecast/2.0/complete";
// met.no rejects requests without an identifying User-Agent.
const USER_AGENT: &str = concat!("birken-temp/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// What the profile core asks a [`ForecastSource`] for.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub location: LatLon,
    /// Ground elevation at the location, used by met.no for height correction.
    pub elevation_m: Option<f64>,
    pub at: DateTime<Utc>,
}

/// Supplies a temperature range for a place and time.
#[allow(async_fn_in_trait)]
pub trait ForecastSource {
    async fn forecast(&self, request: &ForecastRequest) -> Result<ForecastSample, ForecastError>;
}

impl<T: ForecastSource> ForecastSource for &T {
    async fn forecast(&self, request: &ForecastRequest) -> Result<ForecastSample, ForecastError> {
        (**self).forecast(request).await
    }
}

/// met.no client holding the [`ForecastSession`] of the current run.
pub struct MetForecastSource {
    base_url: String,
    client: Client,
    session: ForecastSession,
}

impl MetForecastSource {
    pub fn new() -> Result<Self, ForecastError> {
        Self::with_base_url(MET_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ForecastError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ForecastError::ClientBuild)?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            session: ForecastSession::new(),
        })
    }

    pub fn session(&self) -> &ForecastSession {
        &self.session
    }

    async fn timeseries(&self, key: SessionKey) -> Result<Arc<Vec<MetTimeStep>>, ForecastError> {
        if let Some(cached) = self.session.get(&key) {
            debug!(
                "Session hit for forecast at {:.4},{:.4}",
                key.latitude(),
                key.longitude()
            );
            return Ok(cached);
        }
        let response = self.download(&key).await?;
        Ok(self.session.insert(key, response.properties.timeseries))
    }

    async fn download(&self, key: &SessionKey) -> Result<MetResponse, ForecastError> {
        let url = format!("{}{}", self.base_url, LOCATIONFORECAST_PATH);
        let mut query = vec![
            ("lat", format!("{:.4}", key.latitude())),
            ("lon", format!("{:.4}", key.longitude())),
        ];
        if let Some(altitude) = key.altitude_m() {
            query.push(("altitude", altitude.to_string()));
        }
        info!(
            "Requesting forecast for {:.4},{:.4} from {}",
            key.latitude(),
            key.longitude(),
            url
        );

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| ForecastError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    ForecastError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    ForecastError::NetworkRequest(url, e)
                });
            }
        };

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ForecastError::NetworkRequest(url.clone(), e))?;
        serde_json::from_slice::<MetResponse>(&bytes)
            .map_err(|source| ForecastError::JsonParse { url, source })
    }
}

impl ForecastSource for MetForecastSource {
    async fn forecast(&self, request: &ForecastRequest) -> Result<ForecastSample, ForecastError> {
        let key = SessionKey::new(request.location, request.elevation_m);
        let timeseries = self.timeseries(key).await?;
        select_sample(&timeseries, request.location, request.at)
    }
}

/// Picks the time step closest to `at`; on a tie the earlier step wins.
pub fn select_sample(
    timeseries: &[MetTimeStep],
    location: LatLon,
    at: DateTime<Utc>,
) -> Result<ForecastSample, ForecastError> {
    let step = timeseries
        .iter()
        .min_by_key(|step| (step.time - at).abs())
        .ok_or(ForecastError::EmptyTimeseries)?;
    let (low, high) = step
        .data
        .instant
        .details
        .temperature_range()
        .ok_or(ForecastError::MissingTemperature(step.time))?;
    Ok(ForecastSample::new(step.time, location, low, high)?)
}
