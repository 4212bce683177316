use crate::cache::error::CacheError;
use crate::forecast::error::ForecastError;
use crate::profile::error::JoinError;
use crate::render::error::RenderError;
use crate::route::error::RouteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Route unavailable")]
    RouteUnavailable(#[from] RouteError),

    #[error(transparent)]
    Join(#[from] JoinError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ProfileError {
    /// True when a bucket's forecast could not be fetched.
    pub fn is_forecast_unavailable(&self) -> bool {
        matches!(
            self,
            ProfileError::Join(JoinError::ForecastUnavailable { .. })
        )
    }
}
