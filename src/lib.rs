mod cache;
mod error;
mod forecast;
mod profile;
mod profiler;
mod render;
mod route;
mod types;
mod utils;

pub use error::ProfileError;
pub use profiler::*;

pub use cache::cache_gateway::CacheGateway;
pub use cache::error::CacheError;

pub use forecast::error::ForecastError;
pub use forecast::met_client::{
    select_sample, ForecastRequest, ForecastSource, MetForecastSource,
};
pub use forecast::met_types::{
    MetInstant, MetInstantDetails, MetProperties, MetResponse, MetStepData, MetTimeStep,
};
pub use forecast::session::{ForecastSession, SessionKey};

pub use profile::error::JoinError;
pub use profile::joiner::{bucket_ranges, Joiner, DEFAULT_RESOLUTION};
pub use profile::time_aligner::{align, route_span};

pub use render::chart::{build_figure, render_html, render_to_file, DEFAULT_CHART_FILE};
pub use render::error::RenderError;

pub use route::birken_route::{parse_gpx_track, BirkenRouteSource, RouteSource};
pub use route::error::RouteError;

pub use types::combined_record::CombinedRecord;
pub use types::error::RecordError;
pub use types::forecast_sample::ForecastSample;
pub use types::into_utc_trait::{parse_start_time, IntoUtcDateTime, StartTimeError};
pub use types::race::{RaceError, RaceKey, RaceParameters, RaceType};
pub use types::track_point::{AlignedPoint, LatLon, TrackPoint};
