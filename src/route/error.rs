use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse GPX route: {0}")]
    GpxParse(String),

    #[error("Track point {index} has an unreadable timestamp: {message}")]
    InvalidTimestamp { index: usize, message: String },

    #[error("Track point {index} has no elevation")]
    MissingElevation { index: usize },

    #[error("Route contains no timestamped track points")]
    EmptyTrack,
}
