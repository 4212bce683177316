use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to encode chart figure")]
    FigureEncode(#[from] serde_json::Error),

    #[error("Failed to write chart to '{0}'")]
    ChartWrite(PathBuf, #[source] std::io::Error),
}
