use std::path::PathBuf;
use thiserror::Error;

/// Failures at the data-loading boundary. The layout engine itself never fails;
/// it only ever receives a payload that parsed successfully.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Failed to read graph payload {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid graph payload: {0}")]
    Json(#[from] serde_json::Error),
}
