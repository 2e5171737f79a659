use thiserror::Error;
use timelapse_core::PipelineError;

/// Camera operation errors
#[derive(Debug, Error)]
pub enum CameraError {
    #[error("{endpoint} returned HTTP {status}")]
    UnexpectedStatus { endpoint: &'static str, status: u16 },

    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid media list: {0}")]
    InvalidMediaList(String),
}

/// Result type for camera operations
pub type CameraResult<T> = Result<T, CameraError>;

impl From<CameraError> for PipelineError {
    fn from(err: CameraError) -> Self {
        match err {
            CameraError::InvalidMediaList(_) => PipelineError::Parse(err.to_string()),
            CameraError::UnexpectedStatus { .. } | CameraError::Transport { .. } => {
                PipelineError::CameraUnavailable(err.to_string())
            }
        }
    }
}
