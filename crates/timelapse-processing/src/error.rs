use thiserror::Error;
use timelapse_core::PipelineError;

/// Overlay step errors
#[derive(Debug, Error)]
pub enum CompositeError {
    #[error("Failed to fetch image: {0}")]
    Fetch(String),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Font has no glyph for {0:?}")]
    UnsupportedGlyph(char),

    #[error("Image worker failed: {0}")]
    Worker(String),
}

pub type CompositeResult<T> = Result<T, CompositeError>;

impl From<CompositeError> for PipelineError {
    fn from(err: CompositeError) -> Self {
        PipelineError::Composite(err.to_string())
    }
}
