//! Error types module
//!
//! Every failure in a run collapses into one of four [`PipelineError`]
//! categories. Leaf crates keep their own error enums and convert into this one
//! at the crate boundary, so the orchestrator only ever reasons about the
//! taxonomy below.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected conditions
    Debug,
    /// Warning level - for degraded but tolerable conditions
    Warn,
    /// Error level - for failures that end a run
    Error,
}

/// Metadata describing how an error should be reported and handled
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "CAMERA_UNAVAILABLE")
    fn error_code(&self) -> &'static str;

    /// Whether the process may keep scheduling runs after this error.
    ///
    /// A non-recoverable error is fatal: the caller is expected to stop the
    /// scheduler and terminate the process.
    fn is_recoverable(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Composite error: {0}")]
    Composite(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

impl PipelineError {
    /// True when this error must end the process rather than just the run.
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }
}

fn pipeline_error_static_metadata(err: &PipelineError) -> (&'static str, bool, LogLevel) {
    match err {
        PipelineError::CameraUnavailable(_) => ("CAMERA_UNAVAILABLE", false, LogLevel::Error),
        PipelineError::Storage(_) => ("STORAGE_ERROR", false, LogLevel::Error),
        PipelineError::Composite(_) => ("COMPOSITE_ERROR", false, LogLevel::Error),
        PipelineError::Parse(_) => ("PARSE_ERROR", false, LogLevel::Error),
    }
}

impl ErrorMetadata for PipelineError {
    fn error_code(&self) -> &'static str {
        pipeline_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        pipeline_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        pipeline_error_static_metadata(self).2
    }
}
