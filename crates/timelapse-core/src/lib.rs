//! Timelapse Core Library
//!
//! This crate provides the domain values, error taxonomy and configuration
//! shared by the camera, processing, storage and worker crates.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, LogFormat};
pub use error::{ErrorMetadata, LogLevel, PipelineError, PipelineResult};
pub use models::{ArchiveFilename, CompositeImage, MediaReference, Timestamp};
