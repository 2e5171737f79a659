//! Storage abstraction trait
//!
//! This module defines the ArchiveStorage trait that storage backends implement.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use thiserror::Error;
use timelapse_core::PipelineError;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("List failed: {0}")]
    ListFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Archive counter exhausted: {0} is the last six-digit name")]
    CounterExhausted(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for PipelineError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidKey(_) => PipelineError::Parse(err.to_string()),
            _ => PipelineError::Storage(err.to_string()),
        }
    }
}

/// One entry of a bucket listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    pub key: String,
    pub last_modified: DateTime<Utc>,
}

impl ObjectSummary {
    pub fn new(key: impl Into<String>, last_modified: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            last_modified,
        }
    }
}

/// Storage abstraction trait
///
/// The archive only needs two operations from a backend: enumerate what is
/// already stored and write one new object.
#[async_trait]
pub trait ArchiveStorage: Send + Sync {
    /// List every object in the bucket, across all pages
    async fn list_objects(&self) -> StorageResult<Vec<ObjectSummary>>;

    /// Write `data` under `key` in a single request
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<()>;

    /// Bucket (or equivalent) name, for logging
    fn bucket(&self) -> &str;
}
