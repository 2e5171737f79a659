use bytes::Bytes;
use std::sync::Arc;
use timelapse_core::{ArchiveFilename, CompositeImage};

use crate::naming::next_archive_filename;
use crate::traits::{ArchiveStorage, StorageResult};

/// Names and writes archived frames in a single bucket.
#[derive(Clone)]
pub struct Archiver {
    storage: Arc<dyn ArchiveStorage>,
}

impl Archiver {
    pub fn new(storage: Arc<dyn ArchiveStorage>) -> Self {
        Self { storage }
    }

    pub fn bucket(&self) -> &str {
        self.storage.bucket()
    }

    /// Derive the next sequential key from the current bucket contents.
    pub async fn next_filename(&self) -> StorageResult<ArchiveFilename> {
        let objects = self
            .storage
            .list_objects()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error listing archive."))?;

        let filename = next_archive_filename(&objects)
            .inspect_err(|e| tracing::error!(error = %e, "Unable to derive archive filename"))?;

        tracing::debug!(
            bucket = %self.bucket(),
            existing = objects.len(),
            key = %filename,
            "Next archive filename"
        );
        Ok(filename)
    }

    /// Upload `image` under `filename`.
    pub async fn upload(
        &self,
        image: CompositeImage,
        filename: ArchiveFilename,
    ) -> StorageResult<()> {
        let key = filename.to_string();
        self.storage
            .put_object(&key, Bytes::from(image.into_bytes()), CompositeImage::CONTENT_TYPE)
            .await
            .inspect_err(|e| tracing::error!(error = %e, key = %key, "Error uploading picture."))
    }

    /// Name the frame and upload it, returning the key it was stored under.
    pub async fn archive(&self, image: CompositeImage) -> StorageResult<ArchiveFilename> {
        let filename = self.next_filename().await?;
        self.upload(image, filename).await?;
        Ok(filename)
    }
}
