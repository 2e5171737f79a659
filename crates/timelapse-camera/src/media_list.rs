//! Camera media index (`/gp/gpMediaList`).
//!
//! The camera groups captures by DCIM directory:
//!
//! ```json
//! { "media": [ { "d": "100GOPRO", "fs": [ { "n": "GOPR0001.JPG" } ] } ] }
//! ```
//!
//! Fields not used here (sizes, modification times) are ignored.

use serde::Deserialize;
use timelapse_core::MediaReference;

use crate::error::{CameraError, CameraResult};

#[derive(Debug, Clone, Deserialize)]
pub struct MediaList {
    pub media: Vec<MediaDirectory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaDirectory {
    #[serde(rename = "d")]
    pub directory: String,
    #[serde(rename = "fs")]
    pub files: Vec<MediaFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaFile {
    #[serde(rename = "n")]
    pub name: String,
}

impl MediaList {
    pub fn parse(body: &[u8]) -> CameraResult<Self> {
        serde_json::from_slice(body).map_err(|e| CameraError::InvalidMediaList(e.to_string()))
    }

    /// Last file of the last directory.
    pub fn latest(&self) -> CameraResult<MediaReference> {
        let directory = self
            .media
            .last()
            .ok_or_else(|| CameraError::InvalidMediaList("media list is empty".to_string()))?;

        let file = directory.files.last().ok_or_else(|| {
            CameraError::InvalidMediaList(format!(
                "directory {} contains no files",
                directory.directory
            ))
        })?;

        Ok(MediaReference::new(&directory.directory, &file.name))
    }
}
