//! Camera control abstraction
//!
//! The orchestrator only talks to the camera through this trait so that runs
//! can be exercised against fakes.

use async_trait::async_trait;
use timelapse_core::MediaReference;

use crate::error::CameraResult;

#[async_trait]
pub trait CameraControl: Send + Sync {
    /// Wake the camera and switch it to capture mode
    async fn initialize(&self) -> CameraResult<()>;

    /// Take a single picture
    async fn trigger_shutter(&self) -> CameraResult<()>;

    /// Find the newest capture, trusting the camera's newest-last ordering
    async fn locate_latest_media(&self) -> CameraResult<MediaReference>;

    /// Delete the newest capture from the camera's card
    async fn delete_latest_capture(&self) -> CameraResult<()>;

    /// URL the raw capture can be fetched from
    fn media_url(&self, media: &MediaReference) -> String;
}
