//! One capture-to-archive run.

use std::sync::Arc;
use timelapse_camera::CameraControl;
use timelapse_core::{ArchiveFilename, ErrorMetadata, PipelineResult, Timestamp};
use timelapse_processing::Compositor;
use timelapse_storage::Archiver;
use tracing::Instrument;
use uuid::Uuid;

use crate::lease::{RunGuard, RunState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The frame was archived and removed from the camera.
    Completed { filename: ArchiveFilename },
    /// Another run held the lease; nothing was done.
    Skipped,
}

/// Drives the camera, compositor and archive through one run at a time.
pub struct Orchestrator {
    camera: Arc<dyn CameraControl>,
    compositor: Arc<dyn Compositor>,
    archiver: Archiver,
    guard: RunGuard,
}

impl Orchestrator {
    pub fn new(
        camera: Arc<dyn CameraControl>,
        compositor: Arc<dyn Compositor>,
        archiver: Archiver,
    ) -> Self {
        Self {
            camera,
            compositor,
            archiver,
            guard: RunGuard::new(),
        }
    }

    pub fn guard(&self) -> &RunGuard {
        &self.guard
    }

    pub fn state(&self) -> RunState {
        self.guard.state()
    }

    /// Perform one run unless another is still in flight.
    ///
    /// A fatal error leaves the guard terminated, so every later call returns
    /// [`RunOutcome::Skipped`].
    pub async fn run_once(&self) -> PipelineResult<RunOutcome> {
        let Some(lease) = self.guard.try_acquire() else {
            tracing::debug!(state = ?self.guard.state(), "Run in progress, dropping tick");
            return Ok(RunOutcome::Skipped);
        };

        let span = tracing::info_span!("run", run_id = %Uuid::new_v4());
        let start = std::time::Instant::now();

        match self.execute().instrument(span.clone()).await {
            Ok(filename) => {
                lease.release();
                span.in_scope(|| {
                    tracing::info!(
                        key = %filename,
                        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                        "Done!"
                    )
                });
                Ok(RunOutcome::Completed { filename })
            }
            Err(e) => {
                if e.is_fatal() {
                    lease.terminate();
                } else {
                    lease.release();
                }
                span.in_scope(|| {
                    tracing::error!(
                        error = %e,
                        error_code = e.error_code(),
                        fatal = e.is_fatal(),
                        "Run failed"
                    )
                });
                Err(e)
            }
        }
    }

    async fn execute(&self) -> PipelineResult<ArchiveFilename> {
        self.camera.initialize().await?;
        self.camera.trigger_shutter().await?;

        let media = self.camera.locate_latest_media().await?;
        let url = self.camera.media_url(&media);

        let image = self.compositor.composite(&url, &Timestamp::now()).await?;

        let filename = self.archiver.next_filename().await?;
        self.archiver.upload(image, filename).await?;

        self.camera.delete_latest_capture().await?;
        Ok(filename)
    }
}
