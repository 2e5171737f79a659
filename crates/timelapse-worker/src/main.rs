use anyhow::Context;
use std::sync::Arc;
use timelapse_camera::CameraClient;
use timelapse_core::Config;
use timelapse_infra::{init_telemetry, shutdown_telemetry};
use timelapse_processing::{BitmapFont, TimestampCompositor};
use timelapse_storage::{Archiver, S3Storage};
use timelapse_worker::{Orchestrator, Scheduler};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    init_telemetry(config.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::info!(
        bucket = %config.bucket,
        camera_host = %config.camera_host,
        interval_secs = config.interval_secs,
        aws_region = %config.aws_region,
        "Starting timelapse worker"
    );

    let camera = CameraClient::from_config(&config).context("Failed to build camera client")?;
    let compositor =
        TimestampCompositor::new(BitmapFont::default()).context("Failed to build compositor")?;
    let storage = S3Storage::from_config(&config)
        .await
        .context("Failed to initialize S3 storage")?;

    let orchestrator = Arc::new(Orchestrator::new(
        Arc::new(camera),
        Arc::new(compositor),
        Archiver::new(Arc::new(storage)),
    ));

    let result = Scheduler::new(orchestrator, config.interval())
        .run(shutdown_signal())
        .await;

    shutdown_telemetry().await;

    result.context("Timelapse worker stopped")
}

/// Resolves on Ctrl+C (SIGINT) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal");
        },
    }
}
