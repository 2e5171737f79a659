use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use timelapse_core::{PipelineError, PipelineResult};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::pipeline::{Orchestrator, RunOutcome};

/// Fires a run every `period` until shutdown or the first fatal error.
///
/// The first run starts one full period after [`Scheduler::run`] is called.
/// Each tick spawns [`Orchestrator::run_once`]; ticks that land while a run is
/// still in flight are dropped by the run guard, never queued.
pub struct Scheduler {
    orchestrator: Arc<Orchestrator>,
    period: Duration,
}

impl Scheduler {
    pub fn new(orchestrator: Arc<Orchestrator>, period: Duration) -> Self {
        Self {
            orchestrator,
            period,
        }
    }

    /// Returns `Ok(())` once `shutdown` resolves, or the first fatal run error.
    pub async fn run<F>(self, shutdown: F) -> PipelineResult<()>
    where
        F: Future<Output = ()>,
    {
        let (fatal_tx, mut fatal_rx) = mpsc::channel::<PipelineError>(1);

        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            interval_secs = self.period.as_secs_f64(),
            "Scheduler started"
        );

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Scheduler stopping");
                    return Ok(());
                }
                Some(err) = fatal_rx.recv() => {
                    tracing::error!(error = %err, "Fatal error, stopping scheduler");
                    return Err(err);
                }
                _ = ticker.tick() => {
                    let orchestrator = self.orchestrator.clone();
                    let fatal_tx = fatal_tx.clone();
                    tokio::spawn(async move {
                        match orchestrator.run_once().await {
                            Ok(RunOutcome::Completed { .. }) | Ok(RunOutcome::Skipped) => {}
                            Err(e) if e.is_fatal() => {
                                let _ = fatal_tx.send(e).await;
                            }
                            Err(e) => {
                                tracing::warn!(error = %e, "Run failed, waiting for next tick");
                            }
                        }
                    });
                }
            }
        }
    }
}
