//! Timelapse Worker
//!
//! Wires the camera client, the timestamp compositor and the archive into a
//! single periodic job. A run is:
//!
//! 1. power on the camera and trigger the shutter;
//! 2. find the newest capture in the camera's media list;
//! 3. stamp the current local time onto it;
//! 4. upload it under the next sequential six-digit key;
//! 5. delete the capture from the camera.
//!
//! Any failure ends the process. Only one run is ever in flight.

pub mod lease;
pub mod pipeline;
pub mod scheduler;

pub use lease::{RunGuard, RunLease, RunState};
pub use pipeline::{Orchestrator, RunOutcome};
pub use scheduler::Scheduler;
