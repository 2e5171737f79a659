//! Timelapse Infrastructure Library
//!
//! Shared process-level plumbing for the worker binary: tracing initialisation.

pub mod telemetry;

pub use telemetry::{init_telemetry, shutdown_telemetry};
