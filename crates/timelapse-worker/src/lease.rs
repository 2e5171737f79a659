//! Overlap guard for pipeline runs.
//!
//! A [`RunGuard`] hands out at most one [`RunLease`] at a time. The lease
//! ends in one of two ways:
//!
//! - [`RunLease::release`] returns the guard to [`RunState::Idle`];
//! - [`RunLease::terminate`] keeps the slot occupied forever, so the guard
//!   reports [`RunState::Terminated`] and never grants another lease.
//!
//! Dropping a lease without calling either behaves like `release`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Terminated,
}

#[derive(Clone)]
pub struct RunGuard {
    semaphore: Arc<Semaphore>,
    terminated: Arc<AtomicBool>,
}

impl Default for RunGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl RunGuard {
    pub fn new() -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(1)),
            terminated: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Take the slot if no run holds it. Never waits.
    pub fn try_acquire(&self) -> Option<RunLease> {
        if self.terminated.load(Ordering::Acquire) {
            return None;
        }
        let permit = self.semaphore.clone().try_acquire_owned().ok()?;
        Some(RunLease {
            permit,
            terminated: self.terminated.clone(),
        })
    }

    pub fn state(&self) -> RunState {
        if self.terminated.load(Ordering::Acquire) {
            RunState::Terminated
        } else if self.semaphore.available_permits() == 0 {
            RunState::Running
        } else {
            RunState::Idle
        }
    }
}

/// Exclusive right to perform one run.
pub struct RunLease {
    permit: OwnedSemaphorePermit,
    terminated: Arc<AtomicBool>,
}

impl RunLease {
    pub fn release(self) {
        drop(self.permit);
    }

    pub fn terminate(self) {
        self.terminated.store(true, Ordering::Release);
        self.permit.forget();
    }
}
