//! Shared run accounting.
//!
//! `RunCounters` is the only mutable state shared between request tasks.
//! Every access goes through one mutex; each record call is atomic as
//! observed by other callers. A task that panicked while holding the lock
//! would poison it, in which case further records are dropped rather than
//! propagated as errors.

use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Counts {
    total: u64,
    successful: u64,
    failed: u64,
}

#[derive(Debug, Default)]
pub struct RunCounters {
    counts: Mutex<Counts>,
}

impl RunCounters {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: Mutex::new(Counts {
                total: 0,
                successful: 0,
                failed: 0,
            }),
        }
    }

    /// Every attempt counts toward the total; success and failure split it.
    pub fn record_success(&self) {
        if let Ok(mut counts) = self.counts.lock() {
            counts.total = counts.total.saturating_add(1);
            counts.successful = counts.successful.saturating_add(1);
        }
    }

    pub fn record_failure(&self) {
        if let Ok(mut counts) = self.counts.lock() {
            counts.total = counts.total.saturating_add(1);
            counts.failed = counts.failed.saturating_add(1);
        }
    }

    /// Snapshot the counters into a finalized summary. Called once, after
    /// the dispatcher's join barrier; the counters are quiescent by then.
    #[must_use]
    pub fn summarize(&self, duration: Duration) -> RunSummary {
        let counts = self.counts.lock().map_or(Counts::default(), |guard| *guard);
        RunSummary {
            total_requests: counts.total,
            successful_requests: counts.successful,
            failed_requests: counts.failed,
            duration,
        }
    }
}

/// Final tally for one load-test run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub duration: Duration,
}

impl RunSummary {
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            total_requests: 0,
            successful_requests: 0,
            failed_requests: 0,
            duration: Duration::ZERO,
        }
    }
}
