//! Logger metrics for observability
//!
//! Counters for monitoring the pipeline: messages emitted, per-sink writes,
//! threshold filtering, write failures and pending values.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use mulog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_emitted();
/// metrics.record_written();
/// metrics.record_failed();
///
/// assert_eq!(metrics.emitted(), 1);
/// assert_eq!(metrics.failure_rate(), 50.0);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Messages built by logging calls
    emitted: AtomicU64,

    /// Successful sink writes
    written: AtomicU64,

    /// Sink deliveries skipped by a verbosity threshold
    filtered: AtomicU64,

    /// Sink writes that returned an error or panicked
    failed: AtomicU64,

    /// Pending values handed to a worker
    pending_scheduled: AtomicU64,

    /// Pending values whose outcome was logged
    pending_settled: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            written: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            pending_scheduled: AtomicU64::new(0),
            pending_settled: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn pending_scheduled(&self) -> u64 {
        self.pending_scheduled.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn pending_settled(&self) -> u64 {
        self.pending_settled.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_pending_scheduled(&self) -> u64 {
        self.pending_scheduled.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_pending_settled(&self) -> u64 {
        self.pending_settled.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed writes as a percentage of attempted writes (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been written.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed() as f64;
        let total = self.written() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.emitted.store(0, Ordering::Relaxed);
        self.written.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.pending_scheduled.store(0, Ordering::Relaxed);
        self.pending_settled.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
