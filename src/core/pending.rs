//! Pending (not yet settled) values
//!
//! Logging a [`PendingValue`] emits a placeholder right away and a second
//! message once the future settles. The second message carries the original
//! call site and the time between enqueue and settlement.

use super::content::Arg;
use super::error::{LoggerError, Result};
use super::paint::Paint;
use colored::Color;
use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A value that settles later, successfully or not
pub struct PendingValue {
    future: BoxFuture<'static, std::result::Result<Arg, Arg>>,
}

impl PendingValue {
    /// Wrap a fallible future; `Err` settles as a rejection
    pub fn new<F, T, E>(future: F) -> Self
    where
        F: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Into<Arg>,
        E: Into<Arg>,
    {
        Self {
            future: future
                .map(|result| -> std::result::Result<Arg, Arg> {
                    result.map(Into::into).map_err(Into::into)
                })
                .boxed(),
        }
    }

    /// Wrap a future that cannot fail
    pub fn resolving<F, T>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        T: Into<Arg>,
    {
        Self {
            future: future
                .map(|value| -> std::result::Result<Arg, Arg> { Ok(value.into()) })
                .boxed(),
        }
    }

    pub(crate) fn into_future(self) -> BoxFuture<'static, std::result::Result<Arg, Arg>> {
        self.future
    }
}

impl fmt::Debug for PendingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PendingValue")
    }
}

/// The outcome of a pending value, logged as its own message
#[derive(Debug)]
pub struct Settled {
    pub outcome: std::result::Result<Box<Arg>, Box<Arg>>,
    pub call_site: Option<String>,
    pub elapsed: Duration,
}

impl Settled {
    pub fn is_rejected(&self) -> bool {
        self.outcome.is_err()
    }

    /// `[Promise ✓ 12ms]` or `[Promise ✗ 12ms]`, colored by outcome
    pub fn prefix(&self) -> String {
        let (mark, paint) = if self.is_rejected() {
            ("✗", Paint::new().fg(Color::Red).bold())
        } else {
            ("✓", Paint::new().fg(Color::Green).bold())
        };
        paint.apply(&format!("[Promise {} {}ms]", mark, self.elapsed.as_millis()))
    }

    pub fn into_value(self) -> Arg {
        match self.outcome {
            Ok(value) | Err(value) => *value,
        }
    }
}

/// Counts pending values that haven't settled yet
#[derive(Debug, Default)]
pub(crate) struct PendingTracker {
    outstanding: Mutex<usize>,
    settled: Condvar,
}

impl PendingTracker {
    pub(crate) fn begin(self: &Arc<Self>) -> PendingGuard {
        *self.outstanding.lock() += 1;
        PendingGuard {
            tracker: Arc::clone(self),
        }
    }

    pub(crate) fn outstanding(&self) -> usize {
        *self.outstanding.lock()
    }

    /// Block until nothing is outstanding; `false` on timeout
    pub(crate) fn wait(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut outstanding = self.outstanding.lock();
        while *outstanding > 0 {
            if self.settled.wait_until(&mut outstanding, deadline).timed_out() {
                return *outstanding == 0;
            }
        }
        true
    }
}

/// Marks one pending value as outstanding until dropped
pub(crate) struct PendingGuard {
    tracker: Arc<PendingTracker>,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        let mut outstanding = self.tracker.outstanding.lock();
        *outstanding = outstanding.saturating_sub(1);
        self.tracker.settled.notify_all();
    }
}

/// Run `task` on the ambient Tokio runtime if there is one, otherwise on a
/// dedicated thread.
pub(crate) fn spawn(task: BoxFuture<'static, ()>) -> Result<()> {
    #[cfg(feature = "tokio")]
    {
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(task);
            return Ok(());
        }
    }

    std::thread::Builder::new()
        .name("mulog-pending".to_string())
        .spawn(move || futures::executor::block_on(task))
        .map(|_| ())
        .map_err(|source| LoggerError::PendingSpawn { source })
}
