use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Notify;

/// A handle to one cancelable unit of work.
///
/// Cloning is cheap and every clone observes the same underlying state.
/// Cancellation is one-way and cooperative: the flag flips at most once,
/// waiters are woken, and whatever holds the scope is expected to observe it
/// at its own suspension points to abandon promptly. Nothing is forcibly
/// interrupted.
#[derive(Clone, Debug, Default)]
pub struct CancelScope {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once this scope has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Cancels this scope and wakes every waiter.
    ///
    /// The flag flips at most once; repeated calls are no-ops.
    pub fn cancel(&self) {
        if self.inner.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }
        self.inner.notify.notify_waiters();
    }

    /// Suspends until this scope is cancelled.
    ///
    /// Returns immediately if it already is.
    pub async fn cancelled(&self) {
        if self.is_cancelled() {
            return;
        }
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        // Register interest before the re-check: a cancel landing between
        // the check and the await must not be missed.
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }

    /// Suspends for `duration` unless cancelled first.
    ///
    /// Returns `true` when the full duration elapsed with the scope still
    /// live, `false` when the scope was cancelled. A zero duration skips the
    /// suspension entirely but still observes the flag.
    pub async fn sleep(&self, duration: Duration) -> bool {
        if duration.is_zero() {
            return !self.is_cancelled();
        }
        tokio::select! {
            _ = tokio::time::sleep(duration) => !self.is_cancelled(),
            _ = self.cancelled() => false,
        }
    }
}
