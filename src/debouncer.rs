use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;

use crate::CancelScope;

/// Coalesces bursts of asynchronous triggers into a single executed action.
///
/// Of any run of calls issued less than `delay` apart, only the temporally
/// last one's action executes; every earlier call's scope is cancelled
/// before the replacement scope becomes observable, so a superseded action
/// is guaranteed to never run.
///
/// Cancellation is swallowed at this boundary: a superseded call simply
/// completes without running its action (or yields the default value for
/// [`Debouncer::debounce_for_result`]). Call sites never need to
/// special-case an expected condition.
///
/// All methods take `&self`; wrap the debouncer in an `Arc` to drive it from
/// multiple tasks.
#[derive(Debug, Default)]
pub struct Debouncer {
    slot: Mutex<Slot>,
}

#[derive(Debug)]
struct Slot {
    scope: Option<CancelScope>,
    disposed: bool,
}

impl Default for Slot {
    fn default() -> Self {
        // One live scope exists from construction on; every debounced call
        // cancels and replaces it.
        Self {
            scope: Some(CancelScope::new()),
            disposed: false,
        }
    }
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the outgoing scope and installs a fresh one, under the lock.
    ///
    /// Returns `None` once disposed.
    fn replace_scope(&self) -> Option<CancelScope> {
        let mut slot = self.slot.lock();
        if slot.disposed {
            return None;
        }
        if let Some(old) = slot.scope.take() {
            old.cancel();
        }
        let fresh = CancelScope::new();
        slot.scope = Some(fresh.clone());
        Some(fresh)
    }

    /// Debounces `action` by `delay`.
    ///
    /// The previous pending call (if any) is cancelled first and its action
    /// never runs. If this call is itself superseded, [`Debouncer::cancel`]ed
    /// or [`Debouncer::dispose`]d during the wait, the action never runs and
    /// the call completes normally. Cancellation while the action runs is
    /// exposed to the action through its scope; reacting to it is the
    /// action's responsibility.
    ///
    /// A zero `delay` skips the suspension but still goes through the
    /// cancel-and-replace path.
    pub async fn debounce<F, Fut>(&self, delay: Duration, action: F)
    where
        F: FnOnce(CancelScope) -> Fut,
        Fut: Future<Output = ()>,
    {
        self.debounce_for_result(delay, action).await
    }

    /// Like [`Debouncer::debounce`], but yields the action's value.
    ///
    /// A superseded or cancelled call yields `T::default()` instead; the
    /// cancellation itself is never surfaced as an error. Faults raised by
    /// `f` propagate to the awaiting caller untouched.
    pub async fn debounce_for_result<F, Fut, T>(&self, delay: Duration, f: F) -> T
    where
        F: FnOnce(CancelScope) -> Fut,
        Fut: Future<Output = T>,
        T: Default,
    {
        let Some(scope) = self.replace_scope() else {
            return T::default();
        };
        ltrace!(delay_ms = delay.as_millis() as u64, "debounce: waiting");
        if !scope.sleep(delay).await {
            ltrace!("debounce: superseded during wait");
            return T::default();
        }
        f(scope).await
    }

    /// Cancels the current scope without starting a new one.
    ///
    /// A call currently in its delay phase aborts without running its
    /// action; a later `debounce` works normally.
    pub fn cancel(&self) {
        let slot = self.slot.lock();
        if let Some(scope) = &slot.scope {
            scope.cancel();
        }
    }

    /// Cancels the current scope and permanently releases it.
    ///
    /// Idempotent. A call pending at dispose time resolves without running
    /// its action; subsequent `debounce` calls resolve immediately with the
    /// default value.
    pub fn dispose(&self) {
        let mut slot = self.slot.lock();
        if slot.disposed {
            return;
        }
        slot.disposed = true;
        if let Some(scope) = slot.scope.take() {
            scope.cancel();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.slot.lock().disposed
    }
}
