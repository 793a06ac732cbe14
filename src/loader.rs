use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{LoadError, Result};
use crate::{CancelScope, LoadOutcome, LoadState, LoaderOptions, PageRequest};

/// A single-flight incremental loader for a logically unbounded ordered
/// sequence.
///
/// Driven by an external "more needed" signal ([`Loader::request_more`]),
/// it fetches one page at a time through the configured provider,
/// accumulates the results in order, and detects completion against the
/// provider-reported total. At most one fetch is in flight per loader; a
/// signal received while fetching (or after completion) is ignored rather
/// than queued, and the viewport collaborator is expected to re-signal once
/// it learns that new content arrived.
///
/// All methods take `&self`; wrap the loader in an `Arc` to share it
/// between the event source and the rendering layer.
pub struct Loader<T> {
    state: Mutex<StateInner<T>>,
}

struct StateInner<T> {
    options: LoaderOptions<T>,
    items: Vec<T>,
    total_count: Option<usize>,
    completed: bool,
    fetching: bool,
    scope: Option<CancelScope>,
    generation: u64,
    disposed: bool,
}

impl<T> StateInner<T> {
    fn snapshot(&self) -> LoadState {
        LoadState {
            loaded: self.items.len(),
            total_count: self.total_count,
            completed: self.completed,
            fetching: self.fetching,
        }
    }

    /// Cancels the in-flight scope and restarts the sequence from scratch.
    ///
    /// Bumping the generation makes any still-running fetch stale: its
    /// response is discarded and its cleanup leaves the new generation
    /// alone.
    fn clear_sequence(&mut self) {
        if let Some(scope) = self.scope.take() {
            scope.cancel();
        }
        self.items.clear();
        self.total_count = None;
        self.completed = false;
        self.fetching = false;
        self.generation += 1;
    }
}

/// Clears the fetching flag when a fetch unwinds, on every exit path
/// (including provider faults), unless a reset or provider change already
/// moved the loader to a new generation.
struct FlightGuard<'a, T> {
    state: &'a Mutex<StateInner<T>>,
    generation: u64,
}

impl<T> Drop for FlightGuard<'_, T> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        if state.generation == self.generation {
            state.fetching = false;
            state.scope = None;
        }
    }
}

impl<T> Loader<T> {
    pub fn new(options: LoaderOptions<T>) -> Self {
        ldebug!(page_size = ?options.page_size, "Loader::new");
        Self {
            state: Mutex::new(StateInner {
                options,
                items: Vec::new(),
                total_count: None,
                completed: false,
                fetching: false,
                scope: None,
                generation: 0,
                disposed: false,
            }),
        }
    }

    /// Returns a clone of the current options.
    pub fn options(&self) -> LoaderOptions<T> {
        self.state.lock().options.clone()
    }

    /// Replaces the options.
    ///
    /// When the provider's `Arc` identity changes, the loader now stands
    /// for a logically different sequence: the in-flight fetch is
    /// cancelled and the accumulated state is cleared, so the next
    /// [`Loader::request_more`] fetches from offset 0.
    pub fn set_options(&self, options: LoaderOptions<T>) {
        {
            let mut state = self.state.lock();
            let provider_unchanged = Arc::ptr_eq(&state.options.provider, &options.provider);
            state.options = options;
            if !provider_unchanged {
                ldebug!("set_options: provider changed, sequence restarts");
                state.clear_sequence();
            }
        }
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to
    /// [`Loader::set_options`].
    pub fn update_options(&self, f: impl FnOnce(&mut LoaderOptions<T>)) {
        let mut next = self.options();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(&self, on_change: Option<impl Fn(&LoadState) + Send + Sync + 'static>) {
        self.state.lock().options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    pub fn set_on_items_available(
        &self,
        on_items_available: Option<impl Fn(&LoadState) + Send + Sync + 'static>,
    ) {
        self.state.lock().options.on_items_available = on_items_available.map(|f| Arc::new(f) as _);
        self.notify();
    }

    /// Number of accumulated items.
    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().items.is_empty()
    }

    /// Provider-reported total, once the first page has resolved.
    pub fn total_count(&self) -> Option<usize> {
        self.state.lock().total_count
    }

    pub fn is_completed(&self) -> bool {
        self.state.lock().completed
    }

    pub fn is_fetching(&self) -> bool {
        self.state.lock().fetching
    }

    pub fn is_disposed(&self) -> bool {
        self.state.lock().disposed
    }

    /// Returns a lightweight snapshot of the observable state.
    pub fn load_state(&self) -> LoadState {
        self.state.lock().snapshot()
    }

    /// Iterates over the accumulated items without allocations.
    ///
    /// The internal lock is held for the duration; keep `f` cheap and do
    /// not call back into the loader from it.
    pub fn for_each_loaded(&self, mut f: impl FnMut(&T)) {
        let state = self.state.lock();
        for item in &state.items {
            f(item);
        }
    }

    /// Runs `f` against the accumulated items and returns its result.
    ///
    /// Same locking caveat as [`Loader::for_each_loaded`].
    pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        let state = self.state.lock();
        f(&state.items)
    }

    /// Clones the accumulated items into `out` (clears `out` first).
    pub fn collect_loaded(&self, out: &mut Vec<T>)
    where
        T: Clone,
    {
        out.clear();
        let state = self.state.lock();
        out.extend_from_slice(&state.items);
    }

    /// Fetches the next page, unless one is already in flight.
    ///
    /// Returns [`LoadOutcome::Skipped`] when a fetch is in flight, the
    /// sequence is complete, or the loader is disposed. Otherwise the page
    /// starting at the accumulated length is fetched and, if the owning
    /// fetch is still live when the response arrives, appended in order.
    /// When the accumulated length reaches the provider-reported total the
    /// loader transitions to completed; for a non-final page the advisory
    /// `on_items_available` callback fires instead so the viewport
    /// collaborator can decide whether to signal again.
    ///
    /// A response arriving after [`Loader::reset`]/[`Loader::dispose`]
    /// cancelled its fetch is discarded ([`LoadOutcome::Cancelled`]) and
    /// never merged. Provider faults propagate as
    /// [`LoadError::Provider`] with state unchanged and the fetching flag
    /// cleared, so a retry remains possible.
    pub async fn request_more(&self) -> Result<LoadOutcome> {
        let (scope, generation, request, provider) = {
            let mut state = self.state.lock();
            if state.disposed || state.completed || state.fetching {
                ltrace!(
                    disposed = state.disposed,
                    completed = state.completed,
                    fetching = state.fetching,
                    "request_more: signal ignored"
                );
                return Ok(LoadOutcome::Skipped);
            }
            state.fetching = true;
            let scope = CancelScope::new();
            state.scope = Some(scope.clone());
            let request = PageRequest {
                start_index: state.items.len(),
                requested_count: state.options.page_size,
            };
            (
                scope,
                state.generation,
                request,
                Arc::clone(&state.options.provider),
            )
        };
        let guard = FlightGuard {
            state: &self.state,
            generation,
        };
        ldebug!(start_index = request.start_index, "request_more: fetching");
        self.notify();

        let page = match provider(request, scope.clone()).await {
            Ok(page) => page,
            Err(err) => {
                drop(guard);
                self.notify();
                return Err(LoadError::Provider(err));
            }
        };

        let (outcome, advise) = {
            let mut state = self.state.lock();
            if scope.is_cancelled() || state.generation != generation {
                ldebug!("request_more: stale response discarded");
                (LoadOutcome::Cancelled, false)
            } else {
                let appended = page.items.len();
                state.items.extend(page.items);
                let loaded = state.items.len();
                state.total_count = Some(page.total_count);
                if loaded > page.total_count {
                    lwarn!(
                        loaded,
                        total_count = page.total_count,
                        "accumulated length exceeds the reported total"
                    );
                    debug_assert!(
                        loaded <= page.total_count,
                        "accumulated length exceeds the reported total \
                         (loaded={loaded}, total={})",
                        page.total_count
                    );
                }
                state.completed = loaded >= page.total_count;
                state.fetching = false;
                state.scope = None;
                ldebug!(
                    appended,
                    loaded,
                    completed = state.completed,
                    "request_more: page applied"
                );
                (
                    LoadOutcome::Loaded {
                        appended,
                        completed: state.completed,
                    },
                    !state.completed,
                )
            }
        };
        drop(guard);

        if let LoadOutcome::Loaded { .. } = outcome {
            self.notify();
            if advise {
                self.notify_items_available();
            }
        }
        Ok(outcome)
    }

    /// Cancels any in-flight fetch and clears the accumulated sequence.
    ///
    /// The next [`Loader::request_more`] fetches from offset 0. Use this
    /// when the caller now wants a logically different sequence or an
    /// explicit refresh.
    pub fn reset(&self) {
        ldebug!("Loader::reset");
        self.state.lock().clear_sequence();
        self.notify();
    }

    /// Cancels any in-flight fetch and permanently stops the loader.
    ///
    /// Idempotent. Subsequent [`Loader::request_more`] calls are no-ops.
    pub fn dispose(&self) {
        let mut state = self.state.lock();
        if state.disposed {
            return;
        }
        ldebug!("Loader::dispose");
        state.disposed = true;
        if let Some(scope) = state.scope.take() {
            scope.cancel();
        }
        state.fetching = false;
    }

    fn notify(&self) {
        let (callback, snapshot) = {
            let state = self.state.lock();
            (state.options.on_change.clone(), state.snapshot())
        };
        if let Some(callback) = callback {
            callback(&snapshot);
        }
    }

    fn notify_items_available(&self) {
        let (callback, snapshot) = {
            let state = self.state.lock();
            (state.options.on_items_available.clone(), state.snapshot())
        };
        if let Some(callback) = callback {
            callback(&snapshot);
        }
    }
}

impl<T> fmt::Debug for Loader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Loader")
            .field("loaded", &state.items.len())
            .field("total_count", &state.total_count)
            .field("completed", &state.completed)
            .field("fetching", &state.fetching)
            .finish_non_exhaustive()
    }
}
