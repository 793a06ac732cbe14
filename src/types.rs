/// A request for one page of a logically unbounded sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRequest {
    /// Index of the first item to fetch (the accumulated length so far).
    pub start_index: usize,
    /// Preferred page size; `None` leaves the size to the provider.
    pub requested_count: Option<usize>,
}

/// One page of items plus the provider-reported sequence total.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemsPage<T> {
    /// Items in sequence order, starting at the requested `start_index`.
    pub items: Vec<T>,
    /// Total length of the full sequence; completion is detected against it.
    pub total_count: usize,
}

impl<T> ItemsPage<T> {
    pub fn new(items: Vec<T>, total_count: usize) -> Self {
        Self { items, total_count }
    }
}

/// Outcome of a single [`Loader::request_more`](crate::Loader::request_more)
/// call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The signal was ignored: a fetch was already in flight, the sequence
    /// is complete, or the loader is disposed. Nothing is queued; re-signal
    /// after the current fetch resolves if more is still needed.
    Skipped,
    /// A page was fetched and applied.
    Loaded {
        /// Number of items appended by this fetch.
        appended: usize,
        /// `true` when this page filled the sequence.
        completed: bool,
    },
    /// The owning fetch was cancelled by `reset`/`dispose`; the response
    /// was discarded without touching the accumulated state.
    Cancelled,
}
