use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::BoxError;
use crate::{CancelScope, ItemsPage, LoadState, PageRequest};

/// The page-fetch callback driving a [`Loader`](crate::Loader).
///
/// Receives the request plus the cancellation scope owning the fetch. A
/// provider that suspends should observe the scope at its own suspension
/// points to abandon promptly after `reset`/`dispose`. Errors pass through
/// to the `request_more` caller untouched.
pub type PageProvider<T> = Arc<
    dyn Fn(PageRequest, CancelScope) -> BoxFuture<'static, Result<ItemsPage<T>, BoxError>>
        + Send
        + Sync,
>;

/// A callback fired when the loader's observable state changes.
pub type OnChangeCallback = Arc<dyn Fn(&LoadState) + Send + Sync>;

/// A callback fired after a non-final page lands.
///
/// Advisory only: it tells the viewport collaborator that new content is
/// available so it can decide whether to signal again. It is not a
/// guarantee that the viewport is (or will become) filled.
pub type ItemsAvailableCallback = Arc<dyn Fn(&LoadState) + Send + Sync>;

/// Configuration for [`crate::Loader`].
///
/// This type is designed to be cheap to clone: the provider and callbacks
/// are stored in `Arc`s so collaborators can update a field and call
/// `Loader::set_options` without reallocating closures. Replacing
/// `provider` with a different `Arc` identity means the loader now
/// represents a logically different sequence and resets it.
pub struct LoaderOptions<T> {
    pub provider: PageProvider<T>,
    /// Preferred page size, forwarded as [`PageRequest::requested_count`].
    pub page_size: Option<usize>,
    /// Optional callback fired on every observable state change (fetch
    /// start, page applied, completion, fault settling, reset).
    pub on_change: Option<OnChangeCallback>,
    /// Optional advisory callback fired after each non-final page.
    pub on_items_available: Option<ItemsAvailableCallback>,
}

impl<T> LoaderOptions<T> {
    /// Creates options from a page provider.
    pub fn new<F>(provider: F) -> Self
    where
        F: Fn(PageRequest, CancelScope) -> BoxFuture<'static, Result<ItemsPage<T>, BoxError>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            provider: Arc::new(provider),
            page_size: None,
            on_change: None,
            on_items_available: None,
        }
    }

    pub fn with_provider<F>(mut self, provider: F) -> Self
    where
        F: Fn(PageRequest, CancelScope) -> BoxFuture<'static, Result<ItemsPage<T>, BoxError>>
            + Send
            + Sync
            + 'static,
    {
        self.provider = Arc::new(provider);
        self
    }

    pub fn with_page_size(mut self, page_size: Option<usize>) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&LoadState) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_items_available(
        mut self,
        on_items_available: Option<impl Fn(&LoadState) + Send + Sync + 'static>,
    ) -> Self {
        self.on_items_available = on_items_available.map(|f| Arc::new(f) as _);
        self
    }
}

impl<T> Clone for LoaderOptions<T> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            page_size: self.page_size,
            on_change: self.on_change.clone(),
            on_items_available: self.on_items_available.clone(),
        }
    }
}

impl<T> fmt::Debug for LoaderOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderOptions")
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}
