//! A headless incremental loading engine for virtualized and infinite-scroll
//! views.
//!
//! Two independent, composable coordinators with no rendering of their own:
//!
//! - [`Debouncer`] coalesces bursts of asynchronous triggers (keystrokes,
//!   resizes, scroll-proximity signals) into a single executed action.
//! - [`Loader`] retrieves a logically unbounded ordered sequence page by
//!   page, with at most one fetch in flight and no double-application of a
//!   page.
//!
//! This crate is UI-agnostic. A rendering layer is expected to:
//! - call [`Loader::request_more`] when more content may be needed (e.g. a
//!   sentinel nears visibility)
//! - re-render from the accumulated items when notified of a state change
//!
//! Cancellation is cooperative and expected: a superseded debounce call, or
//! a fetch cancelled by [`Loader::reset`]/[`Loader::dispose`], completes
//! silently and never surfaces as an error. Faults from caller-supplied
//! providers and actions pass through untouched.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod debouncer;
mod error;
mod loader;
mod options;
mod scope;
mod state;
mod types;


pub use debouncer::Debouncer;
pub use error::{BoxError, LoadError, Result};
pub use loader::Loader;
pub use options::{ItemsAvailableCallback, LoaderOptions, OnChangeCallback, PageProvider};
pub use scope::CancelScope;
pub use state::LoadState;
pub use types::{ItemsPage, LoadOutcome, PageRequest};
