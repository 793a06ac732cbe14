//! Loader errors.

use thiserror::Error;

/// A boxed error produced by caller-supplied provider logic.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by [`Loader`](crate::Loader) operations.
///
/// Cancellation is deliberately not a variant here: a fetch cancelled by
/// `reset`/`dispose` is an expected outcome
/// ([`LoadOutcome::Cancelled`](crate::LoadOutcome::Cancelled)), not a fault.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The page provider failed. The original error is preserved as the
    /// source; accumulated state is untouched and the loader stays
    /// retryable.
    #[error("page provider failed")]
    Provider(#[source] BoxError),
}

pub type Result<T> = std::result::Result<T, LoadError>;
