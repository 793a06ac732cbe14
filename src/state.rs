/// A lightweight snapshot of a loader's observable state.
///
/// This is what [`OnChangeCallback`](crate::OnChangeCallback) and
/// [`ItemsAvailableCallback`](crate::ItemsAvailableCallback) receive. With
/// `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadState {
    /// Accumulated item count.
    pub loaded: usize,
    /// Provider-reported total, once the first page has resolved.
    pub total_count: Option<usize>,
    /// `true` once `loaded` has reached `total_count`.
    pub completed: bool,
    /// `true` while a fetch is in flight.
    pub fetching: bool,
}
