//! Arena error types.

use alloc::collections::TryReserveError;

/// Errors returned by the fallible [`Arena`](crate::Arena) operations
///
/// Looking up an element that isn't there is not an error, those operations
/// return [`Option`] instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArenaError {
    /// [`Arena::mutate`](crate::Arena::mutate) was given an index that doesn't
    /// point to a live element: the slot is out of bounds, empty, or holds an
    /// element with a different generation
    #[error("cannot mutate slot {slot} at generation {generation}: no live entry for that index")]
    MutateOnEmptyEntry {
        /// The slot of the rejected index
        slot: usize,
        /// The generation of the rejected index
        generation: u64,
    },
    /// The backing storage could not grow
    #[error("failed to grow arena storage")]
    AllocFailed(#[from] TryReserveError),
}
