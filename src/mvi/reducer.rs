//! Reducer trait for the client store.

use super::message::Message;
use super::state::Slice;

/// Reducer transforms a slice based on messages.
///
/// The reducer is the only place where a slice changes.
/// It must be a pure function: (Slice, &Message) -> Slice
pub trait Reducer {
    /// The slice this reducer owns.
    type State: Slice;

    /// The message type this reducer folds.
    type Message: Message;

    /// Fold one message into the slice.
    ///
    /// Messages the slice does not recognise return `state` unchanged.
    fn reduce(state: Self::State, message: &Self::Message) -> Self::State;
}
