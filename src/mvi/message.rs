//! Base trait for state-transition messages.

/// Marker trait for messages folded by reducers.
///
/// Messages are pure data: they describe what happened (a request was
/// sent, a list was fetched, the session expired) and carry no behavior.
pub trait Message: Send + 'static {}
