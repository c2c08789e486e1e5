//! Base trait for state slices.

/// Marker trait for state slices.
///
/// Slices should be:
/// - Immutable (Clone to create new values)
/// - Self-contained (no reads from sibling slices)
/// - Comparable (PartialEq for detecting changes)
/// - Resettable (Default is the initial, empty value)
pub trait Slice: Clone + PartialEq + Default + Send + 'static {}
