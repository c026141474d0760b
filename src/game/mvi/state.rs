//! Base trait for state in MVI architecture.

/// Marker trait for reducer-owned state.
///
/// States are cloneable values with a meaningful default and equality, so a
/// caller can detect whether a dispatch changed anything.
pub trait MviState: Clone + PartialEq + Default + Send + 'static {}
