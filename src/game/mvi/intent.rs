//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent learner input (a typed letter, a deletion) and
/// tracker decisions (a mistake was counted, a hint was revealed).
pub trait Intent: Send + 'static {}
