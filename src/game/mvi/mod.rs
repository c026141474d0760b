//! Model-View-Intent (MVI) primitives for game state.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: plain value describing what the learner has done so far
//! - **Intent**: a keystroke, a submission outcome, a hint escalation
//! - **Reducer**: pure function from (State, Intent) to State
//!
//! Side effects (speech, sounds, persistence, scheduling) stay with the
//! caller that dispatches intents.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::MviState;
