//! Per-list game progress: which words remain, which are done, which reward
//! sits behind each box and which word is being prompted.

mod repo;
mod rewards;
mod state;

pub use repo::{FreshReason, SessionOrigin, SessionStore};
pub use rewards::{all_animals, assign_rewards, ANIMALS};
pub use state::{Completion, GameSession};
