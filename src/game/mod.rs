//! The spelling games: per-game rules, input handling and scheduling on top
//! of a persisted [`crate::session::GameSession`].

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

pub mod attempt;
mod clock;
mod events;
pub mod mvi;
mod policy;
mod scheduler;
mod tracker;
mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use events::{EventBus, EventHandler, GameEvent, HandlerId};
pub use policy::{GameKind, GamePolicy, HintPolicy, HintStep, InputMode, RewardPolicy};
pub use scheduler::{DueTask, ScheduledAction, Scheduler, TaskId};
pub use tracker::{InputOutcome, Tracker, TrackerOptions};
pub use view::{mask_word, Notice, NoticeTone, PromptView};
