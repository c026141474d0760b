mod intent;
mod reducer;
mod state;

pub use intent::AttemptIntent;
pub use reducer::AttemptReducer;
pub use state::{same_letter, AttemptState};
