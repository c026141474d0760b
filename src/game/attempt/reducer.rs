use crate::game::attempt::intent::AttemptIntent;
use crate::game::attempt::state::AttemptState;
use crate::game::mvi::Reducer;

pub struct AttemptReducer;

impl Reducer for AttemptReducer {
    type State = AttemptState;
    type Intent = AttemptIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            AttemptIntent::Start { word } => AttemptState {
                word,
                typed: String::new(),
                mistakes_for_word: 0,
                hint: None,
                notice: None,
                ..state
            },
            AttemptIntent::Append { ch } => {
                let mut typed = state.typed;
                typed.push(ch);
                AttemptState { typed, ..state }
            }
            AttemptIntent::Backspace => {
                let mut typed = state.typed;
                typed.pop();
                AttemptState { typed, ..state }
            }
            AttemptIntent::SetInput { text } => AttemptState {
                typed: text,
                ..state
            },
            AttemptIntent::Mistake => AttemptState {
                mistakes_for_word: state.mistakes_for_word.saturating_add(1),
                total_mistakes: state.total_mistakes.saturating_add(1),
                streak: 0,
                ..state
            },
            AttemptIntent::Correct => {
                let streak = state.streak.saturating_add(1);
                AttemptState {
                    streak,
                    best_streak: state.best_streak.max(streak),
                    ..state
                }
            }
            AttemptIntent::RevealHint { hint } => AttemptState {
                hint: Some(hint),
                ..state
            },
            AttemptIntent::Notice(notice) => AttemptState {
                notice: Some(notice),
                ..state
            },
            AttemptIntent::ClearNotice => AttemptState {
                notice: None,
                ..state
            },
        }
    }
}
