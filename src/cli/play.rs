//! Line-based play loop.
//!
//! Each input line is either a command (`:quit`, `:hear`, `:again`) or an
//! answer. Letter games feed the answer through one keystroke at a time and
//! stop at the first wrong letter; submission games submit the whole line.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;

use crate::game::{GameEvent, GameKind, InputMode, InputOutcome, Tracker};

/// One line of learner input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    Quit,
    Hear,
    Again,
    Answer(String),
}

impl PlayCommand {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            ":q" | ":quit" => Self::Quit,
            ":h" | ":hear" => Self::Hear,
            ":again" => Self::Again,
            _ => Self::Answer(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

/// Run `tracker` against `input` until `:quit` or end of input.
///
/// With `echo_prompts` the spoken prompt is also printed, for setups
/// without a speech program.
pub fn play_loop<R: BufRead, W: Write>(
    tracker: &mut Tracker,
    input: R,
    out: &mut W,
    echo_prompts: bool,
) -> io::Result<()> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let handler = tracker.subscribe(move |event| sink.lock().push(event.clone()));

    tracker.begin();
    settle(tracker);
    report(tracker, &events, out, echo_prompts)?;

    for line in input.lines() {
        match PlayCommand::parse(&line?) {
            PlayCommand::Quit => break,
            PlayCommand::Hear => tracker.replay_audio(),
            PlayCommand::Again => {
                if tracker.is_finished() {
                    tracker.replay();
                } else {
                    writeln!(out, "Finish this round first.")?;
                }
            }
            PlayCommand::Answer(text) => answer(tracker, &text),
        }
        settle(tracker);
        report(tracker, &events, out, echo_prompts)?;
    }

    tracker.unsubscribe(handler);
    writeln!(out, "Progress saved. Bye!")?;
    Ok(())
}

fn answer(tracker: &mut Tracker, text: &str) {
    match tracker.policy().input {
        InputMode::Submit => {
            tracker.set_input(text);
            tracker.submit();
        }
        InputMode::Letters => {
            if text.trim().is_empty() {
                if tracker.attempt().typed.is_empty() {
                    tracker.submit();
                }
                return;
            }
            for ch in text.chars() {
                match tracker.append(ch) {
                    InputOutcome::Mistake | InputOutcome::WordComplete => break,
                    _ => {}
                }
            }
        }
    }
}

/// Wait for and run scheduled follow-ups until none are left.
fn settle(tracker: &mut Tracker) {
    while let Some(wait) = tracker.time_until_due() {
        if !wait.is_zero() {
            thread::sleep(wait);
        }
        tracker.tick();
    }
}

fn report<W: Write>(
    tracker: &Tracker,
    events: &Mutex<Vec<GameEvent>>,
    out: &mut W,
    echo_prompts: bool,
) -> io::Result<()> {
    let drained: Vec<GameEvent> = std::mem::take(&mut *events.lock());
    for event in drained {
        match event {
            GameEvent::PromptRequested { word, rate } if echo_prompts => {
                if rate < tracker.settings().tts_rate {
                    writeln!(out, "Listen (slowly): {}", word)?;
                } else {
                    writeln!(out, "Listen: {}", word)?;
                }
            }
            GameEvent::LetterCorrect {
                milestone: Some(streak),
                ..
            } => {
                writeln!(out, "{} in a row!", streak)?;
            }
            GameEvent::WordComplete {
                box_index,
                reward,
                milestone,
                ..
            } => {
                if let (GameKind::AnimalBox, Some(index), Some(reward)) =
                    (tracker.game(), box_index, reward)
                {
                    writeln!(out, "Box {} opened: a {}!", index + 1, reward)?;
                }
                if let Some(streak) = milestone {
                    writeln!(out, "{} in a row!", streak)?;
                }
            }
            GameEvent::RoundComplete { result } => {
                writeln!(
                    out,
                    "Round complete: {}/{} words, {} mistakes, {:.0}% in {}",
                    result.correct,
                    result.total,
                    result.mistakes,
                    result.accuracy(),
                    result.formatted_duration()
                )?;
                writeln!(out, "Type :again to play again or :quit to stop.")?;
            }
            _ => {}
        }
    }

    let view = tracker.view();
    if let Some(notice) = &view.notice {
        writeln!(out, "{}", notice.message)?;
    }
    if view.empty || view.complete {
        return out.flush();
    }
    if let Some(hint) = &view.hint {
        writeln!(out, "Hint: {}", hint)?;
    }
    write!(
        out,
        "[{}/{}] {} > ",
        view.progress_done + 1,
        view.progress_total,
        view.masked
    )?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(PlayCommand::parse(":quit\n"), PlayCommand::Quit);
        assert_eq!(PlayCommand::parse(" :h "), PlayCommand::Hear);
        assert_eq!(PlayCommand::parse(":again"), PlayCommand::Again);
        assert_eq!(
            PlayCommand::parse("ice cream\r\n"),
            PlayCommand::Answer("ice cream".into())
        );
        assert_eq!(PlayCommand::parse(""), PlayCommand::Answer(String::new()));
    }
}
