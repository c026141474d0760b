//! Per-game pacing, hint escalation and reward rules.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::audio::SoundCue;
use crate::config::GameOverrides;

/// The mini-games that share the progress tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GameKind {
    AnimalBox,
    Basketball,
    BlockBuilder,
    GreenLightSquad,
}

impl GameKind {
    /// Stable key used for session storage and config sections.
    pub fn key(&self) -> &'static str {
        match self {
            Self::AnimalBox => "animal-box",
            Self::Basketball => "basketball",
            Self::BlockBuilder => "block-builder",
            Self::GreenLightSquad => "green-light-squad",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AnimalBox => "Animal Box",
            Self::Basketball => "Basketball",
            Self::BlockBuilder => "Block Builder",
            Self::GreenLightSquad => "Green Light Squad",
        }
    }

    pub fn all() -> &'static [GameKind] {
        &[
            Self::AnimalBox,
            Self::Basketball,
            Self::BlockBuilder,
            Self::GreenLightSquad,
        ]
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|kind| kind.key() == s)
    }

    /// Feedback shown when a word is completed.
    pub fn success_message(&self, bonus: bool) -> &'static str {
        match (self, bonus) {
            (Self::AnimalBox, true) => "Bonus! Another friend found!",
            (Self::AnimalBox, false) => "Great job!",
            (Self::Basketball, true) => "Splash! A 3-pointer!",
            (Self::Basketball, false) => "Nice shot! +2",
            (Self::BlockBuilder, _) => "Locked in!",
            (Self::GreenLightSquad, _) => "Green light!",
        }
    }

    /// Feedback shown when every word is done.
    pub fn finish_message(&self) -> &'static str {
        match self {
            Self::AnimalBox => "All boxes are open!",
            Self::Basketball => "Game over!",
            Self::BlockBuilder => "Tower complete!",
            Self::GreenLightSquad => "Green wave! All clear!",
        }
    }

    /// Built-in rules for this game.
    pub fn policy(&self) -> GamePolicy {
        let hints = HintPolicy {
            replay_at: Some(1),
            slow_at: Some(2),
            reveal_at: Some(3),
        };
        match self {
            Self::AnimalBox => GamePolicy {
                input: InputMode::Letters,
                hints,
                rewards: RewardPolicy {
                    every_nth_word: Some(3),
                    ..RewardPolicy::default()
                },
                success_cue: SoundCue::Pop,
                next_word_delay: Duration::from_millis(600),
                mistake_prompt_delay: Duration::from_millis(300),
            },
            Self::Basketball => GamePolicy {
                input: InputMode::Submit,
                hints: HintPolicy {
                    reveal_at: None,
                    ..hints
                },
                rewards: RewardPolicy {
                    bonus_streak: Some(2),
                    ..RewardPolicy::default()
                },
                success_cue: SoundCue::Swish,
                next_word_delay: Duration::from_millis(500),
                mistake_prompt_delay: Duration::from_millis(250),
            },
            Self::BlockBuilder => GamePolicy {
                input: InputMode::Letters,
                hints,
                rewards: RewardPolicy::default(),
                success_cue: SoundCue::Pop,
                next_word_delay: Duration::from_millis(400),
                mistake_prompt_delay: Duration::from_millis(300),
            },
            Self::GreenLightSquad => GamePolicy {
                input: InputMode::Letters,
                hints,
                rewards: RewardPolicy {
                    streak_milestones: vec![3, 5, 8],
                    ..RewardPolicy::default()
                },
                success_cue: SoundCue::Pop,
                next_word_delay: Duration::from_millis(600),
                mistake_prompt_delay: Duration::from_millis(300),
            },
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let known: Vec<&str> = Self::all().iter().map(|kind| kind.key()).collect();
            format!("unknown game '{}' (expected one of: {})", s, known.join(", "))
        })
    }
}

/// How the learner enters an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Each keystroke is checked against the next expected letter.
    Letters,
    /// The whole answer is typed and then submitted.
    Submit,
}

/// One escalation step triggered by a mistake count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintStep {
    ReplayPrompt,
    SlowPrompt,
    RevealFirstLetter,
}

/// Mistake counts at which help escalates. `None` disables a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintPolicy {
    pub replay_at: Option<u32>,
    pub slow_at: Option<u32>,
    pub reveal_at: Option<u32>,
}

impl HintPolicy {
    /// Steps whose threshold is exactly `mistakes`, so each fires once per word.
    pub fn steps_for(&self, mistakes: u32) -> Vec<HintStep> {
        [
            (self.replay_at, HintStep::ReplayPrompt),
            (self.slow_at, HintStep::SlowPrompt),
            (self.reveal_at, HintStep::RevealFirstLetter),
        ]
        .into_iter()
        .filter(|(at, _)| *at == Some(mistakes))
        .map(|(_, step)| step)
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewardPolicy {
    /// Every nth completed word earns a bonus.
    pub every_nth_word: Option<u32>,
    /// Completing a word while the streak is at least this earns a bonus.
    pub bonus_streak: Option<u32>,
    /// Streak values that are celebrated.
    pub streak_milestones: Vec<u32>,
}

impl RewardPolicy {
    pub fn milestone(&self, streak: u32) -> Option<u32> {
        self.streak_milestones.contains(&streak).then_some(streak)
    }

    /// `completed` counts words finished this run, including this one;
    /// `streak_before` is the streak before this word was credited.
    pub fn is_bonus(&self, completed: u32, streak_before: u32) -> bool {
        let nth = self
            .every_nth_word
            .is_some_and(|n| n > 0 && completed > 0 && completed % n == 0);
        let streak = self.bonus_streak.is_some_and(|n| streak_before >= n);
        nth || streak
    }
}

/// Everything the tracker needs to know about one game.
#[derive(Debug, Clone, PartialEq)]
pub struct GamePolicy {
    pub input: InputMode,
    pub hints: HintPolicy,
    pub rewards: RewardPolicy,
    /// Played when a word is completed.
    pub success_cue: SoundCue,
    pub next_word_delay: Duration,
    pub mistake_prompt_delay: Duration,
}

impl GamePolicy {
    /// Apply config overrides on top of these rules.
    pub fn with_overrides(mut self, overrides: &GameOverrides) -> Self {
        if let Some(at) = overrides.replay_at {
            self.hints.replay_at = Some(at);
        }
        if let Some(at) = overrides.slow_at {
            self.hints.slow_at = Some(at);
        }
        if let Some(at) = overrides.reveal_at {
            self.hints.reveal_at = Some(at);
        }
        if let Some(n) = overrides.every_nth_word {
            self.rewards.every_nth_word = Some(n);
        }
        if let Some(milestones) = &overrides.streak_milestones {
            self.rewards.streak_milestones = milestones.clone();
        }
        if let Some(ms) = overrides.next_word_delay_ms {
            self.next_word_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = overrides.mistake_prompt_delay_ms {
            self.mistake_prompt_delay = Duration::from_millis(ms);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for kind in GameKind::all() {
            assert_eq!(GameKind::parse(kind.key()), Some(*kind));
            assert_eq!(kind.key().parse::<GameKind>(), Ok(*kind));
        }
        assert!(GameKind::parse("chess").is_none());
        assert!("chess".parse::<GameKind>().unwrap_err().contains("animal-box"));
    }

    #[test]
    fn hint_steps_fire_once_each() {
        let hints = GameKind::AnimalBox.policy().hints;
        assert!(hints.steps_for(0).is_empty());
        assert_eq!(hints.steps_for(1), vec![HintStep::ReplayPrompt]);
        assert_eq!(hints.steps_for(2), vec![HintStep::SlowPrompt]);
        assert_eq!(hints.steps_for(3), vec![HintStep::RevealFirstLetter]);
        assert!(hints.steps_for(4).is_empty());
    }

    #[test]
    fn coinciding_thresholds_fire_together() {
        let hints = HintPolicy {
            replay_at: Some(1),
            slow_at: Some(1),
            reveal_at: None,
        };
        assert_eq!(
            hints.steps_for(1),
            vec![HintStep::ReplayPrompt, HintStep::SlowPrompt]
        );
    }

    #[test]
    fn basketball_never_reveals() {
        let policy = GameKind::Basketball.policy();
        assert_eq!(policy.input, InputMode::Submit);
        assert!(policy.hints.steps_for(3).is_empty());
    }

    #[test]
    fn bonus_rules() {
        let every_third = GameKind::AnimalBox.policy().rewards;
        assert!(!every_third.is_bonus(1, 0));
        assert!(!every_third.is_bonus(2, 5));
        assert!(every_third.is_bonus(3, 0));
        assert!(every_third.is_bonus(6, 0));

        let three_pointer = GameKind::Basketball.policy().rewards;
        assert!(!three_pointer.is_bonus(1, 1));
        assert!(three_pointer.is_bonus(1, 2));
    }

    #[test]
    fn milestones() {
        let rewards = GameKind::GreenLightSquad.policy().rewards;
        assert_eq!(rewards.milestone(3), Some(3));
        assert_eq!(rewards.milestone(4), None);
        assert_eq!(rewards.milestone(8), Some(8));
    }

    #[test]
    fn overrides_replace_defaults() {
        let overrides = GameOverrides {
            reveal_at: Some(5),
            streak_milestones: Some(vec![2]),
            next_word_delay_ms: Some(0),
            ..GameOverrides::default()
        };
        let policy = GameKind::Basketball.policy().with_overrides(&overrides);
        assert_eq!(policy.hints.reveal_at, Some(5));
        assert_eq!(policy.hints.replay_at, Some(1));
        assert_eq!(policy.rewards.streak_milestones, vec![2]);
        assert_eq!(policy.next_word_delay, Duration::ZERO);
        assert_eq!(policy.mistake_prompt_delay, Duration::from_millis(250));
    }
}
