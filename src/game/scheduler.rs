//! Delayed follow-up actions (prompt replays, moving to the next word).
//!
//! Every task records the generation it was scheduled in and the word it
//! targets. [`Scheduler::cancel_all`] drops everything and starts a new
//! generation, so a task can never act on a session that replaced its own.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledAction {
    /// Speak the prompt again at the normal rate.
    ReplayPrompt,
    /// Speak the prompt again, slowed down.
    SlowPrompt,
    /// Pick the next pending word.
    NextWord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// A task whose time has come.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueTask {
    pub id: TaskId,
    pub action: ScheduledAction,
    /// Word that was current when the task was scheduled.
    pub word: Option<String>,
}

#[derive(Debug)]
struct Task {
    id: TaskId,
    due: Instant,
    generation: u64,
    word: Option<String>,
    action: ScheduledAction,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<Task>,
    next_id: u64,
    generation: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn schedule(
        &mut self,
        now: Instant,
        delay: Duration,
        word: Option<String>,
        action: ScheduledAction,
    ) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            due: now + delay,
            generation: self.generation,
            word,
            action,
        });
        tracing::trace!(?action, ?delay, generation = self.generation, "Scheduled task");
        id
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    /// Drop every pending task and start a new generation.
    pub fn cancel_all(&mut self) {
        if !self.tasks.is_empty() {
            tracing::debug!(dropped = self.tasks.len(), "Cancelled pending tasks");
        }
        self.tasks.clear();
        self.generation += 1;
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// When the earliest pending task becomes due.
    pub fn next_due(&self) -> Option<Instant> {
        self.tasks.iter().map(|task| task.due).min()
    }

    /// Remove and return tasks due at `now` from the current generation,
    /// earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<DueTask> {
        let generation = self.generation;
        let (mut due, rest): (Vec<Task>, Vec<Task>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|task| task.due <= now);
        self.tasks = rest;

        due.retain(|task| task.generation == generation);
        due.sort_by_key(|task| (task.due, task.id));
        due.into_iter()
            .map(|task| DueTask {
                id: task.id,
                action: task.action,
                word: task.word,
            })
            .collect()
    }
}
