#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure session system that keeps score for a single game.
//!
//! The world does not count moves. This system watches the event stream,
//! counts every slide that actually moved the ball and remembers whether the
//! goal was reached, so adapters can hand a [`GameRecord`] to storage when the
//! game ends.

use std::time::Duration;

use labyrinth_core::{Event, GameRecord};

/// Step counter and solved flag for the running game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Session {
    steps: u32,
    solved: bool,
}

impl Session {
    /// Creates a session with no steps taken.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            steps: 0,
            solved: false,
        }
    }

    /// Number of slides that moved the ball so far.
    #[must_use]
    pub const fn steps(&self) -> u32 {
        self.steps
    }

    /// Whether the ball currently rests on the goal.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.solved
    }

    /// Updates the counters from world events.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::BallMoved { .. } => self.steps = self.steps.saturating_add(1),
                Event::GoalStatusChanged { reached } => self.solved = *reached,
            }
        }
    }

    /// Builds the finished-game record for `player`.
    #[must_use]
    pub fn record(&self, player: &str, duration: Duration) -> GameRecord {
        GameRecord {
            player: player.to_owned(),
            solved: self.solved,
            duration,
            steps: self.steps,
        }
    }
}
