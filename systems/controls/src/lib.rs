#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input system that turns key presses and clicks into move commands.

use labyrinth_core::{Command, Direction, Event, Position};
use log::{debug, warn};

/// Player input distilled from whatever device the adapter listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlInput {
    /// A directional key was pressed.
    Key(Direction),
    /// A board cell was clicked.
    Click(Position),
}

/// Input system that validates player intent before emitting [`Command::MoveBall`].
#[derive(Debug, Default, Clone)]
pub struct Controls {
    locked: bool,
}

impl Controls {
    /// Creates a new controls system accepting input.
    #[must_use]
    pub const fn new() -> Self {
        Self { locked: false }
    }

    /// Reports whether the controls stopped accepting input because the game was solved.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Consumes world events and player input to emit move commands.
    ///
    /// Clicks are classified relative to `ball`; only clicks on one of the four
    /// neighbouring cells become a direction. The `can_move` closure should
    /// mirror the world's `query::can_move` helper; directions it rejects are
    /// dropped so blocked moves never reach the world.
    pub fn handle<F>(
        &mut self,
        events: &[Event],
        input: Option<ControlInput>,
        ball: Position,
        can_move: F,
        out: &mut Vec<Command>,
    ) where
        F: Fn(Direction, Position) -> bool,
    {
        for event in events {
            if let Event::GoalStatusChanged { reached: true } = event {
                self.locked = true;
            }
        }

        if self.locked {
            return;
        }

        let direction = match input {
            None => return,
            Some(ControlInput::Key(direction)) => {
                debug!("{direction} key pressed");
                direction
            }
            Some(ControlInput::Click(cell)) => {
                debug!("Click on square {cell}");
                let offset = cell
                    .row()
                    .checked_sub(ball.row())
                    .zip(cell.col().checked_sub(ball.col()));
                let Some((row_delta, col_delta)) = offset else {
                    warn!("Click on square {cell} is too far from the ball {ball}");
                    return;
                };
                match Direction::classify(row_delta, col_delta) {
                    Ok(direction) => direction,
                    Err(error) => {
                        warn!("Click does not correspond to any direction: {error}");
                        return;
                    }
                }
            }
        };

        if can_move(direction, ball) {
            out.push(Command::MoveBall { direction });
        } else {
            warn!("Invalid move: {direction}");
        }
    }
}
