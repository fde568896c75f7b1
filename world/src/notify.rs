//! Change notification for presentation layers.

use std::fmt;

use labyrinth_core::{Event, Position};

/// Listener informed after each mutation of the world.
///
/// Both callbacks default to doing nothing so implementors only override what
/// they redraw.
pub trait MazeObserver {
    /// The ball came to rest in a new cell.
    fn ball_moved(&mut self, _position: Position) {}

    /// The ball entered (`true`) or left (`false`) the goal cell.
    fn goal_changed(&mut self, _reached: bool) {}
}

/// Registered observers, notified in subscription order.
#[derive(Default)]
pub(crate) struct Observers {
    observers: Vec<Box<dyn MazeObserver>>,
}

impl Observers {
    pub(crate) fn push(&mut self, observer: Box<dyn MazeObserver>) {
        self.observers.push(observer);
    }

    pub(crate) fn dispatch(&mut self, events: &[Event]) {
        for event in events {
            for observer in &mut self.observers {
                match *event {
                    Event::BallMoved { to, .. } => observer.ball_moved(to),
                    Event::GoalStatusChanged { reached } => observer.goal_changed(reached),
                }
            }
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.observers.len())
            .finish()
    }
}
