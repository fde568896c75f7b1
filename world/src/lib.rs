#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative maze state for Labyrinth.
//!
//! A [`World`] owns the board size, the normalised wall set, the ball and the
//! goal. The ball is the only thing that ever moves and it only moves through
//! [`apply`]. Everything else is read through the [`query`] module.

pub mod config;
mod notify;

use std::{collections::HashSet, fmt};

use labyrinth_core::{Command, Direction, Event, Position, Wall, WallSide};
use log::{debug, info};

pub use config::{ConfigError, ValidatedConfig, Violation};
pub use notify::MazeObserver;

use notify::Observers;

/// Represents the authoritative labyrinth state for one game session.
///
/// Restarting a game means building a fresh world; there is no way to put
/// the ball back in place.
#[derive(Debug)]
pub struct World {
    board_size: u32,
    walls: HashSet<Wall>,
    ball: Position,
    goal: Position,
    goal_reached: bool,
    observers: Observers,
}

impl World {
    /// Creates a world from a loaded configuration.
    #[must_use]
    pub fn new(config: ValidatedConfig) -> Self {
        let (board_size, walls, ball, goal) = config.into_parts();
        Self::assemble(board_size, walls, ball, goal)
    }

    /// Creates a world from an already normalised wall set.
    ///
    /// No mirroring happens here; the walls are taken exactly as given. The
    /// bounds of every wall, the ball and the goal are still checked.
    pub fn from_parts(
        board_size: u32,
        walls: impl IntoIterator<Item = Wall>,
        ball: Position,
        goal: Position,
    ) -> Result<Self, ConfigError> {
        let walls: HashSet<Wall> = walls.into_iter().collect();
        config::check_bounds(board_size, walls.iter(), ball, goal)?;
        Ok(Self::assemble(board_size, walls, ball, goal))
    }

    fn assemble(board_size: u32, walls: HashSet<Wall>, ball: Position, goal: Position) -> Self {
        Self {
            board_size,
            walls,
            ball,
            goal,
            goal_reached: ball == goal,
            observers: Observers::default(),
        }
    }

    /// Registers an observer notified after every successful move.
    pub fn subscribe(&mut self, observer: Box<dyn MazeObserver>) {
        self.observers.push(observer);
    }

    fn has_wall(&self, cell: Position, side: WallSide) -> bool {
        self.walls.contains(&Wall::new(cell, side))
    }

    fn can_move(&self, direction: Direction, from: Position) -> bool {
        if !config::is_on_board(from, self.board_size) {
            return false;
        }
        let next = from.neighbor(direction);
        if !config::is_on_board(next, self.board_size) {
            return false;
        }
        // A wall on either side of the shared edge blocks.
        let side = direction.facing_side();
        !self.has_wall(from, side) && !self.has_wall(next, side.opposite())
    }

    fn resting_cell(&self, direction: Direction) -> Position {
        let mut current = self.ball;
        while self.can_move(direction, current) {
            current = current.neighbor(direction);
        }
        current
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut walls: Vec<&Wall> = self.walls.iter().collect();
        walls.sort();
        f.write_str("[")?;
        for wall in walls {
            write!(f, "{wall}, ")?;
        }
        write!(f, "\nBlue Ball: {}, Goal: {}]", self.ball, self.goal)
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Events produced by the command are appended to `out_events` and forwarded
/// to every subscribed observer. A slide that cannot leave its starting cell
/// changes nothing and produces no events.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MoveBall { direction } => {
            let from = world.ball;
            let to = world.resting_cell(direction);
            if to == from {
                debug!("Ball cannot move {direction} from {from}");
                return;
            }

            let first_new = out_events.len();
            world.ball = to;
            info!("Ball slid {direction} from {from} to {to}");
            out_events.push(Event::BallMoved {
                direction,
                from,
                to,
            });

            let reached = world.ball == world.goal;
            if reached != world.goal_reached {
                world.goal_reached = reached;
                if reached {
                    info!("Ball reached the goal at {to}");
                }
                out_events.push(Event::GoalStatusChanged { reached });
            }

            world.observers.dispatch(&out_events[first_new..]);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::collections::BTreeSet;

    use super::World;
    use labyrinth_core::{Direction, Position, Wall, WallSide};

    /// Number of rows and columns on the square board.
    #[must_use]
    pub fn board_size(world: &World) -> u32 {
        world.board_size
    }

    /// Cell the ball currently rests in.
    #[must_use]
    pub fn ball_position(world: &World) -> Position {
        world.ball
    }

    /// Cell the ball must reach.
    #[must_use]
    pub fn goal_position(world: &World) -> Position {
        world.goal
    }

    /// Iterates over the normalised wall set in no particular order.
    pub fn walls(world: &World) -> impl Iterator<Item = &Wall> + '_ {
        world.walls.iter()
    }

    /// Reports whether the ball could take one step from `from` in `direction`.
    ///
    /// Fails closed at the board edge and when `from` itself is off the board.
    /// Otherwise a wall on the facing side of `from`, or on the opposite side
    /// of the neighbouring cell, blocks the step.
    #[must_use]
    pub fn can_move(world: &World, direction: Direction, from: Position) -> bool {
        world.can_move(direction, from)
    }

    /// Cell a slide in `direction` would end in, without moving the ball.
    #[must_use]
    pub fn resting_cell(world: &World, direction: Direction) -> Position {
        world.resting_cell(direction)
    }

    /// Sides of `position` that carry a wall.
    #[must_use]
    pub fn wall_sides_at(world: &World, position: Position) -> BTreeSet<WallSide> {
        WallSide::ALL
            .into_iter()
            .filter(|side| world.has_wall(position, *side))
            .collect()
    }

    /// Reports whether the ball rests on the goal.
    #[must_use]
    pub fn is_goal(world: &World) -> bool {
        world.ball == world.goal
    }
}
