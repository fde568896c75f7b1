#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Labyrinth engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values that systems and
//! observers react to. Nothing in here knows about terminals, windows or files.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Slides the ball in the provided direction until a wall or the board edge stops it.
    MoveBall {
        /// Direction of travel for the slide.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the ball left its cell and came to rest in another one.
    BallMoved {
        /// Direction the ball slid in.
        direction: Direction,
        /// Cell the ball occupied before the slide.
        from: Position,
        /// Resting cell of the slide.
        to: Position,
    },
    /// Announces that the ball entered or left the goal cell.
    GoalStatusChanged {
        /// Whether the ball now rests on the goal.
        reached: bool,
    },
}

/// Location of a single grid cell expressed as row and column indices.
///
/// Positions are not bounds-checked; the board that owns them decides which
/// ones are legal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: i32,
    col: i32,
}

impl Position {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Zero-based row index, growing downwards.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Zero-based column index, growing rightwards.
    #[must_use]
    pub const fn col(&self) -> i32 {
        self.col
    }

    /// Position one cell away in the provided direction.
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Self {
        let (row_delta, col_delta) = direction.delta();
        Self::new(self.row + row_delta, self.col + col_delta)
    }

    /// Position directly above this one.
    #[must_use]
    pub const fn up(self) -> Self {
        self.neighbor(Direction::Up)
    }

    /// Position directly to the right of this one.
    #[must_use]
    pub const fn right(self) -> Self {
        self.neighbor(Direction::Right)
    }

    /// Position directly below this one.
    #[must_use]
    pub const fn down(self) -> Self {
        self.neighbor(Direction::Down)
    }

    /// Position directly to the left of this one.
    #[must_use]
    pub const fn left(self) -> Self {
        self.neighbor(Direction::Left)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Cardinal movement directions available to the ball.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
}

impl Direction {
    /// Every direction in clockwise order starting at [`Direction::Up`].
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Row and column change produced by a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
        }
    }

    /// Direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Side of a cell that a ball travelling in this direction runs into.
    #[must_use]
    pub const fn facing_side(self) -> WallSide {
        match self {
            Self::Up => WallSide::Top,
            Self::Right => WallSide::Right,
            Self::Down => WallSide::Bottom,
            Self::Left => WallSide::Left,
        }
    }

    /// Maps a displacement onto the matching cardinal direction.
    ///
    /// Only the four unit offsets classify. The zero vector, diagonals and
    /// displacements spanning more than one cell are rejected, which lets
    /// adapters translate a click relative to the ball into a move intent.
    pub fn classify(row_delta: i32, col_delta: i32) -> Result<Self, DirectionError> {
        match (row_delta, col_delta) {
            (-1, 0) => Ok(Self::Up),
            (0, 1) => Ok(Self::Right),
            (1, 0) => Ok(Self::Down),
            (0, -1) => Ok(Self::Left),
            _ => Err(DirectionError::InvalidDirection {
                row_delta,
                col_delta,
            }),
        }
    }
}

impl TryFrom<(i32, i32)> for Direction {
    type Error = DirectionError;

    fn try_from((row_delta, col_delta): (i32, i32)) -> Result<Self, Self::Error> {
        Self::classify(row_delta, col_delta)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "UP",
            Self::Right => "RIGHT",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
        };
        f.write_str(name)
    }
}

/// Reasons a displacement cannot be turned into a [`Direction`].
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DirectionError {
    /// The displacement is not one of the four unit cardinal offsets.
    #[error("offset ({row_delta},{col_delta}) does not correspond to any direction")]
    InvalidDirection {
        /// Row component of the rejected displacement.
        row_delta: i32,
        /// Column component of the rejected displacement.
        col_delta: i32,
    },
}

/// Side of a cell that a wall segment occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WallSide {
    /// Edge shared with the cell above.
    Top,
    /// Edge shared with the cell to the right.
    Right,
    /// Edge shared with the cell below.
    Bottom,
    /// Edge shared with the cell to the left.
    Left,
}

impl WallSide {
    /// Every side in clockwise order starting at [`WallSide::Top`].
    pub const ALL: [WallSide; 4] = [
        WallSide::Top,
        WallSide::Right,
        WallSide::Bottom,
        WallSide::Left,
    ];

    /// Side of the neighbouring cell that touches this side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }
}

impl fmt::Display for WallSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Top => "TOP",
            Self::Right => "RIGHT",
            Self::Bottom => "BOTTOM",
            Self::Left => "LEFT",
        };
        f.write_str(name)
    }
}

/// Oriented wall segment attached to one side of a cell.
///
/// Two walls are equal when both the cell and the side match. The physical
/// edge between two cells can be described from either of them; the world
/// keeps both descriptions once a layout has been normalised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Wall {
    #[serde(rename = "position")]
    cell: Position,
    #[serde(rename = "direction")]
    side: WallSide,
}

impl Wall {
    /// Creates a wall on the given side of a cell.
    #[must_use]
    pub const fn new(cell: Position, side: WallSide) -> Self {
        Self { cell, side }
    }

    /// Cell the wall is attached to.
    #[must_use]
    pub const fn cell(&self) -> Position {
        self.cell
    }

    /// Side of the cell the wall occupies.
    #[must_use]
    pub const fn side(&self) -> WallSide {
        self.side
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.cell, self.side)
    }
}

/// Finished-game record handed to the result persistence boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Name the player entered before starting.
    pub player: String,
    /// Whether the ball reached the goal.
    pub solved: bool,
    /// Time elapsed between the start of the game and the record being taken.
    pub duration: Duration,
    /// Number of successful moves performed.
    pub steps: u32,
}
