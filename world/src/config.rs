//! Loading and validation of labyrinth descriptions.
//!
//! A description is a JSON document with four fields:
//!
//! ```json
//! {
//!   "boardSize": 7,
//!   "blueBall": { "row": 1, "col": 4 },
//!   "goalPosition": { "row": 5, "col": 2 },
//!   "walls": [{ "position": { "row": 1, "col": 3 }, "direction": "RIGHT" }]
//! }
//! ```
//!
//! Each physical wall is declared once, from the lower-index cell. Loading
//! materialises the matching wall on the neighbouring cell so lookups from
//! either side succeed. Mirroring only runs right to left and bottom to top;
//! `LEFT` and `TOP` declarations are stored as given.

use std::{
    collections::HashSet,
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use labyrinth_core::{Position, Wall, WallSide};
use log::debug;
use serde::Deserialize;
use thiserror::Error;

/// Labyrinth description compiled into the crate.
pub const BUNDLED_LABYRINTH: &str = include_str!("../assets/labyrinth.json");

/// Errors produced while turning a description into a [`ValidatedConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field was missing or malformed.
    #[error("could not parse labyrinth description: {0}")]
    Parse(#[from] serde_json::Error),
    /// The description could not be read from disk.
    #[error("could not read labyrinth description at {}: {source}", path.display())]
    Io {
        /// Location that failed to open.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// The description parsed but breaks a board invariant.
    #[error("invalid labyrinth configuration: {0}")]
    InvalidConfiguration(#[from] Violation),
}

/// Board invariants a description can break.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Violation {
    /// The board has no cells.
    #[error("board size must be at least 1")]
    EmptyBoard,
    /// The board has more rows than a [`Position`] can address.
    #[error("board size {0} exceeds the largest addressable row")]
    BoardTooLarge(u32),
    /// A wall is attached to a cell outside the board.
    #[error("wall {0} lies outside the board")]
    WallOutOfBounds(Wall),
    /// The ball starts outside the board.
    #[error("ball position {0} lies outside the board")]
    BallOutOfBounds(Position),
    /// The goal lies outside the board.
    #[error("goal position {0} lies outside the board")]
    GoalOutOfBounds(Position),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLayout {
    board_size: u32,
    blue_ball: Position,
    goal_position: Position,
    walls: Vec<Wall>,
}

/// Board description that passed every bounds check and has mirrored walls.
///
/// Only the loader functions in this module can produce one, so a world built
/// from it starts out consistent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedConfig {
    board_size: u32,
    walls: HashSet<Wall>,
    ball: Position,
    goal: Position,
}

impl ValidatedConfig {
    /// Number of rows and columns on the square board.
    #[must_use]
    pub fn board_size(&self) -> u32 {
        self.board_size
    }

    /// Normalised wall set, containing both descriptions of each mirrored wall.
    #[must_use]
    pub fn walls(&self) -> &HashSet<Wall> {
        &self.walls
    }

    /// Starting cell of the ball.
    #[must_use]
    pub fn ball(&self) -> Position {
        self.ball
    }

    /// Cell the ball must reach.
    #[must_use]
    pub fn goal(&self) -> Position {
        self.goal
    }

    pub(crate) fn into_parts(self) -> (u32, HashSet<Wall>, Position, Position) {
        (self.board_size, self.walls, self.ball, self.goal)
    }
}

/// Parses and validates a description held in memory.
pub fn load_from_str(source: &str) -> Result<ValidatedConfig, ConfigError> {
    let raw: RawLayout = serde_json::from_str(source)?;
    validate(raw)
}

/// Parses and validates a description read from `reader`.
pub fn load_from_reader<R: Read>(reader: R) -> Result<ValidatedConfig, ConfigError> {
    let raw: RawLayout = serde_json::from_reader(reader)?;
    validate(raw)
}

/// Reads, parses and validates the description stored at `path`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ValidatedConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Loading labyrinth from {path:?}");
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

/// Loads the labyrinth compiled into the crate.
pub fn bundled() -> Result<ValidatedConfig, ConfigError> {
    load_from_str(BUNDLED_LABYRINTH)
}

fn validate(raw: RawLayout) -> Result<ValidatedConfig, ConfigError> {
    check_bounds(
        raw.board_size,
        raw.walls.iter(),
        raw.blue_ball,
        raw.goal_position,
    )?;
    let walls = mirror_walls(&raw.walls, raw.board_size);
    debug!(
        "Loaded {}x{} labyrinth with {} declared and {} normalised walls",
        raw.board_size,
        raw.board_size,
        raw.walls.len(),
        walls.len()
    );

    Ok(ValidatedConfig {
        board_size: raw.board_size,
        walls,
        ball: raw.blue_ball,
        goal: raw.goal_position,
    })
}

/// Expands one-sided declarations into the wall set the world searches.
///
/// A `RIGHT` wall adds the `LEFT` wall of the cell to its right and a
/// `BOTTOM` wall adds the `TOP` wall of the cell below. A mirror that would
/// land outside the board is dropped since the board edge already blocks
/// that side.
pub fn mirror_walls(declared: &[Wall], board_size: u32) -> HashSet<Wall> {
    let mut walls = HashSet::with_capacity(declared.len() * 2);
    for wall in declared {
        let _ = walls.insert(*wall);
        let mirror = match wall.side() {
            WallSide::Right => Some(Wall::new(wall.cell().right(), WallSide::Left)),
            WallSide::Bottom => Some(Wall::new(wall.cell().down(), WallSide::Top)),
            WallSide::Top | WallSide::Left => None,
        };
        if let Some(mirror) = mirror.filter(|mirror| is_on_board(mirror.cell(), board_size)) {
            let _ = walls.insert(mirror);
        }
    }
    walls
}

pub(crate) fn check_bounds<'a>(
    board_size: u32,
    mut walls: impl Iterator<Item = &'a Wall>,
    ball: Position,
    goal: Position,
) -> Result<(), Violation> {
    if board_size == 0 {
        return Err(Violation::EmptyBoard);
    }
    if i32::try_from(board_size).is_err() {
        return Err(Violation::BoardTooLarge(board_size));
    }
    if let Some(wall) = walls.find(|wall| !is_on_board(wall.cell(), board_size)) {
        return Err(Violation::WallOutOfBounds(*wall));
    }
    if !is_on_board(ball, board_size) {
        return Err(Violation::BallOutOfBounds(ball));
    }
    if !is_on_board(goal, board_size) {
        return Err(Violation::GoalOutOfBounds(goal));
    }
    Ok(())
}

pub(crate) fn is_on_board(position: Position, board_size: u32) -> bool {
    let size = i64::from(board_size);
    (0..size).contains(&i64::from(position.row())) && (0..size).contains(&i64::from(position.col()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(board_size: u32, walls: &str) -> String {
        format!(
            r#"{{
                "boardSize": {board_size},
                "blueBall": {{ "row": 0, "col": 0 }},
                "goalPosition": {{ "row": 1, "col": 1 }},
                "walls": [{walls}]
            }}"#
        )
    }

    #[test]
    fn right_and_bottom_walls_are_mirrored() {
        let source = layout(
            4,
            r#"{ "position": { "row": 1, "col": 1 }, "direction": "RIGHT" },
               { "position": { "row": 2, "col": 0 }, "direction": "BOTTOM" }"#,
        );
        let config = load_from_str(&source).expect("layout loads");

        let walls = config.walls();
        assert!(walls.contains(&Wall::new(Position::new(1, 1), WallSide::Right)));
        assert!(walls.contains(&Wall::new(Position::new(1, 2), WallSide::Left)));
        assert!(walls.contains(&Wall::new(Position::new(2, 0), WallSide::Bottom)));
        assert!(walls.contains(&Wall::new(Position::new(3, 0), WallSide::Top)));
        assert_eq!(walls.len(), 4);
    }

    #[test]
    fn left_and_top_walls_are_not_mirrored() {
        let source = layout(
            4,
            r#"{ "position": { "row": 1, "col": 1 }, "direction": "LEFT" },
               { "position": { "row": 2, "col": 2 }, "direction": "TOP" }"#,
        );
        let config = load_from_str(&source).expect("layout loads");

        assert_eq!(
            config.walls(),
            &HashSet::from([
                Wall::new(Position::new(1, 1), WallSide::Left),
                Wall::new(Position::new(2, 2), WallSide::Top),
            ])
        );
    }

    #[test]
    fn duplicate_declarations_collapse() {
        let source = layout(
            3,
            r#"{ "position": { "row": 0, "col": 0 }, "direction": "RIGHT" },
               { "position": { "row": 0, "col": 0 }, "direction": "RIGHT" },
               { "position": { "row": 0, "col": 1 }, "direction": "LEFT" }"#,
        );
        let config = load_from_str(&source).expect("layout loads");
        assert_eq!(config.walls().len(), 2);
    }

    #[test]
    fn mirrors_falling_off_the_board_are_dropped() {
        let walls = mirror_walls(
            &[
                Wall::new(Position::new(0, 2), WallSide::Right),
                Wall::new(Position::new(2, 1), WallSide::Bottom),
            ],
            3,
        );
        assert_eq!(walls.len(), 2);
    }

    #[test]
    fn wall_outside_board_is_rejected() {
        let source = layout(
            3,
            r#"{ "position": { "row": 3, "col": 0 }, "direction": "TOP" }"#,
        );
        let error = load_from_str(&source).expect_err("wall is off the board");
        assert!(matches!(
            error,
            ConfigError::InvalidConfiguration(Violation::WallOutOfBounds(wall))
                if wall == Wall::new(Position::new(3, 0), WallSide::Top)
        ));
    }

    #[test]
    fn empty_board_is_rejected() {
        let error = load_from_str(&layout(0, "")).expect_err("board has no cells");
        assert!(matches!(
            error,
            ConfigError::InvalidConfiguration(Violation::EmptyBoard)
        ));
    }

    #[test]
    fn board_beyond_position_range_is_rejected() {
        let error = load_from_str(&layout(u32::MAX, "")).expect_err("board is too large");
        assert!(matches!(
            error,
            ConfigError::InvalidConfiguration(Violation::BoardTooLarge(u32::MAX))
        ));
    }

    #[test]
    fn missing_field_is_a_parse_error() {
        let source = r#"{ "boardSize": 3, "blueBall": { "row": 0, "col": 0 }, "walls": [] }"#;
        let error = load_from_str(source).expect_err("goal is missing");
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_wall_direction_is_a_parse_error() {
        let source = layout(
            3,
            r#"{ "position": { "row": 0, "col": 0 }, "direction": "DIAGONAL" }"#,
        );
        let error = load_from_str(&source).expect_err("direction is unknown");
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("labyrinth-world-missing-layout.json");
        let error = load_from_path(&path).expect_err("file does not exist");
        assert!(matches!(error, ConfigError::Io { .. }));
    }

    #[test]
    fn reader_and_string_loaders_agree() {
        let from_reader = load_from_reader(BUNDLED_LABYRINTH.as_bytes()).expect("reader loads");
        let from_str = bundled().expect("bundled labyrinth loads");
        assert_eq!(from_reader, from_str);
    }

    #[test]
    fn is_on_board_checks_both_axes() {
        assert!(is_on_board(Position::new(0, 0), 1));
        assert!(is_on_board(Position::new(6, 6), 7));
        assert!(!is_on_board(Position::new(7, 0), 7));
        assert!(!is_on_board(Position::new(0, -1), 7));
    }
}
