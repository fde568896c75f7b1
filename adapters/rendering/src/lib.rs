#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Labyrinth adapters.
//!
//! Adapters capture a [`Scene`] from the world after every batch of events
//! and draw it however they like. [`render_text`] draws the plain-text frame
//! the terminal adapter prints.

use std::collections::BTreeSet;

use labyrinth_core::{Position, WallSide};
use labyrinth_world::{query, World};

/// Snapshot of everything a frame needs to draw the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Number of rows and columns on the square board.
    pub board_size: u32,
    /// Wall sides of every cell in row-major order.
    pub wall_sides: Vec<BTreeSet<WallSide>>,
    /// Cell the ball rests in.
    pub ball: Position,
    /// Cell the ball must reach.
    pub goal: Position,
    /// Whether the ball rests on the goal.
    pub solved: bool,
}

impl Scene {
    /// Captures the current state of `world`.
    #[must_use]
    pub fn capture(world: &World) -> Self {
        let board_size = query::board_size(world);
        let wall_sides = cells(board_size)
            .map(|cell| query::wall_sides_at(world, cell))
            .collect();
        Self {
            board_size,
            wall_sides,
            ball: query::ball_position(world),
            goal: query::goal_position(world),
            solved: query::is_goal(world),
        }
    }

    /// Reports whether `cell` has a wall on `side`.
    #[must_use]
    pub fn has_wall(&self, cell: Position, side: WallSide) -> bool {
        self.index(cell)
            .and_then(|index| self.wall_sides.get(index))
            .is_some_and(|sides| sides.contains(&side))
    }

    fn index(&self, cell: Position) -> Option<usize> {
        let size = usize::try_from(self.board_size).ok()?;
        let row = usize::try_from(cell.row()).ok()?;
        let col = usize::try_from(cell.col()).ok()?;
        if row < size && col < size {
            Some(row * size + col)
        } else {
            None
        }
    }
}

fn cells(board_size: u32) -> impl Iterator<Item = Position> {
    let size = i32::try_from(board_size).unwrap_or(i32::MAX);
    (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
}

/// Draws `scene` as a grid of `+`, `---` and `|` segments.
///
/// The ball is drawn as `o`, the goal as `X` and both together as `@`. Board
/// edges are always closed; inner edges are drawn when either adjacent cell
/// carries the wall.
#[must_use]
pub fn render_text(scene: &Scene) -> String {
    let size = i32::try_from(scene.board_size).unwrap_or(i32::MAX);
    let mut out = String::new();

    out.push_str(&horizontal_edge(size, |_| true));
    for row in 0..size {
        out.push('|');
        for col in 0..size {
            let cell = Position::new(row, col);
            out.push_str(match (cell == scene.ball, cell == scene.goal) {
                (true, true) => " @ ",
                (true, false) => " o ",
                (false, true) => " X ",
                (false, false) => "   ",
            });
            let closed = col == size - 1
                || scene.has_wall(cell, WallSide::Right)
                || scene.has_wall(cell.right(), WallSide::Left);
            out.push(if closed { '|' } else { ' ' });
        }
        out.push('\n');

        out.push_str(&horizontal_edge(size, |col| {
            let cell = Position::new(row, col);
            row == size - 1
                || scene.has_wall(cell, WallSide::Bottom)
                || scene.has_wall(cell.down(), WallSide::Top)
        }));
    }
    out
}

fn horizontal_edge(size: i32, closed: impl Fn(i32) -> bool) -> String {
    let mut line = String::from("+");
    for col in 0..size {
        line.push_str(if closed(col) { "---" } else { "   " });
        line.push('+');
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_core::Wall;

    fn scene(walls: &[Wall], ball: Position, goal: Position) -> Scene {
        let world = World::from_parts(2, walls.iter().copied(), ball, goal)
            .expect("layout is on the board");
        Scene::capture(&world)
    }

    #[test]
    fn open_board_draws_only_edges() {
        let frame = render_text(&scene(&[], Position::new(0, 0), Position::new(1, 1)));
        assert_eq!(
            frame,
            "+---+---+\n\
             | o     |\n\
             +   +   +\n\
             |     X |\n\
             +---+---+\n"
        );
    }

    #[test]
    fn walls_from_either_side_are_drawn() {
        let frame = render_text(&scene(
            &[
                Wall::new(Position::new(0, 1), WallSide::Left),
                Wall::new(Position::new(0, 1), WallSide::Bottom),
            ],
            Position::new(1, 0),
            Position::new(1, 0),
        ));
        assert_eq!(
            frame,
            "+---+---+\n\
             |   |   |\n\
             +   +---+\n\
             | @     |\n\
             +---+---+\n"
        );
    }

    #[test]
    fn capture_reads_wall_sides_per_cell() {
        let captured = scene(
            &[Wall::new(Position::new(1, 1), WallSide::Top)],
            Position::new(0, 0),
            Position::new(1, 1),
        );
        assert!(captured.has_wall(Position::new(1, 1), WallSide::Top));
        assert!(!captured.has_wall(Position::new(0, 1), WallSide::Bottom));
        assert!(!captured.has_wall(Position::new(5, 5), WallSide::Top));
        assert!(!captured.solved);
    }
}
