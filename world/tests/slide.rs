use labyrinth_core::{Command, Direction, Position, Wall, WallSide};
use labyrinth_world::{self as world, config, query, World};

fn bundled_with_ball_at(ball: Position) -> World {
    let config = config::bundled().expect("bundled labyrinth loads");
    World::from_parts(
        config.board_size(),
        config.walls().iter().copied(),
        ball,
        config.goal(),
    )
    .expect("ball is on the board")
}

fn every_cell(board_size: u32) -> impl Iterator<Item = Position> {
    let size = i32::try_from(board_size).expect("board size fits");
    (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
}

#[test]
fn slides_stop_on_a_blocked_cell_within_board_size_steps() {
    let board_size = config::bundled().expect("bundled labyrinth loads").board_size();

    for start in every_cell(board_size) {
        for direction in Direction::ALL {
            let mut world = bundled_with_ball_at(start);
            let mut events = Vec::new();
            world::apply(&mut world, Command::MoveBall { direction }, &mut events);

            let rest = query::ball_position(&world);
            assert!(
                !query::can_move(&world, direction, rest),
                "slide {direction} from {start} stopped at {rest} which is not blocked"
            );

            let (row_delta, col_delta) = direction.delta();
            let travelled =
                (rest.row() - start.row()) * row_delta + (rest.col() - start.col()) * col_delta;
            assert!(travelled >= 0);
            assert!(u32::try_from(travelled).expect("non-negative") < board_size);
        }
    }
}

#[test]
fn repeated_slides_in_one_direction_are_idempotent() {
    for direction in Direction::ALL {
        let mut world = bundled_with_ball_at(Position::new(3, 3));
        let mut events = Vec::new();
        world::apply(&mut world, Command::MoveBall { direction }, &mut events);
        let rest = query::ball_position(&world);

        events.clear();
        world::apply(&mut world, Command::MoveBall { direction }, &mut events);
        assert!(events.is_empty());
        assert_eq!(query::ball_position(&world), rest);
    }
}

#[test]
fn mirrored_walls_close_every_right_and_bottom_declaration() {
    let config = config::bundled().expect("bundled labyrinth loads");
    let size = i32::try_from(config.board_size()).expect("board size fits");

    for wall in config.walls() {
        let mirror = match wall.side() {
            WallSide::Right if wall.cell().col() + 1 < size => {
                Wall::new(wall.cell().right(), WallSide::Left)
            }
            WallSide::Bottom if wall.cell().row() + 1 < size => {
                Wall::new(wall.cell().down(), WallSide::Top)
            }
            _ => continue,
        };
        assert!(config.walls().contains(&mirror), "{wall} has no mirror");
    }
}

#[test]
fn wall_sides_match_both_descriptions_of_an_edge() {
    let world = bundled_with_ball_at(Position::new(0, 0));

    // Declared as the right wall of (1,3).
    assert!(query::wall_sides_at(&world, Position::new(1, 3)).contains(&WallSide::Right));
    assert!(query::wall_sides_at(&world, Position::new(1, 4)).contains(&WallSide::Left));
}

#[test]
fn goal_invariant_holds_at_every_observable_point() {
    let mut world = bundled_with_ball_at(Position::new(1, 4));
    let moves = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Up,
    ];

    assert_eq!(
        query::is_goal(&world),
        query::ball_position(&world) == query::goal_position(&world)
    );
    for direction in moves {
        let mut events = Vec::new();
        world::apply(&mut world, Command::MoveBall { direction }, &mut events);
        assert_eq!(
            query::is_goal(&world),
            query::ball_position(&world) == query::goal_position(&world)
        );
    }
}
