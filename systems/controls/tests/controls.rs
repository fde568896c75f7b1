use labyrinth_core::{Command, Direction, Event, Position};
use labyrinth_system_controls::{ControlInput, Controls};
use labyrinth_world::{self as world, config, query, World};

fn bundled() -> World {
    World::new(config::bundled().expect("bundled labyrinth loads"))
}

fn handle(
    controls: &mut Controls,
    world: &World,
    events: &[Event],
    input: ControlInput,
) -> Vec<Command> {
    let mut commands = Vec::new();
    controls.handle(
        events,
        Some(input),
        query::ball_position(world),
        |direction, from| query::can_move(world, direction, from),
        &mut commands,
    );
    commands
}

#[test]
fn key_press_emits_move_when_path_is_open() {
    let world = bundled();
    let mut controls = Controls::default();

    let commands = handle(&mut controls, &world, &[], ControlInput::Key(Direction::Right));
    assert_eq!(
        commands,
        vec![Command::MoveBall {
            direction: Direction::Right
        }]
    );
}

#[test]
fn key_press_toward_wall_is_dropped() {
    let world = bundled();
    let mut controls = Controls::default();

    let commands = handle(&mut controls, &world, &[], ControlInput::Key(Direction::Left));
    assert!(commands.is_empty(), "left of the ball is walled off");
}

#[test]
fn click_on_neighbour_translates_to_direction() {
    let world = bundled();
    let mut controls = Controls::default();

    let commands = handle(&mut controls, &world, &[], ControlInput::Click(Position::new(0, 4)));
    assert_eq!(
        commands,
        vec![Command::MoveBall {
            direction: Direction::Up
        }]
    );
}

#[test]
fn unclassifiable_clicks_are_ignored() {
    let world = bundled();
    let mut controls = Controls::default();

    for cell in [
        Position::new(1, 4),
        Position::new(0, 5),
        Position::new(1, 6),
        Position::new(3, 4),
        Position::new(i32::MIN, 0),
        Position::new(1, i32::MAX),
    ] {
        let commands = handle(&mut controls, &world, &[], ControlInput::Click(cell));
        assert!(commands.is_empty(), "click on {cell} should be ignored");
    }
}

#[test]
fn input_is_ignored_once_solved() {
    let mut world = bundled();
    let mut controls = Controls::default();
    let mut events = Vec::new();

    for direction in [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ] {
        let commands = handle(&mut controls, &world, &events, ControlInput::Key(direction));
        events.clear();
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
    }
    assert!(query::is_goal(&world));

    let commands = handle(&mut controls, &world, &events, ControlInput::Key(Direction::Up));
    assert!(controls.is_locked());
    assert!(commands.is_empty());
}
