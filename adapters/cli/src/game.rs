//! Terminal game loop tying the world, the systems and the renderer together.

use std::{
    io::{BufRead, Write},
    time::Instant,
};

use anyhow::{Context, Result};
use labyrinth_core::{Direction, Event, GameRecord};
use labyrinth_rendering::{render_text, Scene};
use labyrinth_system_controls::{ControlInput, Controls};
use labyrinth_system_session::Session;
use labyrinth_world::{self as world, query, ValidatedConfig, World};
use log::{debug, info, warn};

use crate::input::{self, Action};

/// One game from a fresh world to a solve or a give-up.
pub(crate) struct Game {
    world: World,
    controls: Controls,
    session: Session,
    events: Vec<Event>,
    started: Instant,
}

impl Game {
    pub(crate) fn new(config: &ValidatedConfig) -> Self {
        Self {
            world: World::new(config.clone()),
            controls: Controls::new(),
            session: Session::new(),
            events: Vec::new(),
            started: Instant::now(),
        }
    }

    /// Routes one input through the controls and applies the resulting commands.
    pub(crate) fn submit(&mut self, input: ControlInput) {
        let mut commands = Vec::new();
        let world = &self.world;
        self.controls.handle(
            &self.events,
            Some(input),
            query::ball_position(world),
            |direction, from| query::can_move(world, direction, from),
            &mut commands,
        );

        self.events.clear();
        for command in commands {
            world::apply(&mut self.world, command, &mut self.events);
        }
        self.session.handle(&self.events);
    }

    pub(crate) fn is_solved(&self) -> bool {
        query::is_goal(&self.world)
    }

    pub(crate) fn steps(&self) -> u32 {
        self.session.steps()
    }

    pub(crate) fn frame(&self) -> String {
        render_text(&Scene::capture(&self.world))
    }

    pub(crate) fn record(&self, player: &str) -> GameRecord {
        self.session.record(player, self.started.elapsed())
    }
}

/// Plays the scripted `moves` without prompting and returns the finished record.
pub(crate) fn play_script<W: Write>(
    config: &ValidatedConfig,
    player: &str,
    moves: &[Direction],
    out: &mut W,
) -> Result<GameRecord> {
    let mut game = Game::new(config);
    for &direction in moves {
        if game.is_solved() {
            warn!("Ignoring remaining moves, the labyrinth is already solved");
            break;
        }
        game.submit(ControlInput::Key(direction));
    }

    write!(out, "{}", game.frame())?;
    report_outcome(&game, player, out)?;
    Ok(game.record(player))
}

/// Runs the interactive prompt until the player solves the labyrinth or gives up.
///
/// Reaching the end of `input` counts as giving up.
pub(crate) fn play_interactive<R: BufRead, W: Write>(
    config: &ValidatedConfig,
    player: &str,
    input: R,
    out: &mut W,
) -> Result<GameRecord> {
    let mut game = Game::new(config);
    writeln!(out, "Good luck, {player}! Type 'help' for the list of commands.")?;
    write!(out, "{}", game.frame())?;

    let mut lines = input.lines();
    while !game.is_solved() {
        write!(out, "[{} steps] > ", game.steps())?;
        out.flush()?;

        let Some(line) = lines.next() else {
            debug!("Input closed");
            break;
        };
        let line = line.context("failed to read from the terminal")?;

        match input::parse_line(&line) {
            Ok(Action::Control(control)) => {
                let before = game.steps();
                game.submit(control);
                if game.steps() == before {
                    writeln!(out, "The ball cannot move that way.")?;
                }
                write!(out, "{}", game.frame())?;
            }
            Ok(Action::Restart) => {
                info!("Restarting game");
                game = Game::new(config);
                write!(out, "{}", game.frame())?;
            }
            Ok(Action::Quit) => {
                info!("The game has been given up");
                break;
            }
            Ok(Action::Help) => writeln!(out, "{}", input::HELP)?,
            Err(error) => writeln!(out, "{error}")?,
        }
    }

    report_outcome(&game, player, out)?;
    Ok(game.record(player))
}

fn report_outcome<W: Write>(game: &Game, player: &str, out: &mut W) -> Result<()> {
    if game.is_solved() {
        info!("{player} has solved the game in {} steps", game.steps());
        writeln!(out, "Congratulations, {player}! Solved in {} steps.", game.steps())?;
    } else {
        writeln!(out, "Not solved after {} steps.", game.steps())?;
    }
    Ok(())
}
