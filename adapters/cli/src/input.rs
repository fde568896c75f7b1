//! Parsing of the commands typed at the prompt.

use labyrinth_core::{Direction, Position};
use labyrinth_system_controls::ControlInput;
use thiserror::Error;

/// Something the player asked for at the prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// Forward to the controls system.
    Control(ControlInput),
    /// Throw the current world away and start over.
    Restart,
    /// Give up the current game.
    Quit,
    /// Print the list of commands.
    Help,
}

/// Reasons a prompt line or move script was not understood.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub(crate) enum InputError {
    #[error("unknown command '{0}', type 'help' for the list of commands")]
    UnknownCommand(String),
    #[error("'click' expects a row and a column, e.g. 'click 2 3'")]
    MalformedClick,
    #[error("unknown move '{0}' in script, expected one of U, R, D, L")]
    UnknownMove(char),
}

pub(crate) const HELP: &str = "\
Commands:
  w, up       slide up
  d, right    slide right
  s, down     slide down
  a, left     slide left
  click R C   slide towards the clicked cell next to the ball
  restart     start the labyrinth over
  quit        give up
  help        show this list";

/// Parses one line typed at the prompt.
pub(crate) fn parse_line(line: &str) -> Result<Action, InputError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Action::Help);
    };

    let key = |direction: Direction| -> Result<Action, InputError> {
        Ok(Action::Control(ControlInput::Key(direction)))
    };
    match command.to_ascii_lowercase().as_str() {
        "w" | "up" => key(Direction::Up),
        "d" | "right" => key(Direction::Right),
        "s" | "down" => key(Direction::Down),
        "a" | "left" => key(Direction::Left),
        "click" => {
            let mut coordinate = || {
                words
                    .next()
                    .and_then(|word| word.parse::<i32>().ok())
                    .ok_or(InputError::MalformedClick)
            };
            let row = coordinate()?;
            let col = coordinate()?;
            Ok(Action::Control(ControlInput::Click(Position::new(row, col))))
        }
        "restart" => Ok(Action::Restart),
        "quit" | "q" => Ok(Action::Quit),
        "help" | "?" => Ok(Action::Help),
        _ => Err(InputError::UnknownCommand(command.to_owned())),
    }
}

/// Parses a move script such as `ULDLDR`; whitespace and commas are ignored.
pub(crate) fn parse_script(script: &str) -> Result<Vec<Direction>, InputError> {
    script
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| match c.to_ascii_uppercase() {
            'U' => Ok(Direction::Up),
            'R' => Ok(Direction::Right),
            'D' => Ok(Direction::Down),
            'L' => Ok(Direction::Left),
            _ => Err(InputError::UnknownMove(c)),
        })
        .collect()
}
