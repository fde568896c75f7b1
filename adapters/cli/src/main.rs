#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a Labyrinth board in the terminal.
//!
//! ```text
//! $ labyrinth --player ada
//! $ labyrinth --config my-board.json --moves ULDLDR
//! $ labyrinth --best 5
//! ```

mod game;
mod input;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use labyrinth_results::ResultRepository;
use labyrinth_world::{config, ValidatedConfig};
use log::{debug, LevelFilter};

/// Slide the blue ball through the labyrinth until it rests on the goal.
#[derive(Debug, Parser)]
#[command(name = "labyrinth", version, about, long_about = None)]
struct Options {
    /// Labyrinth description to play; the bundled board is used when omitted
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Name stored with the result of the game
    #[arg(short, long, default_value = "player")]
    player: String,

    /// File the finished games are stored in
    #[arg(short, long, value_name = "PATH", default_value = "results.json")]
    results: PathBuf,

    /// Play the given moves (U, R, D, L) instead of prompting
    #[arg(short, long, value_name = "SEQ")]
    moves: Option<String>,

    /// Print the N fastest solved games and exit
    #[arg(short, long, value_name = "N")]
    best: Option<usize>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

fn main() -> Result<()> {
    let options = Options::parse();
    init_logger(options.debug);
    debug!("{options:?}");

    let mut repository = ResultRepository::open(&options.results)
        .with_context(|| format!("failed to open results {}", options.results.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(n) = options.best {
        return print_best(&repository, n, &mut out);
    }

    let labyrinth = load_labyrinth(options.config.as_ref())?;
    let record = match &options.moves {
        Some(script) => {
            let moves = input::parse_script(script).context("invalid --moves script")?;
            game::play_script(&labyrinth, &options.player, &moves, &mut out)?
        }
        None => game::play_interactive(&labyrinth, &options.player, io::stdin().lock(), &mut out)?,
    };

    let stored = repository.add(record);
    writeln!(out, "Result #{} stored in {}.", stored.id, options.results.display())?;
    repository
        .save()
        .with_context(|| format!("failed to save results {}", options.results.display()))
}

fn init_logger(debug: bool) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if debug {
        let _ = builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn load_labyrinth(path: Option<&PathBuf>) -> Result<ValidatedConfig> {
    match path {
        Some(path) => config::load_from_path(path)
            .with_context(|| format!("failed to load labyrinth {}", path.display())),
        None => config::bundled().context("bundled labyrinth is invalid"),
    }
}

fn print_best<W: Write>(repository: &ResultRepository, n: usize, out: &mut W) -> Result<()> {
    let best = repository.best(n);
    if best.is_empty() {
        writeln!(out, "No solved games in {} yet.", repository.path().display())?;
        return Ok(());
    }

    for (rank, result) in best.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {:<16} {:>8.1}s {:>4} steps  {}",
            rank + 1,
            result.record.player,
            result.record.duration.as_secs_f64(),
            result.record.steps,
            result.created.format("%Y-%m-%d %H:%M"),
        )?;
    }
    Ok(())
}
