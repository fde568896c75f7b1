#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Persistence for finished games.
//!
//! Results are kept as a JSON array of [`StoredResult`] values in a single
//! file. The repository is an ordinary value the adapter constructs and passes
//! around; the world never sees it.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use labyrinth_core::GameRecord;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading or writing the results file.
#[derive(Debug, Error)]
pub enum ResultsError {
    /// The file could not be opened, read or written.
    #[error("could not access results file {}: {source}", path.display())]
    Io {
        /// Location of the results file.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// The file contents are not a valid results array.
    #[error("could not decode results file {}: {source}", path.display())]
    Json {
        /// Location of the results file.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Game record together with the bookkeeping the repository adds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredResult {
    /// Identifier unique within the file, starting at 1.
    pub id: u64,
    /// Moment the record was added.
    pub created: DateTime<Utc>,
    /// The finished game itself.
    #[serde(flatten)]
    pub record: GameRecord,
}

/// File-backed collection of finished games.
#[derive(Debug)]
pub struct ResultRepository {
    path: PathBuf,
    results: Vec<StoredResult>,
}

impl ResultRepository {
    /// Opens the repository stored at `path`.
    ///
    /// A missing file is not an error and yields an empty repository; the file
    /// is created on the first [`ResultRepository::save`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ResultsError> {
        let path = path.into();
        debug!("Results file: {path:?}");
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                info!("Results file {path:?} was not found, starting empty");
                return Ok(Self {
                    path,
                    results: Vec::new(),
                });
            }
            Err(source) => return Err(ResultsError::Io { path, source }),
        };

        let results = match serde_json::from_reader(BufReader::new(file)) {
            Ok(results) => results,
            Err(source) => return Err(ResultsError::Json { path, source }),
        };
        Ok(Self { path, results })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored results in insertion order.
    #[must_use]
    pub fn all(&self) -> &[StoredResult] {
        &self.results
    }

    /// Adds a record, stamping it with the next identifier and the current time.
    pub fn add(&mut self, record: GameRecord) -> &StoredResult {
        self.add_at(record, Utc::now())
    }

    fn add_at(&mut self, record: GameRecord, created: DateTime<Utc>) -> &StoredResult {
        let id = self.results.iter().map(|result| result.id).max().unwrap_or(0) + 1;
        info!(
            "Storing game result {id} for player {} ({} steps, solved: {})",
            record.player, record.steps, record.solved
        );
        self.results.push(StoredResult {
            id,
            created,
            record,
        });
        &self.results[self.results.len() - 1]
    }

    /// Writes every stored result back to the backing file.
    pub fn save(&self) -> Result<(), ResultsError> {
        let io_error = |source| ResultsError::Io {
            path: self.path.clone(),
            source,
        };
        let file = File::create(&self.path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.results).map_err(|source| {
            ResultsError::Json {
                path: self.path.clone(),
                source,
            }
        })?;
        writer.flush().map_err(io_error)
    }

    /// Up to `n` solved results, fastest first, newest first among equal times.
    #[must_use]
    pub fn best(&self, n: usize) -> Vec<&StoredResult> {
        let mut solved: Vec<&StoredResult> = self
            .results
            .iter()
            .filter(|result| result.record.solved)
            .collect();
        solved.sort_by(|a, b| {
            a.record
                .duration
                .cmp(&b.record.duration)
                .then_with(|| b.created.cmp(&a.created))
        });
        solved.truncate(n);
        solved
    }
}
