//! Flat-file persistence: `fixtures.json`, `records.json` and `tournaments.json`.

use crate::models::{Fixtures, Records, TournamentCounts};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const FIXTURE_FILE: &str = "fixtures.json";
const RECORD_FILE: &str = "records.json";
const TOURNAMENT_FILE: &str = "tournaments.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path} is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// JSON documents in one data directory. Each call reads or writes a whole file.
#[derive(Clone, Debug)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open (and create if needed) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn load_fixtures(&self) -> Result<Fixtures, StoreError> {
        read_json(&self.dir.join(FIXTURE_FILE))
    }

    pub fn save_fixtures(&self, fixtures: &Fixtures) -> Result<(), StoreError> {
        write_json(&self.dir.join(FIXTURE_FILE), fixtures)
    }

    pub fn load_records(&self) -> Result<Records, StoreError> {
        read_json(&self.dir.join(RECORD_FILE))
    }

    pub fn save_records(&self, records: &Records) -> Result<(), StoreError> {
        write_json(&self.dir.join(RECORD_FILE), records)
    }

    /// Stored counters. A malformed file is logged and recomputed from the fixtures.
    pub fn load_counts(&self) -> Result<TournamentCounts, StoreError> {
        match read_json(&self.dir.join(TOURNAMENT_FILE)) {
            Ok(counts) => Ok(counts),
            Err(StoreError::Malformed { path, source }) => {
                log::warn!("{} is malformed ({source}); recomputing counts", path.display());
                self.sync_counts()
            }
            Err(e) => Err(e),
        }
    }

    pub fn save_counts(&self, counts: &TournamentCounts) -> Result<(), StoreError> {
        write_json(&self.dir.join(TOURNAMENT_FILE), counts)
    }

    /// Recompute the counters from a full scan of the fixtures and persist them.
    pub fn sync_counts(&self) -> Result<TournamentCounts, StoreError> {
        let counts = TournamentCounts::from_fixtures(&self.load_fixtures()?);
        self.save_counts(&counts)?;
        Ok(counts)
    }
}

/// Read a whole JSON document; a missing file is the empty document.
fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&text).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a whole JSON document via a temporary file and rename.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    let text = serde_json::to_string_pretty(value).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, text).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)
}
