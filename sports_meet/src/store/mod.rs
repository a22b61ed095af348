//! JSON snapshot persistence for the meet.
//!
//! Each collection lives in its own file and is always written whole:
//! - `participants.json`: the roster
//! - `sports.json`: the sport catalog
//! - `matches.json`: every match
//!
//! A missing file loads as an empty collection, or the default catalog for
//! sports. Writes go to a temporary file first and are renamed into place.

use log::{debug, info};
use serde::{Serialize, de::DeserializeOwned};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub mod config;

pub use config::{DEFAULT_DATA_DIR, StoreConfig};

use crate::meet::MeetState;
use crate::roster::{Participant, RosterError, SportCatalog, SportConfig};
use crate::schedule::Match;

pub const PARTICIPANTS_FILE: &str = "participants.json";
pub const SPORTS_FILE: &str = "sports.json";
pub const MATCHES_FILE: &str = "matches.json";

/// Snapshot store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed snapshot {path}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid sport catalog: {0}")]
    Catalog(#[from] RosterError),
}

/// Result type for snapshot store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Whole-collection snapshot files in one directory
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    config: StoreConfig,
}

impl SnapshotStore {
    /// Open the store, creating the directory if needed
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        fs::create_dir_all(&config.data_dir).map_err(|source| StoreError::Io {
            path: config.data_dir.clone(),
            source,
        })?;
        debug!("Snapshot store at {}", config.data_dir.display());
        Ok(Self { config })
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Load all collections
    pub fn load(&self) -> StoreResult<MeetState> {
        let participants: Vec<Participant> = self.read_or_default(PARTICIPANTS_FILE)?;
        let matches: Vec<Match> = self.read_or_default(MATCHES_FILE)?;
        let sports = match self.read::<Vec<SportConfig>>(SPORTS_FILE)? {
            Some(sports) => SportCatalog::from_sports(sports)?,
            None => SportCatalog::default(),
        };

        info!(
            "Loaded {} participant(s), {} sport(s), {} match(es) from {}",
            participants.len(),
            sports.len(),
            matches.len(),
            self.config.data_dir.display()
        );

        Ok(MeetState {
            participants,
            sports,
            matches,
        })
    }

    /// Write all collections
    ///
    /// Each file is replaced atomically, but the three files are replaced one
    /// after another. If a later write fails, the directory holds new files
    /// next to old ones (for example a withdrawn participant whose matches
    /// are still listed), and the next [`load`](Self::load) may then reject
    /// the snapshot.
    pub fn save(&self, state: &MeetState) -> StoreResult<()> {
        self.write(PARTICIPANTS_FILE, &state.participants)?;
        self.write(SPORTS_FILE, state.sports.as_slice())?;
        self.write(MATCHES_FILE, &state.matches)?;
        debug!("Saved snapshot to {}", self.config.data_dir.display());
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> StoreResult<Option<T>> {
        let path = self.config.data_dir.join(file);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| StoreError::Serialization { path, source })
    }

    fn read_or_default<T: DeserializeOwned + Default>(&self, file: &str) -> StoreResult<T> {
        Ok(self.read(file)?.unwrap_or_default())
    }

    fn write<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> StoreResult<()> {
        let path = self.config.data_dir.join(file);
        let json = if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
        .map_err(|source| StoreError::Serialization {
            path: path.clone(),
            source,
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path, source })
    }
}
