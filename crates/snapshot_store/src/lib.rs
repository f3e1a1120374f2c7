//! WorldCup Live — Snapshot Store
//!
//! Durable record of what has already been reported, keyed by match id.
//! Loaded once at startup, saved after every successful cycle.

use event_detector::MatchRecord;
use match_feed::MatchStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

pub type Snapshot = BTreeMap<String, MatchRecord>;

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("snapshot io on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot {path} is not valid: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("snapshot version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },
}

pub trait SnapshotStore {
    /// Empty snapshot when nothing was saved yet.
    fn load(&self) -> Result<Snapshot, StoreError>;
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    version: u32,
    #[serde(default)]
    matches: Snapshot,
}

#[derive(Debug, Serialize)]
struct SnapshotFileRef<'a> {
    version: u32,
    matches: &'a Snapshot,
}

// ── JSON file ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.display().to_string(), source }
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Snapshot, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no snapshot at {:?}, starting empty", self.path);
                return Ok(Snapshot::new());
            }
            Err(e) => return Err(self.io_err(e)),
        };

        let file: SnapshotFile = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: self.path.display().to_string(),
            source,
        })?;
        if file.version != SNAPSHOT_VERSION {
            return Err(StoreError::VersionMismatch { found: file.version, expected: SNAPSHOT_VERSION });
        }

        debug!("loaded {} match records from {:?}", file.matches.len(), self.path);
        Ok(file.matches)
    }

    /// Write to a sibling temp file, fsync, then rename over the old snapshot.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }

        let data = serde_json::to_vec_pretty(&SnapshotFileRef { version: SNAPSHOT_VERSION, matches: snapshot })?;
        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path).map_err(|e| self.io_err(e))?;
            file.write_all(&data).map_err(|e| self.io_err(e))?;
            file.sync_all().map_err(|e| self.io_err(e))?;
        }
        fs::rename(&temp_path, &self.path).map_err(|e| self.io_err(e))?;

        debug!("saved {} bytes to {:?}", data.len(), self.path);
        Ok(())
    }
}

// ── Stats ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotStats {
    pub records:                usize,
    pub unknown:                usize,
    pub scheduled:              usize,
    pub live:                   usize,
    pub finished:               usize,
    pub reported_markers:       usize,
    pub reported_injury_phases: usize,
    pub pre_match_sent:         usize,
}

pub fn summarize(snapshot: &Snapshot) -> SnapshotStats {
    let mut stats = SnapshotStats { records: snapshot.len(), ..Default::default() };
    for record in snapshot.values() {
        match record.status {
            None => stats.unknown += 1,
            Some(MatchStatus::Scheduled) => stats.scheduled += 1,
            Some(MatchStatus::Live) => stats.live += 1,
            Some(MatchStatus::Finished) => stats.finished += 1,
        }
        stats.reported_markers += record.reported_markers.len();
        stats.reported_injury_phases += record.reported_injury_phases.len();
        stats.pre_match_sent += usize::from(record.pre_match_sent);
    }
    stats
}
