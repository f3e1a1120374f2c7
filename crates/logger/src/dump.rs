//! Raw upstream responses written next to the logs for debugging.
//! Best effort: a failed write is logged and otherwise ignored.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct DebugDump {
    dir: PathBuf,
}

impl DebugDump {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `{dir}/{ts}-matches.json`
    pub fn write_matches(&self, ts: i64, raw: &Value) {
        self.write(&format!("{ts}-matches.json"), raw);
    }

    /// `{dir}/{ts}-player-{match_id}.json`
    pub fn write_detail(&self, ts: i64, match_id: &str, raw: &Value) {
        self.write(&format!("{ts}-player-{}.json", file_safe(match_id)), raw);
    }

    fn write(&self, name: &str, raw: &Value) {
        let path = self.dir.join(name);
        let result = fs::create_dir_all(&self.dir)
            .and_then(|_| serde_json::to_vec_pretty(raw).map_err(std::io::Error::other))
            .and_then(|data| fs::write(&path, data));
        match result {
            Ok(()) => debug!("dumped {:?}", path),
            Err(e) => warn!("debug dump {:?} failed: {}", path, e),
        }
    }
}

/// Anything but ASCII alphanumerics, `-` and `_` becomes `_`.
fn file_safe(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
