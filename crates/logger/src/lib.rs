//! WorldCup Live — Logger
//! JSONL event journal, raw response dumps, notification sinks

pub mod dump;
pub mod publish;

pub use dump::DebugDump;
pub use publish::{
    FanoutPublisher, LogPublisher, NtfyPublisher, PublishFlags, Publisher, TelegramPublisher,
};

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

pub struct EventLogger {
    log_dir: PathBuf,
}

impl EventLogger {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        let dir = log_dir.into();
        fs::create_dir_all(&dir).ok();
        Self { log_dir: dir }
    }

    /// Append one record to today's `{log_dir}/{YYYY-MM-DD}.jsonl`.
    pub fn log<T: Serialize>(&self, event: &T) -> Result<()> {
        let date  = Utc::now().format("%Y-%m-%d").to_string();
        let path  = self.log_dir.join(format!("{date}.jsonl"));
        let line  = serde_json::to_string(event)?;
        let mut f = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(f, "{line}")?;
        Ok(())
    }
}

pub fn now_iso() -> String {
    Utc::now().to_rfc3339()
}

// ── Journal records ────────────────────────────────────────────────────────────

/// One detected match event, with the line that was published for it.
#[derive(Serialize, Debug)]
pub struct ReportedEvent<'a, T: Serialize> {
    pub ts:       String,
    pub event:    &'static str,          // "MATCH_EVENT"
    pub match_id: &'a str,
    pub kind:     &'a str,
    pub text:     Option<&'a str>,       // None = not published
    pub payload:  &'a T,
}

#[derive(Serialize, Debug)]
pub struct CycleHeartbeatEvent {
    pub ts:             String,
    pub event:          &'static str,    // "CYCLE_HEARTBEAT"
    pub ok:             bool,
    pub matches:        usize,
    pub details_polled: usize,
    pub events:         usize,
    pub lines:          usize,
    pub error:          Option<String>,
}
