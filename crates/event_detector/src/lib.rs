//! WorldCup Live — Event Detector
//!
//! Turns overlapping match snapshots into events reported exactly once:
//!   - status transitions (finished, starting soon)
//!   - injury time per phase
//!   - timeline markers (goals, cards, half boundaries, VAR ...)
//!
//! Pure and synchronous: no IO, the caller supplies `now` and the timeline.

pub mod detector;
pub mod events;
pub mod flags;
pub mod format;
pub mod record;
pub mod view;

pub use detector::{Detection, DetectorConfig, EventDetector};
pub use events::{
    Attendance, Conditions, InjuryTime, Involvement, MarkerKind, MatchEvent, MatchFinished,
    MatchStarting, Outcome, Scoreline, Stage, TimelineEvent,
};
pub use format::{format_event, format_events};
pub use record::MatchRecord;
