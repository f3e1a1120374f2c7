use match_feed::MatchStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What has already been reported for one match. Only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Last observed status, `None` until the match is first seen.
    #[serde(default)]
    pub status: Option<MatchStatus>,
    #[serde(default)]
    pub reported_markers: BTreeSet<String>,
    #[serde(default)]
    pub reported_injury_phases: BTreeSet<String>,
    #[serde(default)]
    pub pre_match_sent: bool,
    /// Unix seconds of the cycle that saw the match finish.
    #[serde(default)]
    pub finished_at: Option<i64>,
}

impl MatchRecord {
    pub fn is_marker_reported(&self, marker_id: &str) -> bool {
        self.reported_markers.contains(marker_id)
    }

    pub fn is_phase_reported(&self, phase_id: &str) -> bool {
        self.reported_injury_phases.contains(phase_id)
    }
}
