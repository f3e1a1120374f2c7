use serde::Serialize;

/// Semantic event produced by the detector. Payload strings already carry
/// their placeholders, so formatting never has to look at the raw feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchEvent {
    MatchStarting(MatchStarting),
    MatchFinished(MatchFinished),
    Attendance(Attendance),
    InjuryTimeAnnounced(InjuryTime),
    Timeline(TimelineEvent),
}

impl MatchEvent {
    pub fn match_id(&self) -> &str {
        match self {
            MatchEvent::MatchStarting(e) => &e.match_id,
            MatchEvent::MatchFinished(e) => &e.match_id,
            MatchEvent::Attendance(e) => &e.match_id,
            MatchEvent::InjuryTimeAnnounced(e) => &e.match_id,
            MatchEvent::Timeline(e) => &e.match_id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MatchEvent::MatchStarting(_) => "match_starting",
            MatchEvent::MatchFinished(_) => "match_finished",
            MatchEvent::Attendance(_) => "attendance",
            MatchEvent::InjuryTimeAnnounced(_) => "injury_time",
            MatchEvent::Timeline(e) => e.kind.name(),
        }
    }
}

/// "round (group)" label shared by the summary-level events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    pub round: String,
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conditions {
    pub description:  String,
    pub temperature:  String,
    pub humidity:     String,
    pub wind_speed:   String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchStarting {
    pub match_id:     String,
    pub stage:        Stage,
    pub match_number: String,
    pub home:         String,
    pub away:         String,
    pub minutes_to_kickoff: i64,
    pub weather:      Conditions,
    pub stadium:      String,
    pub city:         String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Won { winner: String, loser: String },
    /// `winnerTeamId` matched neither side.
    Undecided,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchFinished {
    pub match_id:       String,
    pub stage:          Stage,
    pub home:           String,
    pub away:           String,
    pub home_score:     String,
    pub away_score:     String,
    pub home_penalties: i64,
    pub away_penalties: i64,
    pub outcome:        Outcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attendance {
    pub match_id:   String,
    pub spectators: u64,
    pub stadium:    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InjuryTime {
    pub match_id: String,
    pub phase_id: String,
    pub phase:    String,
    pub minutes:  String,
    pub home:     String,
    pub away:     String,
}

/// Score header printed in front of every timeline line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scoreline {
    pub home_country:   String,
    pub home_flag:      String,
    pub home_score:     String,
    /// Only set when non-zero.
    pub home_penalties: Option<i64>,
    pub away_country:   String,
    pub away_flag:      String,
    pub away_score:     String,
    pub away_penalties: Option<i64>,
    pub minute:         String,
    pub injury_minute:  Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEvent {
    pub match_id:  String,
    pub marker_id: String,
    pub scoreline: Scoreline,
    pub kind:      MarkerKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Involvement {
    pub player: String,
    pub team:   String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerKind {
    CoinToss { referee: String },
    FirstHalf { kickoff_delay_secs: Option<i64> },
    HalfTime,
    SecondHalf,
    FirstPeriodExtraTime,
    SecondPeriodExtraTime,
    VarCancellation { description: String },
    Goal(Involvement),
    OwnGoal(Involvement),
    Penalty(Involvement),
    YellowCard(Involvement),
    RedCard(Involvement),
    GoalkeeperChange(Involvement),
    /// Marked as reported but never published.
    Unclassified { description: String },
}

impl MarkerKind {
    pub fn name(&self) -> &'static str {
        match self {
            MarkerKind::CoinToss { .. } => "coin_toss",
            MarkerKind::FirstHalf { .. } => "first_half",
            MarkerKind::HalfTime => "half_time",
            MarkerKind::SecondHalf => "second_half",
            MarkerKind::FirstPeriodExtraTime => "first_period_extra_time",
            MarkerKind::SecondPeriodExtraTime => "second_period_extra_time",
            MarkerKind::VarCancellation { .. } => "var_cancellation",
            MarkerKind::Goal(_) => "goal",
            MarkerKind::OwnGoal(_) => "own_goal",
            MarkerKind::Penalty(_) => "penalty",
            MarkerKind::YellowCard(_) => "yellow_card",
            MarkerKind::RedCard(_) => "red_card",
            MarkerKind::GoalkeeperChange(_) => "goalkeeper_change",
            MarkerKind::Unclassified { .. } => "unclassified",
        }
    }
}
