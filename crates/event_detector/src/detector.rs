use chrono::{DateTime, Utc};
use match_feed::{Marker, MatchDetail, MatchStatus, MatchSummary, ScoreSide};
use tracing::debug;

use crate::events::{
    Attendance, InjuryTime, Involvement, MarkerKind, MatchEvent, MatchFinished, MatchStarting,
    Outcome, Scoreline, TimelineEvent,
};
use crate::record::MatchRecord;
use crate::view::{self, MatchView};

#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Lead time before kick-off in which the "starting soon" notice may fire.
    pub pre_match_window_secs: i64,
    /// How long after the finish the timeline keeps being polled.
    pub post_match_grace_secs: i64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            pre_match_window_secs: 300,
            post_match_grace_secs: 180,
        }
    }
}

/// Events found in one observation plus the record to store afterwards.
#[derive(Debug, Clone, Default)]
pub struct Detection {
    pub events: Vec<MatchEvent>,
    pub record: MatchRecord,
}

#[derive(Debug, Clone, Default)]
pub struct EventDetector {
    config: DetectorConfig,
}

impl EventDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Whether the timeline of this match has to be fetched before `detect`.
    ///
    /// Only the stored finish time counts: the cycle that first sees a match
    /// finished reports the result without a timeline, the grace cycles after
    /// it pick up trailing markers.
    pub fn needs_detail(&self, summary: &MatchSummary, record: Option<&MatchRecord>, now: DateTime<Utc>) -> bool {
        self.is_active(summary.status(), record.and_then(|r| r.finished_at), now)
    }

    /// Compare a fresh observation with the stored record.
    ///
    /// Per match the events come out as: injury time, timeline markers (by
    /// `startTime`), final result, attendance, pre-match notice. `detail` is
    /// only looked at while the match is active against the stored record.
    pub fn detect(
        &self,
        summary: &MatchSummary,
        detail: Option<&MatchDetail>,
        record: Option<&MatchRecord>,
        now: DateTime<Utc>,
    ) -> Detection {
        let mut record = record.cloned().unwrap_or_default();
        let mut events = Vec::new();
        let view = MatchView::resolve(summary);
        let status = summary.status();
        let previous = record.status;

        let active = self.is_active(status, record.finished_at, now);
        let finishing = is_finish_transition(&record, status);
        if finishing {
            record.finished_at = Some(now.timestamp());
        }

        if active {
            self.injury_times(summary, &view, &mut record, &mut events);
            if let Some(detail) = detail {
                self.markers(detail, &view, &mut record, &mut events);
            }
        }

        if finishing {
            debug!(match_id = %view.match_id, ?previous, "match finished");
            events.push(MatchEvent::MatchFinished(final_result(summary, &view)));
            if view.attendance > 0 {
                events.push(MatchEvent::Attendance(Attendance {
                    match_id:   view.match_id.clone(),
                    spectators: view.attendance,
                    stadium:    view.stadium.clone(),
                }));
            }
        }

        if status == MatchStatus::Scheduled && !record.pre_match_sent {
            if let Some(notice) = self.pre_match(summary, &view, now) {
                record.pre_match_sent = true;
                events.push(MatchEvent::MatchStarting(notice));
            }
        }

        record.status = Some(status);
        Detection { events, record }
    }

    fn is_active(&self, status: MatchStatus, finished_at: Option<i64>, now: DateTime<Utc>) -> bool {
        match status {
            MatchStatus::Live => true,
            MatchStatus::Finished => finished_at
                .is_some_and(|at| now.timestamp() - at < self.config.post_match_grace_secs),
            MatchStatus::Scheduled => false,
        }
    }

    fn pre_match(&self, summary: &MatchSummary, view: &MatchView, now: DateTime<Utc>) -> Option<MatchStarting> {
        let until_kickoff = (summary.kickoff()? - now).num_seconds();
        if until_kickoff <= 0 || until_kickoff > self.config.pre_match_window_secs {
            return None;
        }
        Some(MatchStarting {
            match_id:     view.match_id.clone(),
            stage:        view.stage.clone(),
            match_number: view.match_number.clone(),
            home:         view.home.name.clone(),
            away:         view.away.name.clone(),
            minutes_to_kickoff: whole_minutes(until_kickoff),
            weather:      view.weather.clone(),
            stadium:      view.stadium.clone(),
            city:         view.city.clone(),
        })
    }

    fn injury_times(
        &self,
        summary: &MatchSummary,
        view: &MatchView,
        record: &mut MatchRecord,
        events: &mut Vec<MatchEvent>,
    ) {
        for entry in &summary.injury_times {
            let Some(phase_id) = entry.phase_id.as_deref().map(str::trim) else {
                continue;
            };
            if !record.reported_injury_phases.insert(phase_id.to_string()) {
                continue;
            }
            events.push(MatchEvent::InjuryTimeAnnounced(InjuryTime {
                match_id: view.match_id.clone(),
                phase_id: phase_id.to_string(),
                phase:    phase_name(phase_id),
                minutes:  view::text_or(entry.value.as_deref(), view::NUMBER),
                home:     view.home.name.clone(),
                away:     view.away.name.clone(),
            }));
        }
    }

    fn markers(
        &self,
        detail: &MatchDetail,
        view: &MatchView,
        record: &mut MatchRecord,
        events: &mut Vec<MatchEvent>,
    ) {
        let mut markers: Vec<&Marker> = detail.markers.iter().collect();
        markers.sort_by(|a, b| start_key(a).total_cmp(&start_key(b)));

        for marker in markers {
            if !record.reported_markers.insert(marker.id.clone()) {
                continue;
            }
            let kind = classify(marker, view, detail);
            if let MarkerKind::Unclassified { description } = &kind {
                debug!(match_id = %view.match_id, marker_id = %marker.id, %description, "unclassified marker");
            }
            events.push(MatchEvent::Timeline(TimelineEvent {
                match_id:  view.match_id.clone(),
                marker_id: marker.id.clone(),
                scoreline: scoreline(marker, view),
                kind,
            }));
        }
    }
}

/// A finish only counts after a known non-finished status, and only once.
fn is_finish_transition(record: &MatchRecord, status: MatchStatus) -> bool {
    status == MatchStatus::Finished
        && matches!(record.status, Some(MatchStatus::Scheduled | MatchStatus::Live))
        && record.finished_at.is_none()
}

/// Seconds to minutes, ties to the even minute (150s is 2, 210s is 4).
fn whole_minutes(secs: i64) -> i64 {
    let (minutes, rest) = (secs.div_euclid(60), secs.rem_euclid(60));
    match rest.cmp(&30) {
        std::cmp::Ordering::Less => minutes,
        std::cmp::Ordering::Greater => minutes + 1,
        std::cmp::Ordering::Equal => minutes + minutes % 2,
    }
}

fn start_key(marker: &Marker) -> f64 {
    marker.start_time.unwrap_or(f64::NEG_INFINITY)
}

fn phase_name(phase_id: &str) -> String {
    match phase_id {
        "1" => "1st half".to_string(),
        "2" => "2nd half".to_string(),
        "3" => "3rd phase".to_string(),
        "4" => "4th phase".to_string(),
        other => format!("phase {other}"),
    }
}

fn final_result(summary: &MatchSummary, view: &MatchView) -> MatchFinished {
    let results = summary.results.as_ref();
    let winner_id = results.and_then(|r| r.winner_team_id.as_deref());
    let is = |side: &Option<String>| winner_id.is_some() && side.as_deref() == winner_id;

    let outcome = if is(&view.home.id) {
        Outcome::Won { winner: view.home.name.clone(), loser: view.away.name.clone() }
    } else if is(&view.away.id) {
        Outcome::Won { winner: view.away.name.clone(), loser: view.home.name.clone() }
    } else {
        Outcome::Undecided
    };

    let score = |v: Option<i64>, placeholder: &str| v.map(|s| s.to_string()).unwrap_or_else(|| placeholder.to_string());
    MatchFinished {
        match_id:       view.match_id.clone(),
        stage:          view.stage.clone(),
        home:           view.home.name.clone(),
        away:           view.away.name.clone(),
        home_score:     score(results.and_then(|r| r.score_home), view::HOME_SCORE),
        away_score:     score(results.and_then(|r| r.score_away), view::AWAY_SCORE),
        home_penalties: results.and_then(|r| r.penalty_score_home).unwrap_or(0),
        away_penalties: results.and_then(|r| r.penalty_score_away).unwrap_or(0),
        outcome,
    }
}

fn scoreline(marker: &Marker, view: &MatchView) -> Scoreline {
    let (home, away) = marker_sides(marker);
    let penalties = |side: Option<&ScoreSide>| side.and_then(|s| s.penalty_score).filter(|p| *p != 0);
    Scoreline {
        home_country:   view.home.country.clone(),
        home_flag:      view.home.flag.clone(),
        home_score:     view::score_or(home),
        home_penalties: penalties(home),
        away_country:   view.away.country.clone(),
        away_flag:      view.away.flag.clone(),
        away_score:     view::score_or(away),
        away_penalties: penalties(away),
        minute: marker
            .in_game_time
            .map(|secs| secs.div_euclid(60).to_string())
            .unwrap_or_else(|| view::NUMBER.to_string()),
        injury_minute:  view.injury_minute,
    }
}

fn marker_sides(marker: &Marker) -> (Option<&ScoreSide>, Option<&ScoreSide>) {
    let score = marker.score.as_ref();
    (
        score.and_then(|s| s.home_team.as_ref()),
        score.and_then(|s| s.away_team.as_ref()),
    )
}

fn classify(marker: &Marker, view: &MatchView, detail: &MatchDetail) -> MarkerKind {
    let description = marker.description.as_deref().unwrap_or("").trim();
    match description.to_ascii_lowercase().as_str() {
        "toss coin" => MarkerKind::CoinToss { referee: view.referee.clone() },
        "1st half" => MarkerKind::FirstHalf {
            kickoff_delay_secs: detail.kickoff_delay_secs().filter(|d| *d > 0),
        },
        "half time" => MarkerKind::HalfTime,
        "second half" => MarkerKind::SecondHalf,
        "first period extra time" => MarkerKind::FirstPeriodExtraTime,
        "second period extra time" => MarkerKind::SecondPeriodExtraTime,
        "goal canceled by var" | "card canceled by var" | "penalty canceled by var" => {
            MarkerKind::VarCancellation { description: description.to_string() }
        }
        "goal" => MarkerKind::Goal(involvement(marker)),
        "own goal" => MarkerKind::OwnGoal(involvement(marker)),
        "penalty" => MarkerKind::Penalty(involvement(marker)),
        "yellow card" => MarkerKind::YellowCard(involvement(marker)),
        "red card" => MarkerKind::RedCard(involvement(marker)),
        "goalkeeper change" => MarkerKind::GoalkeeperChange(involvement(marker)),
        _ => MarkerKind::Unclassified { description: description.to_string() },
    }
}

/// Acting player and the team whose id matches `challengerId`.
fn involvement(marker: &Marker) -> Involvement {
    let (home, away) = marker_sides(marker);
    let challenger = marker.challenger_id.as_deref();
    let team = [home, away]
        .into_iter()
        .flatten()
        .find(|side| challenger.is_some() && side.id.as_deref() == challenger)
        .map(|side| view::text_or(side.name.as_deref(), view::TEAM))
        .unwrap_or_else(|| view::TEAM.to_string());

    Involvement {
        player: view::text_or(marker.player_name.as_deref(), view::PLAYER),
        team,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 11, 21, 13, 0, 0).unwrap()
    }

    fn summary(value: serde_json::Value) -> MatchSummary {
        serde_json::from_value(value).unwrap()
    }

    fn detail(value: serde_json::Value) -> MatchDetail {
        serde_json::from_value(value).unwrap()
    }

    fn record(status: MatchStatus) -> MatchRecord {
        MatchRecord { status: Some(status), ..Default::default() }
    }

    fn goal_marker(id: u32, start: f64) -> serde_json::Value {
        json!({
            "id": id,
            "startTime": start,
            "description": "Goal",
            "score": {
                "homeTeam": { "id": "10", "teamNameLong": "England", "score": 1 },
                "awayTeam": { "id": "20", "teamNameLong": "Iran", "score": 0 }
            },
            "challengerId": "10",
            "playerName": "Bellingham",
            "inGameTime": 2110
        })
    }

    fn live_england() -> MatchSummary {
        summary(json!({
            "matchId": "5",
            "status": 3,
            "homeTeam": { "teamId": "10", "teamNameLong": "England", "teamCountryCode": "ENG" },
            "awayTeam": { "teamId": "20", "teamNameLong": "Iran", "teamCountryCode": "IRN" },
            "injuryMinute": 0
        }))
    }

    fn marker_ids(events: &[MatchEvent]) -> Vec<String> {
        events
            .iter()
            .filter_map(|e| match e {
                MatchEvent::Timeline(t) => Some(t.marker_id.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn first_sight_of_finished_match_only_seeds_record() {
        let detector = EventDetector::default();
        let s = summary(json!({ "matchId": "1", "status": 0 }));

        assert!(!detector.needs_detail(&s, None, now()));
        let d = detector.detect(&s, None, None, now());
        assert!(d.events.is_empty());
        assert_eq!(d.record.status, Some(MatchStatus::Finished));
        assert_eq!(d.record.finished_at, None);
    }

    #[test]
    fn finish_transition_fires_once() {
        let detector = EventDetector::default();
        let s = summary(json!({
            "matchId": "1",
            "status": 0,
            "homeTeam": { "teamId": 1, "teamNameLong": "Argentina" },
            "awayTeam": { "teamId": 2, "teamNameLong": "France" },
            "results": { "scoreHome": 3, "scoreAway": 3, "penaltyScoreHome": 4, "penaltyScoreAway": 2, "winnerTeamId": 1 },
            "stadium": { "stadium": "Lusail Stadium" },
            "attendance": 88966
        }));

        let live = record(MatchStatus::Live);
        assert!(!detector.needs_detail(&s, Some(&live), now()));

        let first = detector.detect(&s, None, Some(&live), now());
        assert_eq!(first.events.len(), 2);
        match &first.events[0] {
            MatchEvent::MatchFinished(f) => {
                assert_eq!(f.outcome, Outcome::Won { winner: "Argentina".into(), loser: "France".into() });
                assert_eq!((f.home_penalties, f.away_penalties), (4, 2));
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(matches!(&first.events[1], MatchEvent::Attendance(a) if a.spectators == 88966));
        assert_eq!(first.record.finished_at, Some(now().timestamp()));

        let later = now() + Duration::seconds(6);
        let second = detector.detect(&s, None, Some(&first.record), later);
        assert!(second.events.is_empty());
    }

    #[test]
    fn finish_after_scheduled_counts_as_transition() {
        let detector = EventDetector::default();
        let s = summary(json!({ "matchId": "1", "status": 0 }));
        let d = detector.detect(&s, None, Some(&record(MatchStatus::Scheduled)), now());
        match &d.events[..] {
            [MatchEvent::MatchFinished(f)] => {
                assert_eq!(f.outcome, Outcome::Undecided);
                assert_eq!((f.home_score.as_str(), f.away_score.as_str()), ("Home Score", "Away Score"));
            }
            other => panic!("unexpected events {other:?}"),
        }
    }

    #[test]
    fn kickoff_minutes_round_ties_to_even() {
        assert_eq!(whole_minutes(150), 2);
        assert_eq!(whole_minutes(210), 4);
        assert_eq!(whole_minutes(270), 4);
        assert_eq!(whole_minutes(89), 1);
        assert_eq!(whole_minutes(91), 2);
        assert_eq!(whole_minutes(300), 5);
    }

    #[test]
    fn flapping_status_does_not_finish_twice() {
        let detector = EventDetector::default();
        let finished = summary(json!({ "matchId": "1", "status": 0 }));
        let live = summary(json!({ "matchId": "1", "status": 4 }));

        let a = detector.detect(&finished, None, Some(&record(MatchStatus::Live)), now());
        let b = detector.detect(&live, None, Some(&a.record), now());
        let c = detector.detect(&finished, None, Some(&b.record), now());
        assert_eq!(a.events.len(), 1);
        assert!(c.events.is_empty());
    }

    #[test]
    fn winner_not_matching_either_side_is_undecided() {
        let detector = EventDetector::default();
        let s = summary(json!({
            "matchId": "1",
            "status": 0,
            "homeTeam": { "teamId": 1 },
            "awayTeam": { "teamId": 2 },
            "results": { "winnerTeamId": 99 }
        }));
        let d = detector.detect(&s, None, Some(&record(MatchStatus::Live)), now());
        assert!(matches!(&d.events[0], MatchEvent::MatchFinished(f) if f.outcome == Outcome::Undecided));
    }

    #[test]
    fn pre_match_fires_inside_window_only_once() {
        let detector = EventDetector::default();
        let kickoff = now() + Duration::seconds(200);
        let s = summary(json!({
            "matchId": "1",
            "status": 1,
            "dateUtc": kickoff.format("%Y-%m-%dT%H:%M:%S").to_string()
        }));

        let first = detector.detect(&s, None, None, now());
        assert!(matches!(&first.events[..], [MatchEvent::MatchStarting(m)] if m.minutes_to_kickoff == 3));
        assert!(first.record.pre_match_sent);

        let again = detector.detect(&s, None, Some(&first.record), now() + Duration::seconds(6));
        assert!(again.events.is_empty());
    }

    #[test]
    fn pre_match_window_bounds() {
        let detector = EventDetector::default();
        let at = |secs: i64| {
            summary(json!({
                "matchId": "1",
                "status": 1,
                "dateUtc": (now() + Duration::seconds(secs)).format("%Y-%m-%dT%H:%M:%S").to_string()
            }))
        };
        let fires = |secs| !detector.detect(&at(secs), None, None, now()).events.is_empty();

        assert!(!fires(301));
        assert!(fires(300));
        assert!(fires(1));
        assert!(!fires(0));
        assert!(!fires(-60));
    }

    #[test]
    fn pre_match_without_kickoff_is_skipped() {
        let detector = EventDetector::default();
        let s = summary(json!({ "matchId": "1", "status": 1, "dateUtc": null }));
        let d = detector.detect(&s, None, None, now());
        assert!(d.events.is_empty());
        assert!(!d.record.pre_match_sent);
    }

    #[test]
    fn markers_come_out_sorted_and_deduplicated() {
        let detector = EventDetector::default();
        let s = live_england();
        let dt = detail(json!({ "markers": [goal_marker(10, 10.0), goal_marker(5, 5.0), goal_marker(8, 8.0)] }));

        assert!(detector.needs_detail(&s, None, now()));
        let first = detector.detect(&s, Some(&dt), None, now());
        assert_eq!(marker_ids(&first.events), vec!["5", "8", "10"]);

        let second = detector.detect(&s, Some(&dt), Some(&first.record), now());
        assert!(second.events.is_empty());
    }

    #[test]
    fn duplicate_marker_in_one_response_is_reported_once() {
        let detector = EventDetector::default();
        let dt = detail(json!({ "markers": [goal_marker(1, 1.0), goal_marker(1, 1.0)] }));
        let d = detector.detect(&live_england(), Some(&dt), None, now());
        assert_eq!(marker_ids(&d.events), vec!["1"]);
    }

    #[test]
    fn goal_marker_carries_player_team_and_scoreline() {
        let detector = EventDetector::default();
        let dt = detail(json!({ "markers": [goal_marker(1, 1.0)] }));
        let d = detector.detect(&live_england(), Some(&dt), None, now());

        let MatchEvent::Timeline(t) = &d.events[0] else { panic!("expected timeline event") };
        assert_eq!(t.kind, MarkerKind::Goal(Involvement { player: "Bellingham".into(), team: "England".into() }));
        assert_eq!(t.scoreline.minute, "35");
        assert_eq!(t.scoreline.home_country, "ENG");
        assert_eq!(t.scoreline.away_score, "0");
        assert_eq!(t.scoreline.home_penalties, None);
    }

    #[test]
    fn unclassified_marker_is_still_marked_reported() {
        let detector = EventDetector::default();
        let dt = detail(json!({ "markers": [
            { "id": "a", "startTime": 1, "description": "Substitution" },
            { "id": "b", "startTime": 2 }
        ] }));
        let d = detector.detect(&live_england(), Some(&dt), None, now());

        assert!(d.events.iter().all(|e| matches!(e, MatchEvent::Timeline(t) if matches!(t.kind, MarkerKind::Unclassified { .. }))));
        assert!(d.record.is_marker_reported("a"));
        assert!(d.record.is_marker_reported("b"));
    }

    #[test]
    fn classification_covers_known_descriptions() {
        let view = MatchView::resolve(&live_england());
        let dt = detail(json!({
            "markers": [],
            "streams": { "broadcasts": [{ "officialMatchStart": 100, "realMatchStart": 130 }] }
        }));
        let kind = |desc: &str| {
            let marker = Marker { id: "x".into(), description: Some(desc.into()), ..Default::default() };
            classify(&marker, &view, &dt).name()
        };

        assert_eq!(kind("Toss coin"), "coin_toss");
        assert_eq!(kind("1st half"), "first_half");
        assert_eq!(kind("Half time"), "half_time");
        assert_eq!(kind("Second half"), "second_half");
        assert_eq!(kind("First period extra time"), "first_period_extra_time");
        assert_eq!(kind("Second period extra time"), "second_period_extra_time");
        assert_eq!(kind("Penalty Canceled by VAR"), "var_cancellation");
        assert_eq!(kind("Own goal"), "own_goal");
        assert_eq!(kind("Yellow card"), "yellow_card");
        assert_eq!(kind("Red card"), "red_card");
        assert_eq!(kind("Penalty"), "penalty");
        assert_eq!(kind("Goalkeeper Change"), "goalkeeper_change");
        assert_eq!(kind(""), "unclassified");

        let marker = Marker { id: "x".into(), description: Some("1st half".into()), ..Default::default() };
        assert_eq!(classify(&marker, &view, &dt), MarkerKind::FirstHalf { kickoff_delay_secs: Some(30) });
    }

    #[test]
    fn injury_time_reported_once_per_phase() {
        let detector = EventDetector::default();
        let s = summary(json!({
            "matchId": "9",
            "status": 3,
            "injuryTimes": [{ "phaseId": 1, "value": 14 }, { "phaseId": null, "value": 3 }]
        }));

        let first = detector.detect(&s, None, None, now());
        assert!(matches!(&first.events[..], [MatchEvent::InjuryTimeAnnounced(i)] if i.phase == "1st half" && i.minutes == "14"));
        assert!(first.record.is_phase_reported("1"));

        let second = detector.detect(&s, None, Some(&first.record), now());
        assert!(second.events.is_empty());
    }

    #[test]
    fn grace_window_keeps_detail_polling_after_finish() {
        let detector = EventDetector::default();
        let s = summary(json!({ "matchId": "1", "status": 0 }));
        let finished = MatchRecord {
            status: Some(MatchStatus::Finished),
            finished_at: Some(now().timestamp()),
            ..Default::default()
        };

        assert!(detector.needs_detail(&s, Some(&finished), now() + Duration::seconds(179)));
        assert!(!detector.needs_detail(&s, Some(&finished), now() + Duration::seconds(180)));

        let dt = detail(json!({ "markers": [goal_marker(77, 1.0)] }));
        let trailing = detector.detect(&s, Some(&dt), Some(&finished), now() + Duration::seconds(60));
        assert_eq!(marker_ids(&trailing.events), vec!["77"]);

        let late = detector.detect(&s, Some(&dt), Some(&finished), now() + Duration::seconds(600));
        assert!(late.events.is_empty());
    }

    #[test]
    fn trailing_markers_follow_final_result_on_next_cycle() {
        let detector = EventDetector::default();
        let s = summary(json!({ "matchId": "5", "status": 0 }));
        let dt = detail(json!({ "markers": [goal_marker(3, 1.0)] }));

        let finish = detector.detect(&s, Some(&dt), Some(&record(MatchStatus::Live)), now());
        assert!(matches!(&finish.events[..], [MatchEvent::MatchFinished(_)]));
        assert!(finish.record.reported_markers.is_empty());

        let next = now() + Duration::seconds(6);
        assert!(detector.needs_detail(&s, Some(&finish.record), next));
        let trailing = detector.detect(&s, Some(&dt), Some(&finish.record), next);
        assert_eq!(marker_ids(&trailing.events), vec!["3"]);
    }

    #[test]
    fn scheduled_match_never_polls_detail() {
        let detector = EventDetector::default();
        let s = summary(json!({ "matchId": "1", "status": 1 }));
        assert!(!detector.needs_detail(&s, Some(&record(MatchStatus::Scheduled)), now()));
    }

    #[test]
    fn bare_marker_resolves_placeholders() {
        let detector = EventDetector::default();
        let s = summary(json!({ "matchId": "1", "status": 2 }));
        let dt = detail(json!({ "markers": [{ "id": 1, "description": "Red card" }] }));
        let d = detector.detect(&s, Some(&dt), None, now());

        let MatchEvent::Timeline(t) = &d.events[0] else { panic!("expected timeline event") };
        assert_eq!(t.kind, MarkerKind::RedCard(Involvement { player: "Player".into(), team: "Team".into() }));
        assert_eq!(t.scoreline.home_score, "?");
        assert_eq!(t.scoreline.minute, "?");
        assert_eq!(t.scoreline.home_country, "???");
    }
}
