//! Wire model of the tournament API.
//!
//! Only `matchId`/`status` on a match and `id` on a marker are required. Every
//! other field is optional and several of them arrive as either numbers or
//! strings depending on the endpoint. Scalars, nested objects and lists are
//! all read leniently: a value of the wrong shape degrades to `None` (or an
//! empty list) instead of failing the parse of the whole response.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ── Status ───────────────────────────────────────────────────────────────────

/// Match status as reported by the `status` code of the match list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Finished,
}

impl MatchStatus {
    /// `1` is scheduled, anything above is live. `0` is shared by "not
    /// started" and "done"; it maps to `Finished` and the detector decides
    /// from the previous status whether that is an actual transition.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => MatchStatus::Scheduled,
            c if c > 1 => MatchStatus::Live,
            _ => MatchStatus::Finished,
        }
    }
}

// ── Match list ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct MatchList {
    pub matches: Vec<MatchSummary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    #[serde(deserialize_with = "de_id")]
    pub match_id: String,
    pub status: i64,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub round_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub group_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub match_number: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub date_utc: Option<String>,
    #[serde(default, deserialize_with = "de_opt_object")]
    pub home_team: Option<TeamRef>,
    #[serde(default, deserialize_with = "de_opt_object")]
    pub away_team: Option<TeamRef>,
    #[serde(default, deserialize_with = "de_opt_object")]
    pub results: Option<MatchResults>,
    #[serde(default, deserialize_with = "de_opt_object")]
    pub stadium: Option<Venue>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub attendance: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_object")]
    pub weather_conditions: Option<Weather>,
    #[serde(default, deserialize_with = "de_list")]
    pub injury_times: Vec<InjuryTimeEntry>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub injury_minute: Option<i64>,
    #[serde(default, deserialize_with = "de_list")]
    pub referees: Vec<Referee>,
}

impl MatchSummary {
    pub fn status(&self) -> MatchStatus {
        MatchStatus::from_code(self.status)
    }

    /// Kick-off in UTC; `dateUtc` carries no offset, an optional `Z` is accepted.
    pub fn kickoff(&self) -> Option<DateTime<Utc>> {
        let raw = self.date_utc.as_deref()?.trim();
        let raw = raw.strip_suffix('Z').unwrap_or(raw);
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok()
            .map(|naive| naive.and_utc())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub team_id: Option<String>,
    #[serde(default, rename = "teamNameLong", deserialize_with = "de_opt_text")]
    pub name: Option<String>,
    #[serde(default, rename = "teamCountryCode", deserialize_with = "de_opt_text")]
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResults {
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub score_home: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub score_away: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub penalty_score_home: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub penalty_score_away: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub winner_team_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Venue {
    #[serde(default, rename = "stadium", deserialize_with = "de_opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub temperature: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub humidity: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub wind_speed: Option<String>,
    #[serde(default, rename = "name", deserialize_with = "de_opt_text")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjuryTimeEntry {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub phase_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referee {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub popular_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub role: Option<String>,
}

// ── Match detail (player timeline) ───────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchDetail {
    pub markers: Vec<Marker>,
    #[serde(default, deserialize_with = "de_opt_object")]
    pub streams: Option<Streams>,
}

impl MatchDetail {
    /// Seconds between the official and the real kick-off of the first broadcast.
    pub fn kickoff_delay_secs(&self) -> Option<i64> {
        let broadcast = self.streams.as_ref()?.broadcasts.first()?;
        Some(broadcast.real_match_start? - broadcast.official_match_start?)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Streams {
    #[serde(default, deserialize_with = "de_list")]
    pub broadcasts: Vec<Broadcast>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Broadcast {
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub official_match_start: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub real_match_start: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub start_time: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de_opt_object")]
    pub score: Option<MarkerScore>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub challenger_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub player_name: Option<String>,
    /// Seconds since kick-off.
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub in_game_time: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerScore {
    #[serde(default, deserialize_with = "de_opt_object")]
    pub home_team: Option<ScoreSide>,
    #[serde(default, deserialize_with = "de_opt_object")]
    pub away_team: Option<ScoreSide>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSide {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub id: Option<String>,
    #[serde(default, rename = "teamNameLong", deserialize_with = "de_opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub score: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub penalty_score: Option<i64>,
}

// ── Lenient scalar readers ───────────────────────────────────────────────────

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Value::deserialize(d)?;
    scalar_text(&value).ok_or_else(|| D::Error::custom(format!("expected string or number id, got {value}")))
}

fn de_opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().and_then(scalar_text))
}

fn de_opt_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn de_opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

// ── Lenient nested readers ───────────────────────────────────────────────────

/// An optional object that does not fit `T` reads as `None`.
fn de_opt_object<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(d)?;
    Ok(value
        .filter(Value::is_object)
        .and_then(|v| serde_json::from_value(v).ok()))
}

/// `null` or a non-list reads as empty; entries that do not fit `T` are skipped.
fn de_list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn status_codes_map_to_statuses() {
        assert_eq!(MatchStatus::from_code(1), MatchStatus::Scheduled);
        assert_eq!(MatchStatus::from_code(3), MatchStatus::Live);
        assert_eq!(MatchStatus::from_code(0), MatchStatus::Finished);
        assert_eq!(MatchStatus::from_code(-1), MatchStatus::Finished);
    }

    #[test]
    fn parses_full_match_summary() {
        let summary: MatchSummary = serde_json::from_value(json!({
            "matchId": 400128082,
            "status": 3,
            "roundName": "Final",
            "groupName": null,
            "matchNumber": 64,
            "dateUtc": "2022-12-18T15:00:00Z",
            "homeTeam": { "teamId": 43922, "teamNameLong": "Argentina", "teamCountryCode": "ARG" },
            "awayTeam": { "teamId": "43946", "teamNameLong": "France", "teamCountryCode": "FRA" },
            "results": { "scoreHome": 3, "scoreAway": "3", "penaltyScoreHome": 4, "winnerTeamId": 43922 },
            "stadium": { "stadium": "Lusail Stadium", "city": "Lusail" },
            "attendance": 88966,
            "weatherConditions": { "temperature": 24, "humidity": "58", "windSpeed": 12.5, "name": "Sunny" },
            "injuryTimes": [{ "phaseId": 1, "value": 5 }],
            "injuryMinute": null,
            "referees": [{ "popularName": "Marciniak", "role": "REF" }]
        }))
        .unwrap();

        assert_eq!(summary.match_id, "400128082");
        assert_eq!(summary.status(), MatchStatus::Live);
        assert_eq!(summary.kickoff(), Some(Utc.with_ymd_and_hms(2022, 12, 18, 15, 0, 0).unwrap()));
        assert_eq!(summary.match_number.as_deref(), Some("64"));
        assert_eq!(summary.group_name, None);
        assert_eq!(summary.away_team.unwrap().team_id.as_deref(), Some("43946"));
        let results = summary.results.unwrap();
        assert_eq!(results.score_away, Some(3));
        assert_eq!(results.penalty_score_away, None);
        assert_eq!(results.winner_team_id.as_deref(), Some("43922"));
        let weather = summary.weather_conditions.unwrap();
        assert_eq!(weather.wind_speed.as_deref(), Some("12.5"));
        assert_eq!(summary.injury_times[0].phase_id.as_deref(), Some("1"));
        assert_eq!(summary.injury_minute, None);
    }

    #[test]
    fn kickoff_parses_with_and_without_suffix() {
        let mut summary = MatchSummary { date_utc: Some("2022-11-20T16:00:00".into()), ..Default::default() };
        let expected = Utc.with_ymd_and_hms(2022, 11, 20, 16, 0, 0).unwrap();
        assert_eq!(summary.kickoff(), Some(expected));

        summary.date_utc = Some("2022-11-20T16:00:00Z".into());
        assert_eq!(summary.kickoff(), Some(expected));

        summary.date_utc = Some("tomorrow".into());
        assert_eq!(summary.kickoff(), None);
    }

    #[test]
    fn minimal_summary_only_needs_id_and_status() {
        let summary: MatchSummary =
            serde_json::from_value(json!({ "matchId": "7", "status": 1, "homeTeam": null, "injuryTimes": null }))
                .unwrap();
        assert_eq!(summary.match_id, "7");
        assert!(summary.home_team.is_none());
        assert!(summary.injury_times.is_empty());
        assert!(summary.kickoff().is_none());
    }

    #[test]
    fn wrong_shaped_optional_fields_read_as_missing() {
        let summary: MatchSummary = serde_json::from_value(json!({
            "matchId": "9",
            "status": 1,
            "homeTeam": "Qatar",
            "results": [],
            "stadium": "Al Bayt",
            "weatherConditions": "n/a",
            "injuryTimes": { "phaseId": 1, "value": 4 },
            "referees": [{ "popularName": "Orsato", "role": "REF" }, "VAR"]
        }))
        .unwrap();

        assert!(summary.home_team.is_none());
        assert!(summary.results.is_none());
        assert!(summary.stadium.is_none());
        assert!(summary.weather_conditions.is_none());
        assert!(summary.injury_times.is_empty());
        assert_eq!(summary.referees.len(), 1);

        let detail: MatchDetail = serde_json::from_value(json!({
            "markers": [{ "id": 1, "score": "1-0" }],
            "streams": { "broadcasts": "none" }
        }))
        .unwrap();
        assert!(detail.markers[0].score.is_none());
        assert_eq!(detail.kickoff_delay_secs(), None);
    }

    #[test]
    fn one_odd_match_does_not_break_the_list() {
        let list: MatchList = serde_json::from_value(json!({
            "matches": [
                { "matchId": "5", "status": 3 },
                { "matchId": "9", "status": 1, "weatherConditions": "n/a" }
            ]
        }))
        .unwrap();
        assert_eq!(list.matches.len(), 2);
    }

    #[test]
    fn summary_without_status_is_rejected() {
        let parsed = serde_json::from_value::<MatchSummary>(json!({ "matchId": "7" }));
        assert!(parsed.is_err());
    }

    #[test]
    fn detail_reads_markers_and_kickoff_delay() {
        let detail: MatchDetail = serde_json::from_value(json!({
            "markers": [{
                "id": 99,
                "startTime": "12.5",
                "description": "Goal",
                "score": {
                    "homeTeam": { "id": 1, "teamNameLong": "Qatar", "score": 0, "penaltyScore": 0 },
                    "awayTeam": { "id": 2, "teamNameLong": "Ecuador", "score": 1 }
                },
                "challengerId": 2,
                "playerName": "Valencia",
                "inGameTime": 960
            }],
            "streams": { "broadcasts": [{ "officialMatchStart": 1000, "realMatchStart": 1042 }] }
        }))
        .unwrap();

        let marker = &detail.markers[0];
        assert_eq!(marker.id, "99");
        assert_eq!(marker.start_time, Some(12.5));
        assert_eq!(marker.challenger_id.as_deref(), Some("2"));
        assert_eq!(marker.in_game_time, Some(960));
        assert_eq!(detail.kickoff_delay_secs(), Some(42));
    }

    #[test]
    fn detail_without_markers_is_rejected() {
        assert!(serde_json::from_value::<MatchDetail>(json!({ "streams": null })).is_err());
    }
}
