//! Placeholder resolution.
//!
//! Every optional feed field is read here exactly once and replaced by a
//! fixed placeholder when missing. The detector builds events from the
//! resolved view only.

use crate::events::{Conditions, Stage};
use crate::flags::flag_for;
use match_feed::{MatchSummary, ScoreSide, TeamRef};

pub const ROUND: &str = "Round";
pub const HOME_TEAM: &str = "Home Team";
pub const AWAY_TEAM: &str = "Away Team";
pub const STADIUM: &str = "Stadium";
pub const CITY: &str = "City";
pub const WEATHER: &str = "Weather";
pub const READING: &str = "??";
pub const NUMBER: &str = "?";
pub const SCORE: &str = "?";
pub const HOME_SCORE: &str = "Home Score";
pub const AWAY_SCORE: &str = "Away Score";
pub const COUNTRY: &str = "???";
pub const PLAYER: &str = "Player";
pub const TEAM: &str = "Team";
pub const REFEREE: &str = "Referee";

/// Role code of the main referee in `referees`.
const MAIN_REFEREE_ROLE: &str = "REF";

#[derive(Debug, Clone)]
pub struct Side {
    pub id:      Option<String>,
    pub name:    String,
    pub country: String,
    pub flag:    String,
}

impl Side {
    fn resolve(team: Option<&TeamRef>, placeholder: &str) -> Self {
        let country_code = team.and_then(|t| non_empty(t.country_code.as_deref()));
        Self {
            id:      team.and_then(|t| t.team_id.clone()),
            name:    text_or(team.and_then(|t| t.name.as_deref()), placeholder),
            country: text_or(country_code, COUNTRY),
            flag:    country_code.and_then(flag_for).unwrap_or_default(),
        }
    }
}

/// Summary fields with placeholders applied.
#[derive(Debug, Clone)]
pub struct MatchView {
    pub match_id:      String,
    pub stage:         Stage,
    pub match_number:  String,
    pub home:          Side,
    pub away:          Side,
    pub stadium:       String,
    pub city:          String,
    pub weather:       Conditions,
    pub referee:       String,
    pub injury_minute: Option<i64>,
    pub attendance:    u64,
}

impl MatchView {
    pub fn resolve(summary: &MatchSummary) -> Self {
        let venue = summary.stadium.as_ref();
        let weather = summary.weather_conditions.as_ref();
        let referee = summary
            .referees
            .iter()
            .find(|r| r.role.as_deref().map(str::trim) == Some(MAIN_REFEREE_ROLE))
            .and_then(|r| non_empty(r.popular_name.as_deref()))
            .map(|name| format!("{REFEREE} {name}"))
            .unwrap_or_else(|| REFEREE.to_string());

        Self {
            match_id: summary.match_id.clone(),
            stage: Stage {
                round: text_or(summary.round_name.as_deref(), ROUND),
                group: non_empty(summary.group_name.as_deref()).map(str::to_string),
            },
            match_number: text_or(summary.match_number.as_deref(), NUMBER),
            home: Side::resolve(summary.home_team.as_ref(), HOME_TEAM),
            away: Side::resolve(summary.away_team.as_ref(), AWAY_TEAM),
            stadium: text_or(venue.and_then(|v| v.name.as_deref()), STADIUM),
            city: text_or(venue.and_then(|v| v.city.as_deref()), CITY),
            weather: Conditions {
                description: text_or(weather.and_then(|w| w.description.as_deref()), WEATHER),
                temperature: text_or(weather.and_then(|w| w.temperature.as_deref()), READING),
                humidity:    text_or(weather.and_then(|w| w.humidity.as_deref()), READING),
                wind_speed:  text_or(weather.and_then(|w| w.wind_speed.as_deref()), READING),
            },
            referee,
            injury_minute: summary.injury_minute.filter(|m| *m != 0),
            attendance: summary.attendance.filter(|a| *a > 0).map(|a| a as u64).unwrap_or(0),
        }
    }
}

pub(crate) fn text_or(value: Option<&str>, placeholder: &str) -> String {
    non_empty(value).unwrap_or(placeholder).to_string()
}

pub(crate) fn score_or(side: Option<&ScoreSide>) -> String {
    side.and_then(|s| s.score).map(|s| s.to_string()).unwrap_or_else(|| SCORE.to_string())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
