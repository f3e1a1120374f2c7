//! Text templates, one per event kind.

use crate::events::{
    Attendance, InjuryTime, MarkerKind, MatchEvent, MatchFinished, MatchStarting, Outcome,
    Scoreline, Stage, TimelineEvent,
};

/// Render an event as one notification line. `None` for unclassified markers.
pub fn format_event(event: &MatchEvent) -> Option<String> {
    match event {
        MatchEvent::MatchStarting(e) => Some(starting(e)),
        MatchEvent::MatchFinished(e) => Some(finished(e)),
        MatchEvent::Attendance(e) => Some(attendance(e)),
        MatchEvent::InjuryTimeAnnounced(e) => Some(injury_time(e)),
        MatchEvent::Timeline(e) => timeline(e),
    }
}

/// Lines for a batch of events, unclassified ones dropped, order kept.
pub fn format_events(events: &[MatchEvent]) -> Vec<String> {
    events.iter().filter_map(format_event).collect()
}

fn stage(stage: &Stage) -> String {
    match &stage.group {
        Some(group) => format!("{} ({})", stage.round, group),
        None => stage.round.clone(),
    }
}

fn starting(e: &MatchStarting) -> String {
    format!(
        "{} match #{} between {} and {} is starting in {} minutes! Weather is {} with {}c, {}% humidity and {}km/h winds at {} in {}",
        stage(&e.stage),
        e.match_number,
        e.home,
        e.away,
        e.minutes_to_kickoff,
        e.weather.description,
        e.weather.temperature,
        e.weather.humidity,
        e.weather.wind_speed,
        e.stadium,
        e.city,
    )
}

fn finished(e: &MatchFinished) -> String {
    let final_score = format!("Final score: {} {} - {} {}", e.home, e.home_score, e.away_score, e.away);
    let mut line = match &e.outcome {
        Outcome::Won { winner, loser } => {
            format!("{} has won {} match against {}! {}", winner, stage(&e.stage), loser, final_score)
        }
        Outcome::Undecided => format!("{} match has finished! {}", stage(&e.stage), final_score),
    };
    if e.home_penalties > 0 || e.away_penalties > 0 {
        line.push_str(&format!(" ({} - {} after penalties)", e.home_penalties, e.away_penalties));
    }
    line
}

fn attendance(e: &Attendance) -> String {
    format!("{} spectators were in {}", thousands(e.spectators), e.stadium)
}

fn injury_time(e: &InjuryTime) -> String {
    format!("{} vs. {} - {} minutes extra time for {}", e.home, e.away, e.minutes, e.phase)
}

fn scoreline(s: &Scoreline) -> String {
    let penalties = |p: Option<i64>| p.map(|p| format!("(+{p})")).unwrap_or_default();
    let injury = s.injury_minute.map(|m| format!("+{m}\u{2032}")).unwrap_or_default();
    format!(
        "{} {} {}{} - {}{} {} {} [{}\u{2032}{}]",
        s.home_country,
        s.home_flag,
        s.home_score,
        penalties(s.home_penalties),
        s.away_score,
        penalties(s.away_penalties),
        s.away_flag,
        s.away_country,
        s.minute,
        injury,
    )
}

fn timeline(e: &TimelineEvent) -> Option<String> {
    let action = match &e.kind {
        MarkerKind::CoinToss { referee } => format!("{referee} tosses the coin"),
        MarkerKind::FirstHalf { kickoff_delay_secs } => match kickoff_delay_secs {
            Some(delay) if *delay > 0 => {
                format!("1st half is starting. Match started {delay} seconds after official time")
            }
            _ => "1st half is starting".to_string(),
        },
        MarkerKind::HalfTime => "Half time break".to_string(),
        MarkerKind::SecondHalf => "2nd half is starting".to_string(),
        MarkerKind::FirstPeriodExtraTime => "First period extra time declared".to_string(),
        MarkerKind::SecondPeriodExtraTime => "Second period extra time declared".to_string(),
        MarkerKind::VarCancellation { description } => format!("{description}!"),
        MarkerKind::Goal(i) => format!("Goal! {} scores for {}!", i.player, i.team),
        MarkerKind::OwnGoal(i) => format!("Oh no! Own goal! {} scores for {}!", i.player, i.team),
        MarkerKind::Penalty(i) => format!("Penalty kick for {}! {} will take the shot", i.team, i.player),
        MarkerKind::YellowCard(i) => format!("Yellow card for {} from {}!", i.player, i.team),
        MarkerKind::RedCard(i) => format!("Red card for {} from {}!", i.player, i.team),
        MarkerKind::GoalkeeperChange(i) => format!("Goalkeeper change for {}!", i.team),
        MarkerKind::Unclassified { .. } => return None,
    };
    Some(format!("{} - {}", scoreline(&e.scoreline), action))
}

/// `88966` → `88,966`
fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
