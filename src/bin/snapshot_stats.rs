use anyhow::{Context, Result};
use snapshot_store::{summarize, JsonFileStore, SnapshotStore};

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SNAPSHOT_PATH").ok())
        .unwrap_or_else(|| "data/worldcup.json".to_string());

    let store = JsonFileStore::new(&path);
    let snapshot = store.load().with_context(|| format!("load snapshot at {path}"))?;
    let stats = summarize(&snapshot);

    println!("snapshot_path={path}");
    println!("records: {}", stats.records);
    println!(
        "status: scheduled={} live={} finished={} unknown={}",
        stats.scheduled, stats.live, stats.finished, stats.unknown
    );
    println!("reported_markers: {}", stats.reported_markers);
    println!("reported_injury_phases: {}", stats.reported_injury_phases);
    println!("pre_match_sent: {}", stats.pre_match_sent);

    let latest = snapshot
        .iter()
        .filter_map(|(id, r)| r.finished_at.map(|at| (at, id)))
        .max();
    match latest.and_then(|(at, id)| chrono::DateTime::from_timestamp(at, 0).map(|ts| (ts, id))) {
        Some((ts, id)) => println!("last_finished: match={id} at={}", ts.to_rfc3339()),
        None => println!("last_finished: <none>"),
    }

    Ok(())
}
