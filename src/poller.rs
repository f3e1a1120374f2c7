use chrono::{DateTime, Utc};
use event_detector::{format_event, EventDetector, MatchEvent};
use logger::{
    now_iso, CycleHeartbeatEvent, DebugDump, EventLogger, PublishFlags, Publisher, ReportedEvent,
};
use match_feed::{FeedError, MatchFeed};
use serde_json::Value;
use snapshot_store::{Snapshot, SnapshotStore, StoreError};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval:    Duration,
    pub channel_tag: String,
    /// Verbose publishing, context prefix and a debug dump every cycle.
    pub debug:       bool,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval:    Duration::from_secs(6),
            channel_tag: "WorldCup".to_string(),
            debug:       false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub matches:        usize,
    pub details_polled: usize,
    pub events:         usize,
    pub lines:          usize,
}

/// Owns the feed, the sinks and the in-memory snapshot.
pub struct Poller<F, P, S> {
    feed:      F,
    publisher: P,
    store:     S,
    detector:  EventDetector,
    settings:  PollSettings,
    snapshot:  Snapshot,
    journal:   Option<EventLogger>,
    dump:      Option<DebugDump>,
}

impl<F, P, S> Poller<F, P, S>
where
    F: MatchFeed,
    P: Publisher,
    S: SnapshotStore,
{
    /// Loads the persisted snapshot; a store that cannot be read is fatal.
    pub fn new(
        feed: F,
        publisher: P,
        store: S,
        detector: EventDetector,
        settings: PollSettings,
    ) -> Result<Self, StoreError> {
        let snapshot = store.load()?;
        info!("Snapshot loaded: {} match records", snapshot.len());
        Ok(Self {
            feed,
            publisher,
            store,
            detector,
            settings,
            snapshot,
            journal: None,
            dump: None,
        })
    }

    pub fn with_journal(mut self, journal: EventLogger) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn with_debug_dump(mut self, dump: DebugDump) -> Self {
        self.dump = Some(dump);
        self
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// One poll. Works on a copy of the snapshot; the copy only replaces the
    /// committed snapshot when every fetch of the cycle succeeded.
    pub async fn run_cycle(&mut self, now: DateTime<Utc>) -> Result<CycleReport, FeedError> {
        let mut working = self.snapshot.clone();
        let mut events: Vec<MatchEvent> = Vec::new();
        let mut raw_details: Vec<(String, Value)> = Vec::new();

        let listing = self.feed.list_matches().await?;
        let mut report = CycleReport { matches: listing.data.len(), ..Default::default() };

        for summary in &listing.data {
            let record = working.get(&summary.match_id);

            let detail = if self.detector.needs_detail(summary, record, now) {
                let fetched = self.feed.fetch_detail(&summary.match_id).await?;
                report.details_polled += 1;
                raw_details.push((summary.match_id.clone(), fetched.raw));
                Some(fetched.data)
            } else {
                None
            };

            let detection = self.detector.detect(summary, detail.as_ref(), record, now);
            if !detection.events.is_empty() {
                debug!(match_id = %summary.match_id, count = detection.events.len(), "new events");
            }
            events.extend(detection.events);
            working.insert(summary.match_id.clone(), detection.record);
        }

        let formatted: Vec<Option<String>> = events.iter().map(format_event).collect();
        let lines: Vec<String> = formatted.iter().flatten().cloned().collect();
        report.events = events.len();
        report.lines = lines.len();

        if !lines.is_empty() {
            let flags = PublishFlags {
                verbose:         self.settings.debug,
                include_context: self.settings.debug,
            };
            self.publisher.publish(&lines, &self.settings.channel_tag, flags).await;
        }

        self.journal_events(&events, &formatted);
        if !events.is_empty() || self.settings.debug {
            self.dump_raw(now, &listing.raw, &raw_details);
        }

        self.snapshot = working;
        if let Err(e) = self.store.save(&self.snapshot) {
            warn!("Snapshot save failed, keeping state in memory: {}", e);
        }

        Ok(report)
    }

    /// Poll until Ctrl-C. Cycle errors are logged and retried next interval.
    pub async fn run(&mut self) {
        self.run_until(tokio::signal::ctrl_c()).await;
        info!("Ctrl-C received, stopping");
    }

    /// Poll until `shutdown` resolves. It is checked between cycles and is
    /// created once, so a resolution during a cycle stops the loop after it.
    pub async fn run_until<T>(&mut self, shutdown: impl Future<Output = T>) {
        info!("🚀 Polling every {}s", self.settings.interval.as_secs());
        tokio::pin!(shutdown);

        loop {
            let result = self.run_cycle(Utc::now()).await;
            match &result {
                Ok(report) if report.events > 0 => info!(
                    "Cycle: {} matches, {} timelines, {} events, {} published",
                    report.matches, report.details_polled, report.events, report.lines
                ),
                Ok(report) => debug!("Cycle: {} matches, nothing new", report.matches),
                Err(e) if e.is_transport() => warn!("Feed unreachable, retrying: {}", e),
                Err(e) => error!("Cycle failed: {}", e),
            }
            self.heartbeat(&result);

            tokio::select! {
                _ = sleep(self.settings.interval) => {}
                _ = &mut shutdown => break,
            }
        }
    }

    fn journal_events(&self, events: &[MatchEvent], formatted: &[Option<String>]) {
        let Some(journal) = &self.journal else { return };
        for (event, text) in events.iter().zip(formatted) {
            let record = ReportedEvent {
                ts:       now_iso(),
                event:    "MATCH_EVENT",
                match_id: event.match_id(),
                kind:     event.kind(),
                text:     text.as_deref(),
                payload:  event,
            };
            if let Err(e) = journal.log(&record) {
                warn!("Journal write failed: {}", e);
            }
        }
    }

    fn heartbeat(&self, result: &Result<CycleReport, FeedError>) {
        let Some(journal) = &self.journal else { return };
        let report = result.as_ref().cloned().unwrap_or_default();
        let beat = CycleHeartbeatEvent {
            ts:             now_iso(),
            event:          "CYCLE_HEARTBEAT",
            ok:             result.is_ok(),
            matches:        report.matches,
            details_polled: report.details_polled,
            events:         report.events,
            lines:          report.lines,
            error:          result.as_ref().err().map(|e| e.to_string()),
        };
        if let Err(e) = journal.log(&beat) {
            warn!("Journal write failed: {}", e);
        }
    }

    fn dump_raw(&self, now: DateTime<Utc>, matches: &Value, details: &[(String, Value)]) {
        let Some(dump) = &self.dump else { return };
        let ts = now.timestamp();
        dump.write_matches(ts, matches);
        for (match_id, raw) in details {
            dump.write_detail(ts, match_id, raw);
        }
    }
}
