//! WorldCup Live — live reporter
//!
//! Every few seconds:
//!   1. pulls the match list (and the timeline of every active match)
//!   2. detects what is new since the last cycle
//!   3. publishes one line per event to the selected sinks
//!   4. saves what was reported so a restart does not repeat it
//!
//! Run:
//!   cargo run --bin live-reporter -- --mode telegram --mode log

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dotenv::dotenv;
use event_detector::EventDetector;
use logger::{DebugDump, EventLogger, FanoutPublisher, LogPublisher, NtfyPublisher, TelegramPublisher};
use match_feed::FifaFeed;
use snapshot_store::JsonFileStore;
use std::env;
use std::fs::File;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use worldcup_live::{Config, PollSettings, Poller};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Mode {
    Ntfy,
    Telegram,
    Log,
}

#[derive(Debug, Parser)]
#[command(name = "live-reporter", about = "World Cup live match reporter")]
struct Cli {
    /// Debug logging, context-tagged messages, raw response dumps every cycle
    #[arg(long)]
    debug: bool,

    /// Where to publish; repeat for several sinks
    #[arg(long, value_enum, num_args = 1.., default_values_t = [Mode::Log])]
    mode: Vec<Mode>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level))
        )
        .init();

    let config = Config::from_env();

    info!("=== WorldCup Live reporter ===");
    info!("Feed: {}", config.api_base);
    info!("Snapshot: {:?}", config.snapshot_path);
    info!("Logs: {:?}", config.log_dir);

    // Single instance lock
    let lock_file_path = env::temp_dir().join("worldcup_live_reporter.lock");
    let lock_file = File::create(&lock_file_path)
        .with_context(|| format!("create lock file at {:?}", lock_file_path))?;
    let mut lock = fd_lock::RwLock::new(lock_file);
    let _write_guard = match lock.try_write() {
        Ok(guard) => {
            info!("Acquired single-instance lock.");
            guard
        }
        Err(_) => {
            warn!("Another instance of live-reporter is already running! Exiting.");
            return Ok(());
        }
    };

    let feed = FifaFeed::new(&config.api_base, &config.account_key, config.request_timeout())
        .context("build HTTP client")?;
    let publisher = build_publisher(&cli.mode, &config);
    let store = JsonFileStore::new(&config.snapshot_path);
    let settings = PollSettings {
        interval:    config.poll_interval(),
        channel_tag: config.channel_tag.clone(),
        debug:       cli.debug,
    };

    let mut poller = Poller::new(feed, publisher, store, EventDetector::new(config.detector()), settings)
        .with_context(|| format!("load snapshot {:?}", config.snapshot_path))?
        .with_journal(EventLogger::new(&config.log_dir))
        .with_debug_dump(DebugDump::new(&config.debug_dir));

    poller.run().await;
    info!("Stopped. {} match records in snapshot.", poller.snapshot().len());
    Ok(())
}

fn build_publisher(modes: &[Mode], config: &Config) -> FanoutPublisher {
    let mut fanout = FanoutPublisher::new();
    let mut modes = modes.to_vec();
    modes.sort();
    modes.dedup();

    for mode in modes {
        match mode {
            Mode::Log => {
                fanout = fanout.with(LogPublisher);
            }
            Mode::Ntfy => match &config.ntfy_url {
                Some(url) => {
                    info!("📲 ntfy → {}", url);
                    fanout = fanout.with(NtfyPublisher::new(url.clone()));
                }
                None => warn!("--mode ntfy needs NTFY_URL, sink disabled"),
            },
            Mode::Telegram => match (&config.telegram_token, config.telegram_chat_id) {
                (Some(token), Some(chat_id)) => {
                    info!("📲 Telegram → chat {}", chat_id);
                    fanout = fanout.with(TelegramPublisher::new(token.clone(), chat_id));
                }
                _ => warn!("--mode telegram needs TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID, sink disabled"),
            },
        }
    }

    if fanout.is_empty() {
        warn!("No usable sink selected, falling back to log output");
        fanout = fanout.with(LogPublisher);
    }
    fanout
}
