use event_detector::DetectorConfig;
use match_feed::DEFAULT_API_BASE;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_ACCOUNT_KEY: &str = "2fy22ueTc";

/// Everything the reporter reads from the environment (`.env` included).
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base:              String,
    pub account_key:           String,
    pub poll_interval_secs:    u64,
    pub pre_match_window_secs: i64,
    pub post_match_grace_secs: i64,
    pub request_timeout_secs:  u64,
    pub snapshot_path:         PathBuf,
    pub log_dir:               PathBuf,
    pub debug_dir:             PathBuf,
    pub channel_tag:           String,
    pub ntfy_url:              Option<String>,
    pub telegram_token:        Option<String>,
    pub telegram_chat_id:      Option<i64>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset, empty or unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let text = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let number = |key: &str| text(key).and_then(|v| v.parse::<i64>().ok());

        Self {
            api_base: text("WORLDCUP_API_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            account_key: text("WORLDCUP_ACCOUNT_KEY").unwrap_or_else(|| DEFAULT_ACCOUNT_KEY.to_string()),
            poll_interval_secs: number("POLL_INTERVAL_SECS")
                .filter(|v| *v > 0)
                .map_or(6, |v| v as u64),
            pre_match_window_secs: number("PRE_MATCH_WINDOW_SECS").filter(|v| *v > 0).unwrap_or(300),
            post_match_grace_secs: number("POST_MATCH_GRACE_SECS").filter(|v| *v >= 0).unwrap_or(180),
            request_timeout_secs: number("REQUEST_TIMEOUT_SECS")
                .filter(|v| *v > 0)
                .map_or(10, |v| v as u64),
            snapshot_path: text("SNAPSHOT_PATH").unwrap_or_else(|| "data/worldcup.json".into()).into(),
            log_dir: text("LOG_DIR").unwrap_or_else(|| "logs".into()).into(),
            debug_dir: text("DEBUG_DIR").unwrap_or_else(|| "debug".into()).into(),
            channel_tag: text("CHANNEL_TAG").unwrap_or_else(|| "WorldCup".into()),
            ntfy_url: text("NTFY_URL"),
            telegram_token: text("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id: number("TELEGRAM_CHAT_ID"),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn detector(&self) -> DetectorConfig {
        DetectorConfig {
            pre_match_window_secs: self.pre_match_window_secs,
            post_match_grace_secs: self.post_match_grace_secs,
        }
    }
}
