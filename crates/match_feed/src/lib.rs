//! WorldCup Live — Match Feed
//!
//! Fetch adapter for the tournament API:
//!   - `GET {base}/matches`                   → match list (status, teams, results, weather)
//!   - `GET {base}/players/{matchId}/player`  → timeline markers of one match
//!
//! Both calls carry the account key header. The raw JSON is returned next to
//! the typed payload so the caller can dump it for debugging.

pub mod model;

pub use model::{
    Broadcast, InjuryTimeEntry, Marker, MarkerScore, MatchDetail, MatchList, MatchResults,
    MatchStatus, MatchSummary, Referee, ScoreSide, Streams, TeamRef, Venue, Weather,
};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://ipbc-web-fwc2022-sdk.akamaized.net/api/hbs/fwc/2022";
const ACCOUNT_KEY_HEADER: &str = "x-account-key";

/// Typed payload plus the raw body it was decoded from.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub data: T,
    pub raw: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("http client setup failed: {0}")]
    Setup(#[source] reqwest::Error),

    #[error("invalid api base {url}: {reason}")]
    BaseUrl { url: String, reason: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed response from {url}: {reason}")]
    Malformed { url: String, reason: String },
}

impl FeedError {
    /// Network, timeout or non-2xx. Everything else is a data problem.
    pub fn is_transport(&self) -> bool {
        matches!(self, FeedError::Transport { .. } | FeedError::Status { .. })
    }
}

#[async_trait]
pub trait MatchFeed: Send + Sync {
    async fn list_matches(&self) -> Result<Fetched<Vec<MatchSummary>>, FeedError>;
    async fn fetch_detail(&self, match_id: &str) -> Result<Fetched<MatchDetail>, FeedError>;
}

// ── HTTP implementation ──────────────────────────────────────────────────────

pub struct FifaFeed {
    client:      reqwest::Client,
    base_url:    Url,
    account_key: String,
}

impl FifaFeed {
    pub fn new(
        base_url:    impl Into<String>,
        account_key: impl Into<String>,
        timeout:     Duration,
    ) -> Result<Self, FeedError> {
        let base_url = base_url.into();
        let base = Url::parse(&base_url).map_err(|e| FeedError::BaseUrl {
            url:    base_url.clone(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(FeedError::BaseUrl { url: base_url, reason: "not a hierarchical url".into() });
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FeedError::Setup)?;
        Ok(Self {
            client,
            base_url:    base,
            account_key: account_key.into(),
        })
    }

    pub fn matches_url(&self) -> String {
        self.endpoint(&["matches"])
    }

    /// The match id is one percent-encoded path segment.
    pub fn detail_url(&self, match_id: &str) -> String {
        self.endpoint(&["players", match_id, "player"])
    }

    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.to_string()
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<Fetched<T>, FeedError> {
        debug!("GET {}", url);
        let resp = self
            .client
            .get(url)
            .header(ACCOUNT_KEY_HEADER, &self.account_key)
            .send()
            .await
            .map_err(|source| FeedError::Transport { url: url.to_string(), source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Status { url: url.to_string(), status: status.as_u16() });
        }

        let body = resp
            .text()
            .await
            .map_err(|source| FeedError::Transport { url: url.to_string(), source })?;
        decode(url, &body)
    }
}

#[async_trait]
impl MatchFeed for FifaFeed {
    async fn list_matches(&self) -> Result<Fetched<Vec<MatchSummary>>, FeedError> {
        let fetched: Fetched<MatchList> = self.get(&self.matches_url()).await?;
        Ok(Fetched { data: fetched.data.matches, raw: fetched.raw })
    }

    async fn fetch_detail(&self, match_id: &str) -> Result<Fetched<MatchDetail>, FeedError> {
        self.get(&self.detail_url(match_id)).await
    }
}

/// Two-step decode: the raw value survives for the debug dump even when the
/// typed view rejects it.
pub fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<Fetched<T>, FeedError> {
    let raw: Value = serde_json::from_str(body).map_err(|e| FeedError::Malformed {
        url:    url.to_string(),
        reason: format!("invalid json: {e} (body starts {:?})", body.chars().take(120).collect::<String>()),
    })?;
    let data = serde_json::from_value(raw.clone()).map_err(|e| FeedError::Malformed {
        url:    url.to_string(),
        reason: e.to_string(),
    })?;
    Ok(Fetched { data, raw })
}
