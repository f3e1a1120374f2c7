//! Notification sinks.
//!
//! Publishing is fire-and-forget: a sink logs its own failures and never
//! hands them back to the poll loop.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishFlags {
    /// Log every published line.
    pub verbose: bool,
    /// Prefix every line with `[{channel_tag}]`.
    pub include_context: bool,
}

#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, lines: &[String], channel_tag: &str, flags: PublishFlags);
}

pub fn render(line: &str, channel_tag: &str, flags: PublishFlags) -> String {
    if flags.include_context {
        format!("[{channel_tag}] {line}")
    } else {
        line.to_string()
    }
}

fn trace_batch(lines: &[String], channel_tag: &str, flags: PublishFlags) {
    if flags.verbose {
        for line in lines {
            info!(channel = channel_tag, "{}", line);
        }
    }
}

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

// ── tracing only ─────────────────────────────────────────────────────────────

/// Writes lines to the log instead of a remote channel.
#[derive(Debug, Default)]
pub struct LogPublisher;

#[async_trait]
impl Publisher for LogPublisher {
    async fn publish(&self, lines: &[String], channel_tag: &str, flags: PublishFlags) {
        for line in lines {
            info!("📣 {}", render(line, channel_tag, flags));
        }
    }
}

// ── ntfy ─────────────────────────────────────────────────────────────────────

pub struct NtfyPublisher {
    client: reqwest::Client,
    url:    String,
}

impl NtfyPublisher {
    /// `url` is the full topic URL, e.g. `https://ntfy.sh/worldcup`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { client: http_client(), url: url.into() }
    }
}

#[async_trait]
impl Publisher for NtfyPublisher {
    async fn publish(&self, lines: &[String], channel_tag: &str, flags: PublishFlags) {
        if lines.is_empty() {
            return;
        }
        trace_batch(lines, channel_tag, flags);

        for line in lines {
            match self
                .client
                .post(&self.url)
                .header("Title", channel_tag)
                .header("Tags", "soccer")
                .body(render(line, channel_tag, flags))
                .send()
                .await
            {
                Ok(resp) if resp.status().is_success() => debug!("NTFY sent: {}", line),
                Ok(resp) => warn!("NTFY rejected {}: HTTP {}", line, resp.status()),
                Err(e)   => warn!("NTFY failed: {}", e),
            }
        }
    }
}

// ── Telegram ─────────────────────────────────────────────────────────────────

pub struct TelegramPublisher {
    client:  reqwest::Client,
    token:   String,
    chat_id: i64,
}

impl TelegramPublisher {
    pub fn new(token: impl Into<String>, chat_id: i64) -> Self {
        Self { client: http_client(), token: token.into(), chat_id }
    }

    async fn send_message(&self, text: &str) -> anyhow::Result<()> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.token);
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
            "disable_web_page_preview": true,
        });
        let resp = self.client.post(&url).json(&body).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Telegram sendMessage failed: {} — {}", status, body);
        }
        Ok(())
    }
}

#[async_trait]
impl Publisher for TelegramPublisher {
    async fn publish(&self, lines: &[String], channel_tag: &str, flags: PublishFlags) {
        if lines.is_empty() {
            return;
        }
        trace_batch(lines, channel_tag, flags);

        for line in lines {
            if let Err(e) = self.send_message(&render(line, channel_tag, flags)).await {
                warn!("{}", e);
            }
        }
    }
}

// ── Fan-out ──────────────────────────────────────────────────────────────────

/// Hands the same batch to every sink, in order.
#[derive(Default)]
pub struct FanoutPublisher {
    sinks: Vec<Box<dyn Publisher>>,
}

impl FanoutPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl Publisher + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl Publisher for FanoutPublisher {
    async fn publish(&self, lines: &[String], channel_tag: &str, flags: PublishFlags) {
        if lines.is_empty() {
            debug!("nothing to publish");
            return;
        }
        for sink in &self.sinks {
            sink.publish(lines, channel_tag, flags).await;
        }
    }
}
