use clap::Parser;
use std::time::Duration;

use crate::engine::OutputFormat;
use crate::live::PollSettings;

/// Live NFL punt monitor: reports every punt with its surrender index
#[derive(Parser, Debug, Clone)]
#[command(name = "surrender-index", version, about)]
pub struct Config {
    /// Play-by-play feed URL returning `{"games": [...]}`
    #[arg(long, env = "FEED_URL", conflicts_with = "feed_file")]
    pub feed_url: Option<String>,

    /// Read snapshots from a local JSON file instead of a URL
    #[arg(long, env = "FEED_FILE")]
    pub feed_file: Option<String>,

    /// Poll interval while at least one game is in progress
    #[arg(long, env = "ACTIVE_INTERVAL_SECS", default_value = "15")]
    pub active_interval_secs: u64,

    /// Poll interval while no game is in progress
    #[arg(long, env = "INACTIVE_INTERVAL_SECS", default_value = "900")]
    pub inactive_interval_secs: u64,

    /// HTTP request timeout for the feed
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "10")]
    pub request_timeout_secs: u64,

    /// Upper bound for the retry backoff after a failed cycle
    #[arg(long, env = "MAX_BACKOFF_SECS", default_value = "30")]
    pub max_backoff_secs: u64,

    /// Notification output format
    #[arg(long, env = "OUTPUT", value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (&self.feed_url, &self.feed_file) {
            (None, None) => anyhow::bail!("one of --feed-url (FEED_URL) or --feed-file (FEED_FILE) is required"),
            (Some(_), Some(_)) => anyhow::bail!("--feed-url and --feed-file are mutually exclusive"),
            (Some(url), None) => {
                let parsed = url::Url::parse(url)
                    .map_err(|e| anyhow::anyhow!("invalid feed URL {:?}: {}", url, e))?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    anyhow::bail!("feed URL must be http or https, got {}", parsed.scheme());
                }
            }
            (None, Some(_)) => {}
        }
        if self.active_interval_secs == 0 || self.inactive_interval_secs == 0 {
            anyhow::bail!("poll intervals must be positive");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be positive");
        }
        if self.max_backoff_secs == 0 {
            anyhow::bail!("max_backoff_secs must be positive");
        }
        Ok(())
    }

    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            active_interval: Duration::from_secs(self.active_interval_secs),
            inactive_interval: Duration::from_secs(self.inactive_interval_secs),
            max_backoff: Duration::from_secs(self.max_backoff_secs),
        }
    }
}
