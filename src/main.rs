use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod config;
mod engine;
mod error;
mod game;
mod live;
mod surrender;

use config::Config;
use engine::{ConsoleNotifier, PuntDispatcher};
use live::{run_supervisor, FileFeed, GameFeed, HttpFeed};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let feed: Arc<dyn GameFeed> = if let Some(url) = &config.feed_url {
        info!("Polling play-by-play feed at {}", url);
        Arc::new(HttpFeed::new(
            url,
            Duration::from_secs(config.request_timeout_secs),
        )?)
    } else if let Some(path) = &config.feed_file {
        info!("Replaying play-by-play snapshots from {}", path);
        Arc::new(FileFeed::new(path))
    } else {
        anyhow::bail!("no feed configured");
    };

    let settings = config.poll_settings();
    info!(
        "Poll interval {:?} while games are active, {:?} otherwise",
        settings.active_interval, settings.inactive_interval
    );

    let dispatcher = PuntDispatcher::new(ConsoleNotifier::new(config.output));
    run_supervisor(feed, dispatcher, settings).await;

    Ok(())
}
