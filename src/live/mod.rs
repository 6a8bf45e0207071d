pub mod diff;
pub mod feed;
pub mod provider;

pub use diff::GameDiff;
pub use feed::{FileFeed, HttpFeed};
pub use provider::GameFeed;

use anyhow::{Context, Result};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::engine::{Notifier, PuntDispatcher};
use crate::game::{Game, GameStatus};

/// Outcome of one successful poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub active: usize,
    pub completed: usize,
    pub notified: usize,
}

/// Turns consecutive feed snapshots into (active, completed, diffs) and hands
/// them to the dispatcher.
#[derive(Debug, Default)]
pub struct LivePoller {
    /// gamekey → play ids present in the previous snapshot
    seen: HashMap<String, HashSet<String>>,
    /// Games that were in progress at the previous poll
    was_active: HashSet<String>,
}

struct Partition {
    active: Vec<Game>,
    completed: Vec<Game>,
    diffs: Vec<GameDiff>,
}

impl LivePoller {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn poll_once<N: Notifier>(
        &mut self,
        feed: &dyn GameFeed,
        dispatcher: &mut PuntDispatcher<N>,
    ) -> Result<CycleReport> {
        let games = feed
            .fetch_games()
            .await
            .with_context(|| format!("Feed '{}' failed", feed.name()))?;

        let partition = self.partition(games);
        let notified = dispatcher
            .on_cycle(&partition.active, &partition.completed, &partition.diffs)
            .context("Punt dispatch failed")?;
        self.remember(&partition);

        Ok(CycleReport {
            active: partition.active.len(),
            completed: partition.completed.len(),
            notified,
        })
    }

    /// Active = in progress. Completed = final now, in progress last poll.
    /// Both get a diff of the plays not seen before.
    fn partition(&self, games: Vec<Game>) -> Partition {
        let mut active = Vec::new();
        let mut completed = Vec::new();
        let mut diffs = Vec::new();

        for game in games {
            let bucket = match game.status {
                GameStatus::InProgress => &mut active,
                GameStatus::Final if self.was_active.contains(&game.gamekey) => &mut completed,
                _ => continue,
            };

            let diff = match self.seen.get(&game.gamekey) {
                Some(seen) => GameDiff::since(game.clone(), seen),
                None => GameDiff::full(game.clone()),
            };
            if !diff.is_empty() {
                debug!("Game {}: {} new play(s)", game.gamekey, diff.len());
                diffs.push(diff);
            }
            bucket.push(game);
        }

        Partition {
            active,
            completed,
            diffs,
        }
    }

    fn remember(&mut self, partition: &Partition) {
        for game in &partition.active {
            let ids = self.seen.entry(game.gamekey.clone()).or_default();
            ids.extend(game.positions().map(|(_, _, play)| play.play_id.clone()));
        }
        for game in &partition.completed {
            self.seen.remove(&game.gamekey);
        }
        self.was_active = partition
            .active
            .iter()
            .map(|g| g.gamekey.clone())
            .collect();
    }
}

/// Poll cadence and failure backoff for the supervisor.
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub active_interval: Duration,
    pub inactive_interval: Duration,
    pub max_backoff: Duration,
}

impl PollSettings {
    fn interval_for(&self, report: &CycleReport) -> Duration {
        if report.active > 0 {
            self.active_interval
        } else {
            self.inactive_interval
        }
    }
}

/// Exponential backoff (1s doubling up to `max`) with up to 25% jitter.
#[derive(Debug)]
pub struct Backoff {
    current: Duration,
    max: Duration,
}

impl Backoff {
    const INITIAL: Duration = Duration::from_secs(1);

    pub fn new(max: Duration) -> Self {
        Backoff {
            current: Self::INITIAL.min(max),
            max,
        }
    }

    pub fn next_delay(&mut self) -> Duration {
        let base = self.current;
        self.current = (self.current * 2).min(self.max);
        let jitter = rand::thread_rng().gen_range(0.0..=0.25);
        base.mul_f64(1.0 + jitter)
    }

    pub fn reset(&mut self) {
        self.current = Self::INITIAL.min(self.max);
    }
}

/// Poll forever. A failed cycle is logged, followed by a blank line on
/// stdout, and polling restarts from an empty snapshot after a backoff. The
/// dispatcher (and with it the score cache and punt ledger) survives
/// restarts.
pub async fn run_supervisor<N: Notifier>(
    feed: Arc<dyn GameFeed>,
    mut dispatcher: PuntDispatcher<N>,
    settings: PollSettings,
) {
    info!("Starting up live listener ({} feed)", feed.name());

    let mut poller = LivePoller::new();
    let mut backoff = Backoff::new(settings.max_backoff);

    loop {
        let wait = match poller.poll_once(feed.as_ref(), &mut dispatcher).await {
            Ok(report) => {
                backoff.reset();
                debug!(
                    "Cycle done: {} active, {} completed, {} punt(s) reported ({} total, {} teams cached)",
                    report.active,
                    report.completed,
                    report.notified,
                    dispatcher.ledger().len(),
                    dispatcher.scores().len()
                );
                settings.interval_for(&report)
            }
            Err(e) => {
                error!("Error occurred: {:#}", e);
                println!();
                poller = LivePoller::new();
                let delay = backoff.next_delay();
                info!("Restarting poll in {:.1}s", delay.as_secs_f64());
                delay
            }
        };
        tokio::time::sleep(wait).await;
    }
}
