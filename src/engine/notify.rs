use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::warn;

use crate::surrender::SurrenderIndex;

/// One reported punt, with the live score at the time it was seen.
#[derive(Debug, Clone, Serialize)]
pub struct PuntNotification {
    pub gamekey: String,
    pub play_id: String,
    pub quarter: u8,
    pub clock: String,
    pub away_team: String,
    pub away_score: i32,
    pub home_team: String,
    pub home_score: i32,
    pub possession_team: String,
    /// Punt spot measured from the punting team's own goal line (0–100)
    pub yards_from_own_goal: u8,
    pub description: String,
    pub factors: SurrenderIndex,
    pub surrender_index: f64,
    pub detected_at: DateTime<Utc>,
}

impl PuntNotification {
    pub fn quarter_label(&self) -> String {
        match self.quarter {
            5 => "OT".to_string(),
            q => format!("Q{}", q),
        }
    }
}

impl fmt::Display for PuntNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}   {} {} - {} {}",
            self.quarter_label(),
            self.clock,
            self.away_team,
            self.away_score,
            self.home_team,
            self.home_score
        )?;
        writeln!(f, "{}", self.description)?;
        write!(f, "Surrender Index: {:>6.2}", self.surrender_index)
    }
}

/// Where reported punts go.
pub trait Notifier {
    fn notify(&mut self, notification: &PuntNotification);
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Three-line human-readable block per punt
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Writes notifications to stdout.
pub struct ConsoleNotifier {
    format: OutputFormat,
}

impl ConsoleNotifier {
    pub fn new(format: OutputFormat) -> Self {
        ConsoleNotifier { format }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notification: &PuntNotification) {
        match self.format {
            OutputFormat::Text => println!("{}\n", notification),
            OutputFormat::Json => match serde_json::to_string(notification) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!(
                    "Failed to serialize punt {} of game {}: {}",
                    notification.play_id, notification.gamekey, e
                ),
            },
        }
    }
}
