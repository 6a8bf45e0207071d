use serde::{Deserialize, Serialize};

use super::field::{GameClock, YardLine};
use crate::error::Result;

/// One game as delivered by the live feed.
///
/// Everything except the score fields is fixed once a play has happened; the
/// engine only ever reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub gamekey: String,
    pub home: String,
    pub away: String,
    pub score_home: i32,
    pub score_away: i32,
    pub year: i32,
    pub season_type: SeasonType,
    pub status: GameStatus,
    /// Ordered by `drive_num`.
    #[serde(default)]
    pub drives: Vec<Drive>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drive {
    pub drive_num: u32,
    /// Team with possession for the whole drive
    pub team: String,
    pub result: DriveResult,
    #[serde(default)]
    pub plays: Vec<Play>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Play {
    /// Unique within its game
    #[serde(rename = "playid")]
    pub play_id: String,
    /// 1–4, 5 = overtime
    #[serde(rename = "qtr")]
    pub quarter: u8,
    /// Clock remaining in the quarter, `MM:SS`
    pub time: String,
    /// e.g. `"NE 15"` or `"50"`
    #[serde(rename = "yrdln")]
    pub yard_line: String,
    #[serde(rename = "ydstogo")]
    pub yards_to_go: u32,
    #[serde(rename = "posteam")]
    pub possession_team: String,
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(default)]
    pub touchdown: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonType {
    #[serde(rename = "PRE")]
    Preseason,
    #[serde(rename = "REG")]
    Regular,
    #[serde(rename = "POST")]
    Postseason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Scheduled,
    InProgress,
    Final,
}

/// How a drive ended, parsed from the feed's result label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DriveResult {
    Touchdown,
    FieldGoal,
    /// Any label mentioning a safety (`"Safety"`, `"Fumble, Safety"`, ...)
    Safety(String),
    Fumble,
    Interception,
    Punt,
    Other(String),
}

impl DriveResult {
    pub fn is_turnover(&self) -> bool {
        matches!(self, DriveResult::Fumble | DriveResult::Interception)
    }
}

impl From<&str> for DriveResult {
    fn from(label: &str) -> Self {
        match label {
            "Touchdown" => DriveResult::Touchdown,
            "Field Goal" => DriveResult::FieldGoal,
            "Fumble" => DriveResult::Fumble,
            "Interception" => DriveResult::Interception,
            "Punt" => DriveResult::Punt,
            s if s.contains("Safety") => DriveResult::Safety(s.to_string()),
            s => DriveResult::Other(s.to_string()),
        }
    }
}

impl From<String> for DriveResult {
    fn from(label: String) -> Self {
        DriveResult::from(label.as_str())
    }
}

impl From<DriveResult> for String {
    fn from(result: DriveResult) -> Self {
        match result {
            DriveResult::Touchdown => "Touchdown".into(),
            DriveResult::FieldGoal => "Field Goal".into(),
            DriveResult::Fumble => "Fumble".into(),
            DriveResult::Interception => "Interception".into(),
            DriveResult::Punt => "Punt".into(),
            DriveResult::Safety(label) | DriveResult::Other(label) => label,
        }
    }
}

impl Game {
    pub fn is_home(&self, team: &str) -> bool {
        self.home == team
    }

    /// The team that is not `team`. Anything that isn't the home team is
    /// treated as the away side.
    pub fn opponent(&self, team: &str) -> &str {
        if self.is_home(team) {
            &self.away
        } else {
            &self.home
        }
    }

    /// Resolve a play by its position in the drive/play sequences.
    pub fn play_at(&self, drive_idx: usize, play_idx: usize) -> Option<PlayContext<'_>> {
        let drive = self.drives.get(drive_idx)?;
        let play = drive.plays.get(play_idx)?;
        Some(PlayContext {
            game: self,
            drive,
            play,
        })
    }

    /// Every play of the game in feed order, with its position.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize, &Play)> + '_ {
        self.drives.iter().enumerate().flat_map(|(d, drive)| {
            drive
                .plays
                .iter()
                .enumerate()
                .map(move |(p, play)| (d, p, play))
        })
    }
}

/// A play together with the drive and game it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct PlayContext<'a> {
    pub game: &'a Game,
    pub drive: &'a Drive,
    pub play: &'a Play,
}

impl PlayContext<'_> {
    pub fn yard_line(&self) -> Result<YardLine> {
        self.play.yard_line.parse()
    }

    pub fn clock(&self) -> Result<GameClock> {
        self.play.time.parse()
    }

    pub fn possession_is_home(&self) -> bool {
        self.game.is_home(&self.play.possession_team)
    }
}
