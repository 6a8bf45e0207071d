//! Field primitives parsed out of the feed's free-text play fields.

use std::fmt;
use std::str::FromStr;

use crate::error::SurrenderError;

/// Ball position as reported by the feed: `"NE 15"`, `"NYJ 42"` or `"50"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YardLine {
    Midfield,
    /// `yards` is measured from the goal line of `team`'s own end zone (0–49).
    Side { team: String, yards: u8 },
}

impl YardLine {
    /// True when the ball sits on `team`'s half of the field.
    pub fn is_own_side(&self, team: &str) -> bool {
        matches!(self, YardLine::Side { team: side, .. } if side == team)
    }

    /// Distance from the possessing team's own goal line, 0–100.
    pub fn yards_from_own_goal(&self, possession: &str) -> u8 {
        match self {
            YardLine::Midfield => 50,
            YardLine::Side { team, yards } if team == possession => *yards,
            YardLine::Side { yards, .. } => 100 - *yards,
        }
    }
}

impl FromStr for YardLine {
    type Err = SurrenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SurrenderError::InvalidYardLine {
            value: s.to_string(),
        };

        let mut parts = s.split_whitespace();
        let (side, number) = match (parts.next(), parts.next(), parts.next()) {
            (Some(number), None, None) => (None, number),
            (Some(side), Some(number), None) => (Some(side), number),
            _ => return Err(invalid()),
        };

        let yards: u8 = number.parse().map_err(|_| invalid())?;
        if yards > 50 {
            return Err(invalid());
        }
        // Any label on the 50 is midfield, with or without a side prefix.
        if yards == 50 {
            return Ok(YardLine::Midfield);
        }

        match side {
            Some(team) => Ok(YardLine::Side {
                team: team.to_string(),
                yards,
            }),
            None => Err(invalid()),
        }
    }
}

impl fmt::Display for YardLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YardLine::Midfield => write!(f, "50"),
            YardLine::Side { team, yards } => write!(f, "{} {}", team, yards),
        }
    }
}

/// Game clock reading for the current quarter, `MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameClock {
    seconds: u32,
}

impl GameClock {
    pub fn as_seconds(&self) -> u32 {
        self.seconds
    }
}

impl FromStr for GameClock {
    type Err = SurrenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SurrenderError::InvalidClock {
            value: s.to_string(),
        };

        let (minutes, seconds) = s.trim().split_once(':').ok_or_else(invalid)?;
        let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
        let seconds: u32 = seconds.parse().map_err(|_| invalid())?;
        if seconds >= 60 {
            return Err(invalid());
        }

        let seconds = minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .ok_or_else(invalid)?;
        Ok(GameClock { seconds })
    }
}
