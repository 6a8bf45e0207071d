//! The four independent factors of the surrender index.
//!
//! Each factor is strictly positive, so their product is too.

use crate::error::{Result, SurrenderError};
use crate::game::{PlayContext, SeasonType, YardLine};

/// Regulation quarter length in seconds.
const QUARTER_SECS: i64 = 15 * 60;
/// First season with the shortened 10-minute regular-season overtime.
const SHORT_OVERTIME_SINCE: i32 = 2018;

/// Reward for punting from deep in your own territory.
///
/// - midfield: `1.1^10`
/// - own side: `max(1, 1.1^(yards − 40))`, flat below the own 40
/// - opponent side: `1.2^(50 − yards) × 1.1^10`
pub fn field_position_score(ctx: &PlayContext<'_>) -> Result<f64> {
    let midfield = 1.1f64.powi(10);
    let yard_line = ctx.yard_line()?;

    let score = match &yard_line {
        YardLine::Midfield => midfield,
        YardLine::Side { yards, .. } if yard_line.is_own_side(&ctx.play.possession_team) => {
            1.1f64.powi(i32::from(*yards) - 40).max(1.0)
        }
        YardLine::Side { yards, .. } => 1.2f64.powi(50 - i32::from(*yards)) * midfield,
    };
    Ok(score)
}

/// Shorter distance to go makes a punt look worse.
pub fn yards_to_go_multiplier(yards_to_go: u32) -> f64 {
    if yards_to_go >= 10 {
        0.2
    } else if yards_to_go >= 7 {
        0.4
    } else if yards_to_go >= 4 {
        0.6
    } else if yards_to_go >= 2 {
        0.8
    } else {
        1.0
    }
}

/// Penalty by score state: winning 1x, tied 2x, down by more than 8 3x,
/// down by one score (8 or fewer) 4x.
pub fn score_multiplier(score_diff: i32) -> f64 {
    match score_diff {
        d if d > 0 => 1.0,
        0 => 2.0,
        -8..=-1 => 4.0,
        _ => 3.0,
    }
}

/// Grows with the cube of time elapsed since halftime, but only for a team
/// that isn't ahead in the second half or overtime.
pub fn clock_multiplier(ctx: &PlayContext<'_>, score_diff: i32) -> Result<f64> {
    if ctx.play.quarter > 2 && score_diff <= 0 {
        let secs = f64::from(seconds_since_half(ctx)?);
        Ok((secs * 0.001).powi(3) + 1.0)
    } else {
        Ok(1.0)
    }
}

/// Quarters 1–4, plus 5 for overtime.
pub fn check_quarter(quarter: u8) -> Result<u8> {
    if (1..=5).contains(&quarter) {
        Ok(quarter)
    } else {
        Err(SurrenderError::InvalidQuarter { quarter })
    }
}

/// Seconds of game time played since halftime, 0 in the first half.
pub fn seconds_since_half(ctx: &PlayContext<'_>) -> Result<u32> {
    let quarter = check_quarter(ctx.play.quarter)?;
    if quarter <= 2 {
        return Ok(0);
    }

    let period_secs = if quarter == 5 && ctx.game.season_type != SeasonType::Postseason {
        overtime_minutes(ctx.game.year) * 60
    } else {
        QUARTER_SECS
    };

    let clock = i64::from(ctx.clock()?.as_seconds());
    let elapsed = period_secs - clock + QUARTER_SECS * (i64::from(quarter) - 3);
    Ok(elapsed.max(0) as u32)
}

/// Regular-season overtime length. Postseason overtime is always a full
/// 15-minute period.
pub fn overtime_minutes(year: i32) -> i64 {
    if year >= SHORT_OVERTIME_SINCE {
        10
    } else {
        15
    }
}
