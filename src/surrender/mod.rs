//! The surrender index: how unwarranted a punt was given field position,
//! distance, score and clock.
//!
//! ```text
//!  index = field_position × yards_to_go × score × clock
//! ```
//!
//! The model is a fixed formula. Larger means more cowardly.

pub mod multipliers;
pub mod score;
pub mod touchdown;

use serde::Serialize;

use crate::error::Result;
use crate::game::PlayContext;
use multipliers::{
    check_quarter, clock_multiplier, field_position_score, score_multiplier, yards_to_go_multiplier,
};
use score::score_differential;

/// Every factor of one punt's index, kept for logging and output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurrenderIndex {
    pub field_position: f64,
    pub yards_to_go: f64,
    pub score: f64,
    pub clock: f64,
    /// Possessing team's point differential before the punt's drive
    pub score_diff: i32,
}

impl SurrenderIndex {
    pub fn total(&self) -> f64 {
        self.field_position * self.yards_to_go * self.score * self.clock
    }
}

/// Score a play. The score differential is replayed once and shared by the
/// score and clock factors.
pub fn surrender_index(ctx: &PlayContext<'_>) -> Result<SurrenderIndex> {
    check_quarter(ctx.play.quarter)?;
    let score_diff = score_differential(ctx)?;
    Ok(SurrenderIndex {
        field_position: field_position_score(ctx)?,
        yards_to_go: yards_to_go_multiplier(ctx.play.yards_to_go),
        score: score_multiplier(score_diff),
        clock: clock_multiplier(ctx, score_diff)?,
        score_diff,
    })
}
