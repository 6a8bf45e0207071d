//! Touchdown valuation from the feed's play-description text.
//!
//! The upstream feed only signals the try result and replay reversals in
//! free text, so every string marker the engine depends on lives here.

use crate::game::DriveResult;

const NULLIFIED: &str = "TOUCHDOWN NULLIFIED";
const EXTRA_POINT_GOOD: &str = "extra point is GOOD";
const TWO_POINT_GOOD: &str = "ATTEMPT SUCCEEDS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchdownOutcome {
    /// Reversed by penalty or review.
    Nullified,
    ExtraPointGood,
    TwoPointGood,
    /// Fumble/interception return; no try is recorded on the drive.
    ReturnScore,
    /// Missed or failed try.
    TryFailed,
}

impl TouchdownOutcome {
    pub fn points(self) -> i32 {
        match self {
            TouchdownOutcome::Nullified => 0,
            TouchdownOutcome::ExtraPointGood => 7,
            TouchdownOutcome::TwoPointGood => 8,
            TouchdownOutcome::ReturnScore => 7,
            TouchdownOutcome::TryFailed => 6,
        }
    }
}

/// Classify a touchdown from the description of the drive's final play.
pub fn classify_touchdown(description: &str, result: &DriveResult) -> TouchdownOutcome {
    if description.contains(NULLIFIED) {
        TouchdownOutcome::Nullified
    } else if description.contains(EXTRA_POINT_GOOD) {
        TouchdownOutcome::ExtraPointGood
    } else if description.contains(TWO_POINT_GOOD) {
        TouchdownOutcome::TwoPointGood
    } else if result.is_turnover() {
        TouchdownOutcome::ReturnScore
    } else {
        TouchdownOutcome::TryFailed
    }
}
