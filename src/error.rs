use thiserror::Error;

/// Failures raised while scoring a play.
///
/// These are never swallowed inside the engine: a malformed play should fail
/// its cycle visibly rather than produce a silently wrong ranking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurrenderError {
    #[error("invalid yard line: {value:?}")]
    InvalidYardLine { value: String },

    #[error("invalid game clock: {value:?} (expected MM:SS)")]
    InvalidClock { value: String },

    #[error("invalid quarter: {quarter}")]
    InvalidQuarter { quarter: u8 },

    #[error("drive {drive_num} of game {gamekey} has no plays")]
    EmptyDrive { gamekey: String, drive_num: u32 },
}

pub type Result<T> = std::result::Result<T, SurrenderError>;
