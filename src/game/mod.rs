pub mod field;
pub mod models;

#[cfg(test)]
pub mod testing;

pub use field::YardLine;
pub use models::{Drive, DriveResult, Game, GameStatus, PlayContext, SeasonType};
