use std::collections::HashSet;

use crate::game::{Game, PlayContext};

/// Plays of one game that were not present in the previous snapshot.
///
/// Positions index into the snapshot's drive/play vectors, so a diff can only
/// refer to plays its own game actually holds.
#[derive(Debug, Clone)]
pub struct GameDiff {
    game: Game,
    positions: Vec<(usize, usize)>,
}

impl GameDiff {
    /// First sighting of a game: every play is new.
    pub fn full(game: Game) -> Self {
        let positions = game.positions().map(|(d, p, _)| (d, p)).collect();
        GameDiff { game, positions }
    }

    /// Plays whose id is not in `seen`.
    pub fn since(game: Game, seen: &HashSet<String>) -> Self {
        let positions = game
            .positions()
            .filter(|(_, _, play)| !seen.contains(&play.play_id))
            .map(|(d, p, _)| (d, p))
            .collect();
        GameDiff { game, positions }
    }

    /// New plays in feed order.
    pub fn plays(&self) -> impl Iterator<Item = PlayContext<'_>> + '_ {
        self.positions
            .iter()
            .filter_map(move |&(d, p)| self.game.play_at(d, p))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
