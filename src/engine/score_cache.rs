use std::collections::HashMap;

use crate::game::Game;

/// Latest known score per team, rebuilt from the active games every cycle.
///
/// Entries for games that have left the active set are kept; nothing is
/// scored for those teams again until they play.
#[derive(Debug, Default)]
pub struct ScoreCache {
    scores: HashMap<String, i32>,
}

impl ScoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh(&mut self, active: &[Game]) {
        for game in active {
            self.scores.insert(game.home.clone(), game.score_home);
            self.scores.insert(game.away.clone(), game.score_away);
        }
    }

    pub fn get(&self, team: &str) -> Option<i32> {
        self.scores.get(team).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }
}
