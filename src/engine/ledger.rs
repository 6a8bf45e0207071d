use std::collections::{HashMap, HashSet};

/// Play ids already notified, per game. Grows for the life of the process.
#[derive(Debug, Default)]
pub struct PuntLedger {
    reported: HashMap<String, GameEntry>,
}

#[derive(Debug, Default)]
struct GameEntry {
    ids: HashSet<String>,
    /// Same ids, in the order they were reported
    order: Vec<String>,
}

impl PuntLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn already_reported(&self, gamekey: &str, play_id: &str) -> bool {
        self.reported
            .get(gamekey)
            .is_some_and(|entry| entry.ids.contains(play_id))
    }

    pub fn mark_reported(&mut self, gamekey: &str, play_id: &str) {
        let entry = self.reported.entry(gamekey.to_string()).or_default();
        if entry.ids.insert(play_id.to_string()) {
            entry.order.push(play_id.to_string());
        }
    }

    pub fn reported(&self, gamekey: &str) -> &[String] {
        self.reported
            .get(gamekey)
            .map(|entry| entry.order.as_slice())
            .unwrap_or(&[])
    }

    /// Total plays reported across all games.
    pub fn len(&self) -> usize {
        self.reported.values().map(|entry| entry.order.len()).sum()
    }
}
