use chrono::Utc;
use tracing::{debug, error, info, trace, warn};

use super::ledger::PuntLedger;
use super::notify::{Notifier, PuntNotification};
use super::score_cache::ScoreCache;
use crate::error::Result;
use crate::game::{Game, PlayContext};
use crate::live::GameDiff;
use crate::surrender::surrender_index;

/// True for a real punt attempt. A punt wiped out by a pre-snap penalty is
/// logged as "No Play" and doesn't count.
pub fn is_punt(description: &str) -> bool {
    let desc = description.to_lowercase();
    (desc.contains("punts") || desc.contains("punt is blocked")) && !desc.contains("no play")
}

/// Handles one polling cycle at a time: refreshes live scores, then reports
/// every new punt exactly once.
pub struct PuntDispatcher<N> {
    scores: ScoreCache,
    ledger: PuntLedger,
    /// Punts that failed to score; never retried
    rejected: PuntLedger,
    notifier: N,
}

impl<N: Notifier> PuntDispatcher<N> {
    pub fn new(notifier: N) -> Self {
        PuntDispatcher {
            scores: ScoreCache::new(),
            ledger: PuntLedger::new(),
            rejected: PuntLedger::new(),
            notifier,
        }
    }

    /// Process one cycle and return the number of punts reported.
    ///
    /// Scoring errors abort the cycle. Punts reported earlier in the same
    /// cycle stay in the ledger, and the failing punt is skipped from then on
    /// so it can't hold back the punts behind it.
    pub fn on_cycle(
        &mut self,
        active: &[Game],
        completed: &[Game],
        diffs: &[GameDiff],
    ) -> Result<usize> {
        self.scores.refresh(active);
        for game in completed {
            debug!(
                "Game {} final: {} {} - {} {}",
                game.gamekey, game.away, game.score_away, game.home, game.score_home
            );
        }

        let mut reported = 0;
        for diff in diffs {
            for ctx in diff.plays() {
                let gamekey = &ctx.game.gamekey;
                let play_id = &ctx.play.play_id;

                if !is_punt(&ctx.play.description) {
                    continue;
                }
                if self.ledger.already_reported(gamekey, play_id) {
                    trace!("Punt {} of game {} already reported", play_id, gamekey);
                    continue;
                }
                if self.rejected.already_reported(gamekey, play_id) {
                    warn!("Skipping punt {} of game {}: it failed to score earlier", play_id, gamekey);
                    continue;
                }

                let notification = match self.build_notification(&ctx) {
                    Ok(notification) => notification,
                    Err(e) => {
                        error!("Punt {} of game {} could not be scored: {}", play_id, gamekey, e);
                        self.rejected.mark_reported(gamekey, play_id);
                        return Err(e);
                    }
                };
                info!(
                    "Punt by {} in game {} ({} {}): surrender index {:.2}",
                    notification.possession_team,
                    gamekey,
                    notification.quarter_label(),
                    notification.clock,
                    notification.surrender_index
                );
                self.notifier.notify(&notification);
                self.ledger.mark_reported(gamekey, play_id);
                debug!(
                    "Game {}: {} punt(s) reported so far",
                    gamekey,
                    self.ledger.reported(gamekey).len()
                );
                reported += 1;
            }
        }

        Ok(reported)
    }

    fn build_notification(&self, ctx: &PlayContext<'_>) -> Result<PuntNotification> {
        let game = ctx.game;
        let play = ctx.play;
        let factors = surrender_index(ctx)?;
        let yard_line = ctx.yard_line()?;

        debug!(
            "Punt {} from {}: field={:.4} distance={} score={} (diff {}) clock={:.4}",
            play.play_id,
            yard_line,
            factors.field_position,
            factors.yards_to_go,
            factors.score,
            factors.score_diff,
            factors.clock
        );

        Ok(PuntNotification {
            gamekey: game.gamekey.clone(),
            play_id: play.play_id.clone(),
            quarter: play.quarter,
            clock: play.time.clone(),
            away_team: game.away.clone(),
            away_score: self.live_score(&game.away, game.score_away),
            home_team: game.home.clone(),
            home_score: self.live_score(&game.home, game.score_home),
            possession_team: play.possession_team.clone(),
            yards_from_own_goal: yard_line.yards_from_own_goal(&play.possession_team),
            description: play.description.clone(),
            surrender_index: factors.total(),
            factors,
            detected_at: Utc::now(),
        })
    }

    /// Cached live score, or the diff snapshot's own score when the team's
    /// game was never seen active.
    fn live_score(&self, team: &str, snapshot_score: i32) -> i32 {
        self.scores.get(team).unwrap_or(snapshot_score)
    }

    pub fn ledger(&self) -> &PuntLedger {
        &self.ledger
    }

    pub fn scores(&self) -> &ScoreCache {
        &self.scores
    }

    #[cfg(test)]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::notify::testing::RecordingNotifier;
    use crate::error::SurrenderError;
    use crate::game::testing::{drive, game, play, punt};
    use crate::game::models::Play;
    use approx::assert_relative_eq;

    fn dispatcher() -> PuntDispatcher<RecordingNotifier> {
        PuntDispatcher::new(RecordingNotifier::default())
    }

    fn live_game() -> Game {
        let mut g = game(vec![
            drive(1, "NYJ", "Field Goal", vec![play("10", "NYJ", "S.Ficken 41 yard field goal is GOOD")]),
            drive(2, "NE", "Punt", vec![
                play("20", "NE", "T.Brady pass incomplete short left"),
                Play {
                    quarter: 4,
                    time: "1:00".into(),
                    yard_line: "NE 15".into(),
                    yards_to_go: 11,
                    ..punt("21", "NE")
                },
            ]),
        ]);
        g.score_away = 3;
        g
    }

    #[test]
    fn test_is_punt() {
        assert!(is_punt("(4:12) R.Allen punts 44 yards to NYJ 31"));
        assert!(is_punt("R.Allen PUNTS 44 yards"));
        assert!(is_punt("(0:04) L.Edwards punt is BLOCKED by K.Van Noy"));
        assert!(!is_punt("(4:12) R.Allen punts 44 yards, PENALTY on NE-J.Thuney, False Start, NO PLAY."));
        assert!(!is_punt("T.Brady pass short right to J.Edelman for 9 yards"));
        assert!(!is_punt("Timeout #1 by NE at 04:12."));
    }

    #[test]
    fn test_reports_new_punt() {
        let mut d = dispatcher();
        let g = live_game();
        let diffs = [GameDiff::full(g.clone())];

        let n = d.on_cycle(&[g], &[], &diffs).unwrap();
        assert_eq!(n, 1);

        let sent = &d.notifier().sent;
        assert_eq!(sent.len(), 1);
        let note = &sent[0];
        assert_eq!(note.play_id, "21");
        assert_eq!(note.away_score, 3);
        assert_eq!(note.home_score, 0);
        assert_eq!(note.yards_from_own_goal, 15);
        assert_eq!(note.factors.score_diff, -3);
        assert_relative_eq!(
            note.surrender_index,
            0.8 * (1.74f64.powi(3) + 1.0),
            epsilon = 1e-12
        );
        assert!(d.ledger().already_reported(&note.gamekey, "21"));
    }

    #[test]
    fn test_same_diff_twice_reports_once() {
        let mut d = dispatcher();
        let g = live_game();
        let diffs = [GameDiff::full(g.clone())];

        assert_eq!(d.on_cycle(&[g.clone()], &[], &diffs).unwrap(), 1);
        assert_eq!(d.on_cycle(&[g], &[], &diffs).unwrap(), 0);
        assert_eq!(d.notifier().sent.len(), 1);
        assert_eq!(d.ledger().len(), 1);
    }

    #[test]
    fn test_uses_live_cache_scores() {
        let mut d = dispatcher();
        let g = live_game();
        let mut fresher = g.clone();
        fresher.score_home = 7;

        d.on_cycle(&[fresher], &[], &[GameDiff::full(g)]).unwrap();
        assert_eq!(d.notifier().sent[0].home_score, 7);
        assert_eq!(d.scores().get("NE"), Some(7));
    }

    #[test]
    fn test_falls_back_to_snapshot_score() {
        let mut d = dispatcher();
        let g = live_game();
        d.on_cycle(&[], &[g.clone()], &[GameDiff::full(g)]).unwrap();
        assert_eq!(d.notifier().sent[0].away_score, 3);
    }

    #[test]
    fn test_non_punts_are_skipped() {
        let mut d = dispatcher();
        let g = game(vec![drive(1, "NE", "Punt", vec![
            play("1", "NE", "S.Michel left end for 3 yards"),
            play("2", "NE", "R.Allen punts 40 yards. PENALTY on NYJ, Offside, NO PLAY."),
        ])]);
        assert_eq!(d.on_cycle(&[g.clone()], &[], &[GameDiff::full(g)]).unwrap(), 0);
        assert!(d.notifier().sent.is_empty());
        assert_eq!(d.ledger().len(), 0);
    }

    #[test]
    fn test_malformed_punt_propagates_and_is_not_marked() {
        let mut d = dispatcher();
        let g = game(vec![drive(1, "NE", "Punt", vec![
            punt("1", "NE"),
            Play {
                yard_line: "somewhere".into(),
                ..punt("2", "NE")
            },
        ])]);
        let err = d.on_cycle(&[g.clone()], &[], &[GameDiff::full(g.clone())]).unwrap_err();
        assert!(matches!(err, SurrenderError::InvalidYardLine { .. }));

        // The good punt before it was reported and stays reported.
        assert_eq!(d.notifier().sent.len(), 1);
        assert!(d.ledger().already_reported(&g.gamekey, "1"));
        assert!(!d.ledger().already_reported(&g.gamekey, "2"));
        assert!(d.rejected.already_reported(&g.gamekey, "2"));
    }

    #[test]
    fn test_malformed_punt_does_not_block_later_punts() {
        let mut d = dispatcher();
        let g = game(vec![drive(1, "NE", "Punt", vec![
            Play {
                time: "99:99".into(),
                quarter: 4,
                ..punt("1", "NE")
            },
            punt("2", "NE"),
        ])]);
        let diffs = [GameDiff::full(g.clone())];

        assert!(d.on_cycle(&[g.clone()], &[], &diffs).is_err());
        assert!(d.notifier().sent.is_empty());

        // Same plays again: the bad punt is skipped, the one behind it goes out.
        assert_eq!(d.on_cycle(&[g.clone()], &[], &diffs).unwrap(), 1);
        assert_eq!(d.notifier().sent[0].play_id, "2");
        assert!(!d.ledger().already_reported(&g.gamekey, "1"));
    }

    #[test]
    fn test_overtime_punt_label() {
        let mut d = dispatcher();
        let g = game(vec![drive(1, "NE", "Punt", vec![Play {
            quarter: 5,
            time: "6:00".into(),
            ..punt("1", "NE")
        }])]);
        d.on_cycle(&[g.clone()], &[], &[GameDiff::full(g)]).unwrap();
        assert_eq!(d.notifier().sent[0].quarter_label(), "OT");
    }
}
