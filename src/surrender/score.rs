//! Score reconstruction by replaying the drives before a play.

use std::collections::HashMap;

use super::touchdown::classify_touchdown;
use crate::error::{Result, SurrenderError};
use crate::game::{Drive, DriveResult, Game, PlayContext};

const FIELD_GOAL_POINTS: i32 = 3;
const SAFETY_POINTS: i32 = 2;

/// Points difference at the moment of `ctx`, from the possessing team's
/// point of view (positive = ahead).
///
/// Only drives numbered strictly before the play's own drive count.
pub fn score_differential(ctx: &PlayContext<'_>) -> Result<i32> {
    let game = ctx.game;
    let mut score: HashMap<&str, i32> =
        HashMap::from([(game.home.as_str(), 0), (game.away.as_str(), 0)]);

    for drive in game
        .drives
        .iter()
        .filter(|d| d.drive_num < ctx.drive.drive_num)
    {
        let (team, points) = match drive.result {
            DriveResult::FieldGoal => (drive.team.as_str(), FIELD_GOAL_POINTS),
            DriveResult::Safety(_) => (game.opponent(&drive.team), SAFETY_POINTS),
            DriveResult::Touchdown => (drive.team.as_str(), touchdown_points(game, drive)?),
            DriveResult::Fumble | DriveResult::Interception
                if drive.plays.iter().any(|p| p.touchdown) =>
            {
                (game.opponent(&drive.team), touchdown_points(game, drive)?)
            }
            _ => continue,
        };
        *score.entry(team).or_insert(0) += points;
    }

    let home = score.get(game.home.as_str()).copied().unwrap_or(0);
    let away = score.get(game.away.as_str()).copied().unwrap_or(0);
    let points_diff = home - away;

    if ctx.possession_is_home() {
        Ok(points_diff)
    } else {
        Ok(-points_diff)
    }
}

/// Value of a touchdown drive, judged from its final play.
pub fn touchdown_points(game: &Game, drive: &Drive) -> Result<i32> {
    let last = drive.plays.last().ok_or_else(|| SurrenderError::EmptyDrive {
        gamekey: game.gamekey.clone(),
        drive_num: drive.drive_num,
    })?;
    Ok(classify_touchdown(&last.description, &drive.result).points())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::testing::{drive, game, play, punt, touchdown};

    const XP_GOOD: &str = "J.White 3 yard run, TOUCHDOWN. N.Folk extra point is GOOD.";

    /// NE (home) field goal, NYJ touchdown + XP, then a punt by whoever is
    /// passed in on drive 3.
    fn fixture(punting_team: &str) -> Game {
        game(vec![
            drive(1, "NE", "Field Goal", vec![play("10", "NE", "N.Folk 38 yard field goal is GOOD")]),
            drive(2, "NYJ", "Touchdown", vec![touchdown("20", "NYJ", XP_GOOD)]),
            drive(3, punting_team, "Punt", vec![punt("30", punting_team)]),
        ])
    }

    #[test]
    fn test_field_goal_and_touchdown() {
        let g = fixture("NE");
        let ctx = g.play_at(2, 0).unwrap();
        // NE 3 - NYJ 7
        assert_eq!(score_differential(&ctx).unwrap(), -4);
    }

    #[test]
    fn test_antisymmetric_under_possession() {
        let home = fixture("NE");
        let away = fixture("NYJ");
        let a = score_differential(&home.play_at(2, 0).unwrap()).unwrap();
        let b = score_differential(&away.play_at(2, 0).unwrap()).unwrap();
        assert_eq!(a, -b);
    }

    #[test]
    fn test_current_drive_is_excluded() {
        let g = game(vec![
            drive(1, "NE", "Touchdown", vec![
                play("10", "NE", "T.Brady pass to J.Edelman for 5 yards"),
                touchdown("11", "NE", XP_GOOD),
            ]),
        ]);
        // Both plays sit on the scoring drive itself, so nothing has counted yet.
        assert_eq!(score_differential(&g.play_at(0, 0).unwrap()).unwrap(), 0);
        assert_eq!(score_differential(&g.play_at(0, 1).unwrap()).unwrap(), 0);
    }

    #[test]
    fn test_safety_credits_defense() {
        let g = game(vec![
            drive(1, "NE", "Safety", vec![play("10", "NE", "T.Brady sacked in end zone, SAFETY")]),
            drive(2, "NE", "Punt", vec![punt("20", "NE")]),
        ]);
        assert_eq!(score_differential(&g.play_at(1, 0).unwrap()).unwrap(), -2);
    }

    #[test]
    fn test_turnover_return_touchdown_credits_defense() {
        let g = game(vec![
            drive(1, "NE", "Interception", vec![touchdown(
                "10",
                "NE",
                "T.Brady pass intercepted by J.Adams, returned 40 yards, TOUCHDOWN.",
            )]),
            drive(2, "NE", "Punt", vec![punt("20", "NE")]),
        ]);
        // NYJ +7 on a return score with no try text
        assert_eq!(score_differential(&g.play_at(1, 0).unwrap()).unwrap(), -7);
    }

    #[test]
    fn test_turnover_without_touchdown_scores_nothing() {
        let g = game(vec![
            drive(1, "NE", "Fumble", vec![play("10", "NE", "S.Michel FUMBLES, recovered by NYJ")]),
            drive(2, "NYJ", "Punt", vec![punt("20", "NYJ")]),
        ]);
        assert_eq!(score_differential(&g.play_at(1, 0).unwrap()).unwrap(), 0);
    }

    #[test]
    fn test_two_point_and_nullified() {
        let g = game(vec![
            drive(1, "NYJ", "Touchdown", vec![touchdown(
                "10",
                "NYJ",
                "TWO-POINT CONVERSION ATTEMPT. ATTEMPT SUCCEEDS.",
            )]),
            drive(2, "NE", "Touchdown", vec![touchdown(
                "20",
                "NE",
                "TOUCHDOWN NULLIFIED by Offensive Holding. extra point is GOOD.",
            )]),
            drive(3, "NE", "Punt", vec![punt("30", "NE")]),
        ]);
        assert_eq!(score_differential(&g.play_at(2, 0).unwrap()).unwrap(), -8);
    }

    #[test]
    fn test_empty_scoring_drive_is_an_error() {
        let g = game(vec![
            drive(1, "NE", "Touchdown", vec![]),
            drive(2, "NYJ", "Punt", vec![punt("20", "NYJ")]),
        ]);
        let err = score_differential(&g.play_at(1, 0).unwrap()).unwrap_err();
        assert_eq!(
            err,
            SurrenderError::EmptyDrive {
                gamekey: g.gamekey.clone(),
                drive_num: 1
            }
        );
    }
}
