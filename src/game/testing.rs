//! Fixture builders shared by the unit tests. NE hosts NYJ unless overridden.

use super::models::{Drive, DriveResult, Game, GameStatus, Play, SeasonType};

pub fn game(drives: Vec<Drive>) -> Game {
    Game {
        gamekey: "2019122100".into(),
        home: "NE".into(),
        away: "NYJ".into(),
        score_home: 0,
        score_away: 0,
        year: 2019,
        season_type: SeasonType::Regular,
        status: GameStatus::InProgress,
        drives,
    }
}

pub fn drive(drive_num: u32, team: &str, result: &str, plays: Vec<Play>) -> Drive {
    Drive {
        drive_num,
        team: team.into(),
        result: DriveResult::from(result),
        plays,
    }
}

pub fn play(play_id: &str, possession_team: &str, description: &str) -> Play {
    Play {
        play_id: play_id.into(),
        quarter: 1,
        time: "15:00".into(),
        yard_line: format!("{} 25", possession_team),
        yards_to_go: 10,
        possession_team: possession_team.into(),
        description: description.into(),
        touchdown: false,
    }
}

pub fn punt(play_id: &str, possession_team: &str) -> Play {
    play(
        play_id,
        possession_team,
        "(4:12) R.Allen punts 44 yards to NYJ 31, Center-J.Cardona. B.Berrios to NYJ 38 for 7 yards.",
    )
}

pub fn touchdown(play_id: &str, possession_team: &str, description: &str) -> Play {
    Play {
        touchdown: true,
        ..play(play_id, possession_team, description)
    }
}
