use crate::configstrings::{PLAYER1_SLOT, PLAYER2_SLOT};
use crate::humanize::{human_date, human_duration, human_size};
use crate::models::{Demo, DemoFile};

/// The web layer serves raw demo files under this path
const URL_PREFIX: &str = "/demos/";

/// Score fields arrive as `"16 : 14"`
const SCORE_SEPARATOR: &str = " : ";

/// Duel match names arrive as `"name ^7vs name"`; `^7` resets the nick color
const VERSUS_SEPARATOR: &str = " ^7vs ";

/// Interprets a demo file's raw pairs into match metadata.
///
/// Every field resolves independently: a value that fails to parse is
/// logged and left at its default without disturbing the rest. Player names
/// come from the match name for duels and otherwise fall back to the client
/// name configstring slots.
pub fn resolve_demo(filename: &str, size: u64, file: &DemoFile) -> Demo {
    let mut demo = Demo {
        filename: filename.to_owned(),
        url: format!("{}{}", URL_PREFIX, filename),
        size,
        size_str: human_size(size),
        ..Demo::default()
    };

    if let Some(value) = file.header.get("hostname") {
        demo.hostname = value.clone();
    }

    if let Some(value) = file.header.get("localtime") {
        match value.parse::<i64>() {
            Ok(epoch) => {
                demo.time = epoch;
                demo.time_str = human_date(epoch);
            }
            Err(_) => tracing::warn!(%filename, %value, "invalid localtime, skipping field"),
        }
    }

    if let Some(value) = file.header.get("duration") {
        match value.parse::<i64>() {
            Ok(duration) => {
                demo.duration = duration;
                demo.duration_str = human_duration(duration);
            }
            Err(_) => tracing::warn!(%filename, %value, "invalid duration, skipping field"),
        }
    }

    if let Some(value) = file.header.get("mapname") {
        demo.map_id = value.clone();
    }

    if let Some(value) = file.header.get("levelname") {
        demo.map_name = value.clone();
    }

    if let Some(value) = file.header.get("gametype") {
        demo.game_type = value.clone();
        demo.is_duel = value.as_str() == "duel";
    }

    if let Some(value) = file.header.get("matchscore") {
        match parse_matchscore(value) {
            Some((score1, score2)) => {
                demo.score1 = score1;
                demo.score2 = score2;
            }
            None => tracing::warn!(%filename, %value, "invalid matchscore, skipping field"),
        }
    }

    // Only duels name the players in the match name; other gametypes carry
    // arbitrary text here. A missing separator is not an error.
    if demo.is_duel {
        if let Some(value) = file.header.get("matchname") {
            if let Some((player1, player2)) = value.split_once(VERSUS_SEPARATOR) {
                demo.player1 = player1.to_owned();
                demo.player2 = player2.to_owned();
            }
        }
    }

    if demo.player1.is_empty() || demo.player2.is_empty() {
        demo.player1 = player_slot(file, PLAYER1_SLOT);
        demo.player2 = player_slot(file, PLAYER2_SLOT);
    }

    demo
}

fn player_slot(file: &DemoFile, slot: u32) -> String {
    file.config_strings.get(&slot).cloned().unwrap_or_default()
}

/// Both scores parse or neither does.
fn parse_matchscore(value: &str) -> Option<(i32, i32)> {
    let parts: Vec<&str> = value.split(SCORE_SEPARATOR).collect();
    if parts.len() < 2 {
        return None;
    }
    let score1 = parts[0].parse().ok()?;
    let score2 = parts[1].parse().ok()?;
    Some((score1, score2))
}
