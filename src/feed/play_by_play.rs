use super::types::{Game, Play};
use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;

// ── Provider document deserialization ────────────────────────────────

#[derive(Deserialize)]
struct WeekDocument {
    #[serde(default)]
    games: Vec<ProviderGame>,
}

#[derive(Deserialize)]
struct ProviderGame {
    gamekey: String,
    #[serde(default)]
    eid: Option<String>,
    #[serde(default)]
    date: Option<String>,
    home: String,
    away: String,
    #[serde(default)]
    drives: Vec<ProviderDrive>,
}

#[derive(Deserialize)]
struct ProviderDrive {
    drive_id: u32,
    posteam: String,
    #[serde(default)]
    plays: Vec<ProviderPlay>,
}

#[derive(Deserialize)]
struct ProviderPlay {
    play_id: serde_json::Value,
    desc: String,
    #[serde(default)]
    yrdln: String,
    #[serde(default)]
    ydstogo: u8,
    qtr: u8,
    #[serde(default)]
    time: String,
    posteam: String,
}

/// `eid` values look like `2013090800`: date followed by a two-digit suffix.
fn date_from_eid(eid: &str) -> Option<NaiveDate> {
    let digits = eid.get(..8)?;
    NaiveDate::parse_from_str(digits, "%Y%m%d").ok()
}

fn parse_date(game: &ProviderGame) -> anyhow::Result<Option<NaiveDate>> {
    match game.date.as_deref() {
        Some(raw) if !raw.is_empty() => {
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("game {}: bad date {:?}", game.gamekey, raw))?;
            Ok(Some(date))
        }
        _ => Ok(game.eid.as_deref().and_then(date_from_eid)),
    }
}

fn play_id_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn convert_game(mut game: ProviderGame) -> anyhow::Result<Game> {
    let date = parse_date(&game)?;
    // Drives are replayed by id; a stable sort keeps provider order for duplicates.
    game.drives.sort_by_key(|d| d.drive_id);
    let drives = game
        .drives
        .into_iter()
        .map(|drive| {
            let plays = drive
                .plays
                .into_iter()
                .map(|p| Play {
                    play_id: play_id_string(&p.play_id),
                    description: p.desc,
                    yard_line: p.yrdln,
                    yards_to_go: p.ydstogo,
                    quarter: p.qtr,
                    clock: p.time,
                    possessing_team: p.posteam,
                    drive: 0,
                })
                .collect();
            (drive.posteam, plays)
        })
        .collect();
    Ok(Game::from_drives(game.gamekey, date, game.home, game.away, drives))
}

/// Decode one week of games from the provider's JSON document.
pub fn parse_week(json: &str) -> anyhow::Result<Vec<Game>> {
    let doc: WeekDocument =
        serde_json::from_str(json).context("failed to decode play-by-play document")?;
    doc.games.into_iter().map(convert_game).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEEK: &str = r#"{
        "games": [
            {
                "gamekey": "56505",
                "eid": "2013090800",
                "home": "BUF",
                "away": "NE",
                "drives": [
                    {
                        "drive_id": 2,
                        "posteam": "BUF",
                        "plays": [
                            {
                                "play_id": 120,
                                "desc": "(9:12) B.Powell punts 45 yards to NE 20",
                                "yrdln": "BUF 35",
                                "ydstogo": 7,
                                "qtr": 1,
                                "time": "09:12",
                                "posteam": "BUF"
                            }
                        ]
                    },
                    {
                        "drive_id": 1,
                        "posteam": "NE",
                        "plays": [
                            {
                                "play_id": "36",
                                "desc": "S.Gostkowski kicks 65 yards from NE 35 to end zone, Touchback.",
                                "yrdln": "NE 35",
                                "ydstogo": 0,
                                "qtr": 1,
                                "time": "15:00",
                                "posteam": "NE"
                            }
                        ]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_week_orders_drives() {
        let games = parse_week(WEEK).unwrap();
        assert_eq!(games.len(), 1);
        let g = &games[0];
        assert_eq!(g.game_id, "56505");
        assert_eq!(g.home, "BUF");
        assert_eq!(g.away, "NE");
        assert_eq!(g.plays.len(), 2);
        assert_eq!(g.plays[0].play_id, "36");
        assert_eq!(g.plays[1].play_id, "120");
        assert_eq!(g.plays[1].yards_to_go, 7);
        assert_eq!(g.plays[1].clock, "09:12");
        assert_eq!(g.plays[1].drive, 1);
    }

    #[test]
    fn test_date_falls_back_to_eid() {
        let games = parse_week(WEEK).unwrap();
        assert_eq!(games[0].date, NaiveDate::from_ymd_opt(2013, 9, 8));
    }

    #[test]
    fn test_explicit_date_wins() {
        let json = r#"{"games": [{"gamekey": "1", "eid": "2013090800", "date": "2013-09-09",
            "home": "A", "away": "B", "drives": []}]}"#;
        let games = parse_week(json).unwrap();
        assert_eq!(games[0].date, NaiveDate::from_ymd_opt(2013, 9, 9));
    }

    #[test]
    fn test_bad_date_is_error() {
        let json = r#"{"games": [{"gamekey": "1", "date": "09/09/2013", "home": "A", "away": "B"}]}"#;
        assert!(parse_week(json).is_err());
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_week("{}").unwrap().is_empty());
    }
}
