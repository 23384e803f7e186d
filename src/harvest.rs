//! Season/week sweep over a play feed, collecting punts.
//!
//! Every (season, week) fetch is attempted independently; a failed week is
//! recorded in [`Harvest::failures`] and the sweep moves on.

use crate::feed::types::{Game, PlayHandle};
use crate::feed::PlayFeed;
use chrono::NaiveDate;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Inclusive date window. Open ends match everything; games without a date
/// are always kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        let Some(date) = date else { return true };
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

#[derive(Debug)]
pub struct FetchFailure {
    pub season: u16,
    pub week: u8,
    pub error: anyhow::Error,
}

#[derive(Debug, Default)]
pub struct Harvest {
    pub games: Vec<Arc<Game>>,
    pub punts: Vec<PlayHandle>,
    pub failures: Vec<FetchFailure>,
    pub weeks_loaded: usize,
}

/// Plays in `game` whose description contains `punt_marker`, in game order.
pub fn punts_in(game: &Arc<Game>, punt_marker: &str) -> Vec<PlayHandle> {
    game.plays
        .iter()
        .enumerate()
        .filter(|(_, play)| play.description.contains(punt_marker))
        .filter_map(|(index, _)| PlayHandle::new(Arc::clone(game), index))
        .collect()
}

pub async fn harvest(
    feed: &dyn PlayFeed,
    seasons: RangeInclusive<u16>,
    weeks: RangeInclusive<u8>,
    dates: DateRange,
    punt_marker: &str,
) -> Harvest {
    let mut out = Harvest::default();

    for season in seasons {
        for week in weeks.clone() {
            let games = match feed.fetch_week(season, week).await {
                Ok(games) => games,
                Err(error) => {
                    tracing::warn!(feed = feed.name(), season, week, error = %format!("{:#}", error), "week fetch failed");
                    out.failures.push(FetchFailure { season, week, error });
                    continue;
                }
            };
            out.weeks_loaded += 1;

            for game in games {
                if !dates.contains(game.date) {
                    continue;
                }
                let game = Arc::new(game);
                out.punts.extend(punts_in(&game, punt_marker));
                out.games.push(game);
            }
        }
    }

    tracing::info!(
        games = out.games.len(),
        punts = out.punts.len(),
        weeks = out.weeks_loaded,
        failed_weeks = out.failures.len(),
        "harvest complete"
    );
    out
}
