// Report rows and rendering for ranked punts

use crate::engine::ranker::{RankOutcome, SurrenderIndexResult};
use crate::harvest::FetchFailure;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

/// One ranked punt, flattened for display or export.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportRow {
    pub rank: usize,
    pub game_id: String,
    pub date: Option<NaiveDate>,
    pub matchup: String,
    pub team: String,
    pub quarter: u8,
    pub clock: String,
    pub yard_line: String,
    pub yards_to_go: u8,
    pub score_differential: i32,
    pub surrender_index: f64,
    pub description: String,
}

impl ReportRow {
    pub fn from_result(rank: usize, result: &SurrenderIndexResult) -> Self {
        let play = result.play.play();
        let game = result.play.game();
        Self {
            rank,
            game_id: game.game_id.clone(),
            date: game.date,
            matchup: game.matchup(),
            team: play.possessing_team.clone(),
            quarter: play.quarter,
            clock: play.clock.clone(),
            yard_line: play.yard_line.clone(),
            yards_to_go: play.yards_to_go,
            score_differential: result.breakdown.score_differential,
            surrender_index: result.index,
            description: play.description.clone(),
        }
    }
}

/// Rows for the top `limit` results (all of them when `limit` is 0).
pub fn build_rows(results: &[SurrenderIndexResult], limit: usize) -> Vec<ReportRow> {
    let take = if limit == 0 { results.len() } else { limit };
    results
        .iter()
        .take(take)
        .enumerate()
        .map(|(i, r)| ReportRow::from_result(i + 1, r))
        .collect()
}

fn quarter_label(quarter: u8) -> String {
    if quarter >= 5 {
        "OT".to_string()
    } else {
        format!("Q{}", quarter)
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

pub fn render_table(rows: &[ReportRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:>9}  {:<11}  {:<4}  {:<3} {:>5}  {:<7}  {:>4}  {:>5}  {}",
        "RANK", "INDEX", "GAME", "TEAM", "QTR", "CLOCK", "YDLN", "TOGO", "DIFF", "PLAY"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:>4}  {:>9.2}  {:<11}  {:<4}  {:<3} {:>5}  {:<7}  {:>4}  {:>+5}  {}",
            row.rank,
            row.surrender_index,
            row.matchup,
            row.team,
            quarter_label(row.quarter),
            row.clock,
            row.yard_line,
            row.yards_to_go,
            row.score_differential,
            truncate(&row.description, 80)
        );
    }
    out
}

pub fn render_json(rows: &[ReportRow]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}

/// Fetch failures and skipped plays, or an empty string when there are none.
pub fn render_problems(failures: &[FetchFailure], outcome: &RankOutcome) -> String {
    let mut out = String::new();
    if !failures.is_empty() {
        let _ = writeln!(out, "{} week(s) failed to load:", failures.len());
        for f in failures {
            let _ = writeln!(out, "  {} week {:>2}: {:#}", f.season, f.week, f.error);
        }
    }
    if !outcome.skipped.is_empty() {
        let _ = writeln!(out, "{} punt(s) could not be scored:", outcome.skipped.len());
        for s in &outcome.skipped {
            let _ = writeln!(out, "  {}: {}", s.play, s.error);
        }
    }
    out
}
