use super::classifier::EventClassifier;
use super::multipliers::{surrender_breakdown, SurrenderBreakdown};
use crate::error::{Result, SurrenderError};
use crate::feed::types::PlayHandle;
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;

/// What to do when a single play cannot be scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log the play, record it in the outcome, keep ranking the rest.
    #[default]
    Skip,
    /// Fail the whole batch with the first error (in input order).
    Abort,
}

#[derive(Debug, Clone)]
pub struct SurrenderIndexResult {
    pub play: PlayHandle,
    pub index: f64,
    pub breakdown: SurrenderBreakdown,
}

#[derive(Debug, Clone)]
pub struct SkippedPlay {
    pub play: PlayHandle,
    pub error: SurrenderError,
}

#[derive(Debug, Clone, Default)]
pub struct RankOutcome {
    /// Highest index first; equal indices keep input order.
    pub ranked: Vec<SurrenderIndexResult>,
    pub skipped: Vec<SkippedPlay>,
}

type Scored = (usize, PlayHandle, Result<SurrenderBreakdown>);

fn score_all(
    plays: impl IntoIterator<Item = (usize, PlayHandle)>,
    classifier: &dyn EventClassifier,
) -> Vec<Scored> {
    plays
        .into_iter()
        .map(|(position, handle)| {
            let breakdown = surrender_breakdown(&handle, classifier);
            (position, handle, breakdown)
        })
        .collect()
}

/// Split scored plays into a sorted ranking and the failures, applying `policy`.
fn into_outcome(mut scored: Vec<Scored>, policy: ErrorPolicy) -> Result<RankOutcome> {
    scored.sort_by_key(|(position, _, _)| *position);

    let mut ranked = Vec::with_capacity(scored.len());
    let mut skipped = Vec::new();
    for (position, handle, breakdown) in scored {
        match breakdown {
            Ok(breakdown) => ranked.push((
                position,
                SurrenderIndexResult { play: handle, index: breakdown.index(), breakdown },
            )),
            Err(error) => match policy {
                ErrorPolicy::Abort => return Err(error),
                ErrorPolicy::Skip => {
                    tracing::warn!(play = %handle, error = %error, "skipping play");
                    skipped.push(SkippedPlay { play: handle, error });
                }
            },
        }
    }

    // Stable sort on input order already established above.
    ranked.sort_by(|(_, a), (_, b)| b.index.total_cmp(&a.index));

    Ok(RankOutcome {
        ranked: ranked.into_iter().map(|(_, r)| r).collect(),
        skipped,
    })
}

/// Score every play and sort descending. Any failure fails the batch.
pub fn rank(plays: &[PlayHandle], classifier: &dyn EventClassifier) -> Result<Vec<SurrenderIndexResult>> {
    rank_with_policy(plays, classifier, ErrorPolicy::Abort).map(|outcome| outcome.ranked)
}

pub fn rank_with_policy(
    plays: &[PlayHandle],
    classifier: &dyn EventClassifier,
    policy: ErrorPolicy,
) -> Result<RankOutcome> {
    let scored = score_all(plays.iter().cloned().enumerate(), classifier);
    let outcome = into_outcome(scored, policy)?;
    tracing::debug!(ranked = outcome.ranked.len(), skipped = outcome.skipped.len(), "ranked plays");
    Ok(outcome)
}

/// Same result as [`rank_with_policy`], with each game scored on its own
/// blocking worker. Games share nothing mutable, so workers never coordinate.
pub async fn rank_parallel(
    plays: Vec<PlayHandle>,
    classifier: Arc<dyn EventClassifier>,
    policy: ErrorPolicy,
) -> anyhow::Result<RankOutcome> {
    let mut by_game: HashMap<usize, Vec<(usize, PlayHandle)>> = HashMap::new();
    for (position, handle) in plays.into_iter().enumerate() {
        by_game
            .entry(Arc::as_ptr(handle.shared_game()) as usize)
            .or_default()
            .push((position, handle));
    }

    let games = by_game.len();
    let mut workers = JoinSet::new();
    for (_, batch) in by_game {
        let classifier = Arc::clone(&classifier);
        workers.spawn_blocking(move || score_all(batch, classifier.as_ref()));
    }

    let mut scored = Vec::new();
    while let Some(joined) = workers.join_next().await {
        scored.extend(joined.context("ranking worker panicked")?);
    }

    let outcome = into_outcome(scored, policy)?;
    tracing::debug!(
        games,
        ranked = outcome.ranked.len(),
        skipped = outcome.skipped.len(),
        "ranked plays in parallel"
    );
    Ok(outcome)
}
