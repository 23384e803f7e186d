//! Piecewise weights for each situational feature and the composite index.
//!
//! Index = yard line x distance x score x clock. Every factor is 1.0 for the
//! most "defensible" punts, so a routine punt from deep in your own end on 4th
//! and long while leading early scores well under 1.

use super::classifier::EventClassifier;
use super::features::{field_position, first_down_distance, score_differential, seconds_remaining};
use crate::error::Result;
use crate::feed::types::PlayHandle;

/// Seconds in a regulation quarter; folds the 4th-quarter clock onto the 3rd.
const QUARTER_SECS: u32 = 15 * 60;

/// 1.0 up to the own 40, +10% per yard to midfield, then +20% per yard.
pub fn yard_line_multiplier(field_position: u8) -> f64 {
    match field_position {
        0..=40 => 1.0,
        41..=50 => 1.1_f64.powi(field_position as i32 - 40),
        _ => 1.1_f64.powi(10) * 1.2_f64.powi(field_position as i32 - 50),
    }
}

/// 4th and 1 is no discount; the longer the distance, the more forgivable.
pub fn first_down_distance_multiplier(distance: u8) -> f64 {
    match distance {
        0..=1 => 1.0,
        2..=3 => 0.8,
        4..=6 => 0.6,
        7..=9 => 0.4,
        _ => 0.2,
    }
}

/// Leading 1x, tied 2x, down two or more scores 3x, down one score 4x.
/// Exactly -8 is still one score (touchdown plus two-point conversion).
pub fn score_differential_multiplier(diff: i32) -> f64 {
    if diff > 0 {
        1.0
    } else if diff == 0 {
        2.0
    } else if diff < -8 {
        3.0
    } else {
        4.0
    }
}

/// `(t * 0.001)^3 + 1` where `t` counts down through the second half:
/// the 3rd-quarter clock as-is, the 4th-quarter clock plus 900. Other quarters,
/// overtime included, are 1.0.
pub fn clock_multiplier(quarter: u8, seconds_remaining: u32) -> f64 {
    let t = match quarter {
        3 => seconds_remaining,
        4 => seconds_remaining.saturating_add(QUARTER_SECS),
        _ => return 1.0,
    };
    (t as f64 * 0.001).powi(3) + 1.0
}

/// The four factors behind one play's index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurrenderBreakdown {
    pub field_position: u8,
    pub yards_to_go: u8,
    pub score_differential: i32,
    pub seconds_remaining: u32,
    pub yard_line: f64,
    pub distance: f64,
    pub score: f64,
    pub clock: f64,
}

impl SurrenderBreakdown {
    pub fn index(&self) -> f64 {
        self.yard_line * self.distance * self.score * self.clock
    }
}

pub fn surrender_breakdown(handle: &PlayHandle, classifier: &dyn EventClassifier) -> Result<SurrenderBreakdown> {
    let play = handle.play();
    let field_position = field_position(play)?;
    let yards_to_go = first_down_distance(play);
    let seconds = seconds_remaining(play)?;
    let diff = score_differential(handle, classifier)?;

    Ok(SurrenderBreakdown {
        field_position,
        yards_to_go,
        score_differential: diff,
        seconds_remaining: seconds,
        yard_line: yard_line_multiplier(field_position),
        distance: first_down_distance_multiplier(yards_to_go),
        score: score_differential_multiplier(diff),
        clock: clock_multiplier(play.quarter, seconds),
    })
}

pub fn surrender_index(handle: &PlayHandle, classifier: &dyn EventClassifier) -> Result<f64> {
    surrender_breakdown(handle, classifier).map(|b| b.index())
}
