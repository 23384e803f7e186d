//! Situational features pulled from a single play record.

use super::classifier::EventClassifier;
use super::score::score_at_play;
use crate::error::{Result, SurrenderError};
use crate::feed::types::{Play, PlayHandle};

const MIDFIELD: u8 = 50;
const QUARTER_MINUTES: u32 = 15;

/// Field position on a 1-100 scale from the possessing team's goal line.
/// 1-50 is the offense's own half, 50-100 the opponent's.
pub fn field_position(play: &Play) -> Result<u8> {
    let raw = play.yard_line.trim();
    let invalid = |reason| SurrenderError::InvalidYardLine { value: play.yard_line.clone(), reason };

    let mut parts = raw.split_whitespace();
    let (side, yard) = match (parts.next(), parts.next(), parts.next()) {
        (Some(yard), None, None) => (None, yard),
        (Some(side), Some(yard), None) => (Some(side), yard),
        (None, _, _) => return Err(invalid("empty")),
        _ => return Err(invalid("expected \"<TEAM> <YARD>\"")),
    };

    let yard: u8 = yard.parse().map_err(|_| invalid("yard is not a number"))?;
    if yard == MIDFIELD {
        return Ok(MIDFIELD);
    }
    if !(1..MIDFIELD).contains(&yard) {
        return Err(invalid("yard outside 1-50"));
    }
    let Some(side) = side else {
        return Err(invalid("missing team side"));
    };

    if side == play.possessing_team {
        Ok(yard)
    } else {
        Ok(MIDFIELD + (MIDFIELD - yard))
    }
}

pub fn first_down_distance(play: &Play) -> u8 {
    play.yards_to_go
}

/// Possessing team's score minus the opponent's, just before the play.
pub fn score_differential(handle: &PlayHandle, classifier: &dyn EventClassifier) -> Result<i32> {
    let score = score_at_play(handle, classifier)?;
    Ok(score.differential_for(handle.game(), &handle.play().possessing_team))
}

/// Seconds left in the quarter from a `"MM:SS"` clock.
pub fn seconds_remaining(play: &Play) -> Result<u32> {
    let invalid = |reason| SurrenderError::InvalidClock { value: play.clock.clone(), reason };
    let (min_str, sec_str) = play.clock.trim().split_once(':').ok_or_else(|| invalid("expected MM:SS"))?;
    let minutes: u32 = min_str.parse().map_err(|_| invalid("minutes are not a number"))?;
    let seconds: u32 = sec_str.parse().map_err(|_| invalid("seconds are not a number"))?;
    if seconds >= 60 {
        return Err(invalid("seconds must be below 60"));
    }
    if minutes > QUARTER_MINUTES || (minutes == QUARTER_MINUTES && seconds > 0) {
        return Err(invalid("clock beyond 15:00"));
    }
    Ok(minutes * 60 + seconds)
}
