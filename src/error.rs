use thiserror::Error;

/// Failures raised while scoring a single play.
///
/// Parse failures come from the provider's situational fields; `PlayNotFound`
/// means the play is missing from its own game's play sequence, which is an
/// upstream data problem and must never be reported as a zero score.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurrenderError {
    #[error("invalid yard line {value:?}: {reason}")]
    InvalidYardLine { value: String, reason: &'static str },

    #[error("invalid game clock {value:?}: {reason}")]
    InvalidClock { value: String, reason: &'static str },

    #[error("play not found in game {game_id}: {description:?}")]
    PlayNotFound { game_id: String, description: String },
}

impl SurrenderError {
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::InvalidYardLine { .. } | Self::InvalidClock { .. })
    }
}

pub type Result<T> = std::result::Result<T, SurrenderError>;
