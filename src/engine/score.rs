use super::classifier::EventClassifier;
use crate::error::{Result, SurrenderError};
use crate::feed::types::{Game, Play, PlayHandle};

/// Running game score. Only ever incremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub away: u16,
    pub home: u16,
}

impl ScoreState {
    pub fn new(away: u16, home: u16) -> Self {
        Self { away, home }
    }

    /// Points for `team` minus points for the other side. A team code that is
    /// neither home nor away is treated as the away side.
    pub fn differential_for(&self, game: &Game, team: &str) -> i32 {
        if team == game.home {
            self.home as i32 - self.away as i32
        } else {
            self.away as i32 - self.home as i32
        }
    }

    fn credit(&mut self, game: &Game, team: &str, points: u16) {
        if team == game.home {
            self.home += points;
        } else {
            self.away += points;
        }
    }
}

/// Score immediately before `target`, rebuilt by replaying its game from the
/// opening kickoff.
pub fn score_at_play(target: &PlayHandle, classifier: &dyn EventClassifier) -> Result<ScoreState> {
    score_before(target.game(), target.play(), classifier)
}

/// Replay `game` until a play with `target`'s description comes up.
///
/// The target play itself is not scored. Returns `PlayNotFound` if no play in
/// the game carries the target's description.
pub fn score_before(game: &Game, target: &Play, classifier: &dyn EventClassifier) -> Result<ScoreState> {
    let target_desc = target.description.as_str();
    let mut score = ScoreState::default();

    for play in &game.plays {
        if play.description == target_desc {
            return Ok(score);
        }

        let ruling = classifier.final_ruling(&play.description);
        let events = classifier.classify(ruling);

        let mut possessor = play.possessing_team.as_str();
        for _ in &events.possession_changes {
            possessor = game.opponent_of(possessor);
        }

        if let Some(event) = events.score {
            let scorer = if event.credits_defense() {
                game.opponent_of(possessor)
            } else {
                possessor
            };
            score.credit(game, scorer, event.points());
            tracing::trace!(
                game = %game.game_id,
                play = %play.play_id,
                ?event,
                scorer,
                away = score.away,
                home = score.home,
                "scoring play"
            );
        }
    }

    tracing::warn!(game = %game.game_id, play = %target.play_id, "target play missing from its game");
    Err(SurrenderError::PlayNotFound {
        game_id: game.game_id.clone(),
        description: target_desc.to_string(),
    })
}
