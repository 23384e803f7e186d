//! Turns play descriptions into scoring and possession events.
//!
//! Detection is plain substring matching against an [`EventVocabulary`]. The
//! score reconstructor only sees [`PlayEvents`], so the phrases can change
//! (config, another provider's wording) without touching the replay logic.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreEvent {
    Touchdown,
    FieldGoal,
    ExtraPoint,
    TwoPointConversion,
    Safety,
}

impl ScoreEvent {
    pub fn points(self) -> u16 {
        match self {
            ScoreEvent::Touchdown => 6,
            ScoreEvent::FieldGoal => 3,
            ScoreEvent::ExtraPoint => 1,
            ScoreEvent::TwoPointConversion | ScoreEvent::Safety => 2,
        }
    }

    /// Safeties are scored against the team in possession.
    pub fn credits_defense(self) -> bool {
        matches!(self, ScoreEvent::Safety)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PossessionChange {
    Interception,
    FumbleRecovery,
}

/// Everything the reconstructor needs to know about one play.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayEvents {
    /// In the order they are applied; each one flips possession.
    pub possession_changes: Vec<PossessionChange>,
    /// At most one scoring event is credited per play.
    pub score: Option<ScoreEvent>,
}

pub trait EventClassifier: Send + Sync {
    /// Text that counts for scoring. A reviewed-and-reversed play keeps only
    /// the final ruling.
    fn final_ruling<'a>(&self, description: &'a str) -> &'a str;

    /// Classify an already normalized description.
    fn classify(&self, description: &str) -> PlayEvents;
}

/// Provider phrases, overridable from the `[vocabulary]` config section.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EventVocabulary {
    pub reversal: String,
    pub interception: String,
    pub fumble_recovery: String,
    pub muff: String,
    pub touchdown: String,
    pub field_goal: String,
    pub extra_point: String,
    pub two_point_attempt: String,
    pub two_point_success: String,
    pub safety: String,
}

impl Default for EventVocabulary {
    fn default() -> Self {
        Self {
            reversal: "and the play was REVERSED".to_string(),
            interception: "INTERCEPTED".to_string(),
            fumble_recovery: "RECOVERED by".to_string(),
            muff: "MUFFS".to_string(),
            touchdown: "TOUCHDOWN".to_string(),
            field_goal: "field goal is GOOD".to_string(),
            extra_point: "extra point is GOOD".to_string(),
            two_point_attempt: "TWO-POINT CONVERSION ATTEMPT".to_string(),
            two_point_success: "ATTEMPT SUCCEEDS".to_string(),
            safety: "SAFETY".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VocabularyClassifier {
    vocabulary: EventVocabulary,
}

impl VocabularyClassifier {
    pub fn new(vocabulary: EventVocabulary) -> Self {
        Self { vocabulary }
    }

    fn contains(description: &str, marker: &str) -> bool {
        !marker.is_empty() && description.contains(marker)
    }
}

impl EventClassifier for VocabularyClassifier {
    fn final_ruling<'a>(&self, description: &'a str) -> &'a str {
        let marker = self.vocabulary.reversal.as_str();
        if marker.is_empty() {
            return description;
        }
        match description.find(marker) {
            Some(at) => description[at + marker.len()..].trim_start_matches('.'),
            None => description,
        }
    }

    fn classify(&self, description: &str) -> PlayEvents {
        let v = &self.vocabulary;
        let mut events = PlayEvents::default();

        if Self::contains(description, &v.interception) {
            events.possession_changes.push(PossessionChange::Interception);
        }
        // A muffed punt recovered by the kicking team does not change possession.
        if Self::contains(description, &v.fumble_recovery) && !Self::contains(description, &v.muff) {
            events.possession_changes.push(PossessionChange::FumbleRecovery);
        }

        events.score = if Self::contains(description, &v.touchdown) {
            Some(ScoreEvent::Touchdown)
        } else if Self::contains(description, &v.field_goal) {
            Some(ScoreEvent::FieldGoal)
        } else if Self::contains(description, &v.extra_point) {
            Some(ScoreEvent::ExtraPoint)
        } else if Self::contains(description, &v.two_point_attempt)
            && Self::contains(description, &v.two_point_success)
        {
            Some(ScoreEvent::TwoPointConversion)
        } else if Self::contains(description, &v.safety) {
            Some(ScoreEvent::Safety)
        } else {
            None
        };

        events
    }
}
