pub mod classifier;
pub mod features;
pub mod multipliers;
pub mod ranker;
pub mod score;

pub use classifier::{EventClassifier, EventVocabulary, VocabularyClassifier};
pub use multipliers::{surrender_index, SurrenderBreakdown};
pub use ranker::{rank, rank_parallel, rank_with_policy, ErrorPolicy, RankOutcome, SurrenderIndexResult};
pub use score::{score_at_play, ScoreState};
