use serde::{Deserialize, Serialize};

use crate::model::ExerciseType;

/// Statistics collected while the user worked through a word-matching round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingStats {
    /// Matchable items in the round.
    pub total_pairs: u32,
    /// Incorrect attempts made before the round was completed.
    pub wrong_attempts: u32,
}

impl MatchingStats {
    #[must_use]
    pub fn new(total_pairs: u32, wrong_attempts: u32) -> Self {
        Self {
            total_pairs,
            wrong_attempts,
        }
    }

    /// Pairs credited after subtracting wrong attempts, floored at zero.
    #[must_use]
    pub fn net_correct(&self) -> u32 {
        self.total_pairs.saturating_sub(self.wrong_attempts)
    }
}

/// What the user submitted for one question, unscored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawAnswer {
    Grammar { answer: String },
    Dialogue { answer: String },
    WordMatching(MatchingStats),
}

impl RawAnswer {
    #[must_use]
    pub fn grammar(answer: impl Into<String>) -> Self {
        Self::Grammar {
            answer: answer.into(),
        }
    }

    #[must_use]
    pub fn dialogue(answer: impl Into<String>) -> Self {
        Self::Dialogue {
            answer: answer.into(),
        }
    }

    #[must_use]
    pub fn word_matching(total_pairs: u32, wrong_attempts: u32) -> Self {
        Self::WordMatching(MatchingStats::new(total_pairs, wrong_attempts))
    }

    #[must_use]
    pub fn exercise_type(&self) -> ExerciseType {
        match self {
            RawAnswer::Grammar { .. } => ExerciseType::Grammar,
            RawAnswer::Dialogue { .. } => ExerciseType::Dialogue,
            RawAnswer::WordMatching(_) => ExerciseType::WordMatching,
        }
    }
}
