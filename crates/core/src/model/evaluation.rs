use serde::{Deserialize, Serialize};

/// A human-readable explanation of one mistake, fed to feedback generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrongAnswer {
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
}

/// Normalized result of scoring a finished session.
///
/// `total_questions` counts scoreable units, which is not the number of questions
/// when word-matching rounds are involved.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvaluationPayload {
    pub total_questions: u32,
    pub correct_answers: u32,
    /// Percentage in `0..=100`.
    pub final_score: u32,
    pub wrong_answers: Vec<WrongAnswer>,
}

/// Score and personalised feedback returned by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub score: u32,
    pub feedback: String,
}
