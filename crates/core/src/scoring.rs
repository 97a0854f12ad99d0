use thiserror::Error;

use crate::model::{
    EvaluationPayload, ExerciseType, MatchingStats, Question, RawAnswer, WordMatchingQuestion,
    WrongAnswer,
};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoringError {
    #[error("answer {index} is a {answer} answer but the question is {question}")]
    AnswerKindMismatch {
        index: usize,
        question: ExerciseType,
        answer: ExerciseType,
    },
}

//
// ─── POLICY ────────────────────────────────────────────────────────────────────
//

/// Converts a finished question/answer set into an evaluation payload.
///
/// Implementations must be pure: no I/O, inputs untouched, identical inputs give
/// identical payloads.
pub trait ScoringPolicy: Send + Sync {
    /// Score every question that has an answer at the same index.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::AnswerKindMismatch` when a pair has different variants.
    fn evaluate(
        &self,
        questions: &[Question],
        answers: &[RawAnswer],
    ) -> Result<EvaluationPayload, ScoringError>;
}

/// Current scoring rules.
///
/// Grammar and dialogue questions are one unit each, scored by exact string equality.
/// A word-matching round contributes one unit per pair, minus one per wrong attempt,
/// never below zero, and produces a single summary mistake when any attempt was wrong.
#[derive(Debug, Clone, Copy, Default)]
pub struct GranularScoring;

impl ScoringPolicy for GranularScoring {
    fn evaluate(
        &self,
        questions: &[Question],
        answers: &[RawAnswer],
    ) -> Result<EvaluationPayload, ScoringError> {
        let mut tally = Tally::default();

        for (index, (question, answer)) in questions.iter().zip(answers).enumerate() {
            match (question, answer) {
                (Question::Grammar(q), RawAnswer::Grammar { answer }) => {
                    tally.binary(&q.sentence_template, answer, &q.correct_word);
                }
                (Question::Dialogue(q), RawAnswer::Dialogue { answer }) => {
                    tally.binary(&q.question, answer, &q.correct_answer);
                }
                (Question::WordMatching(q), RawAnswer::WordMatching(stats)) => {
                    tally.matching(q, *stats);
                }
                _ => {
                    return Err(ScoringError::AnswerKindMismatch {
                        index,
                        question: question.exercise_type(),
                        answer: answer.exercise_type(),
                    });
                }
            }
        }

        Ok(tally.into_payload())
    }
}

/// Score with the default policy.
///
/// # Errors
///
/// See [`ScoringPolicy::evaluate`].
pub fn build_evaluation_payload(
    questions: &[Question],
    answers: &[RawAnswer],
) -> Result<EvaluationPayload, ScoringError> {
    GranularScoring.evaluate(questions, answers)
}

/// Integer percentage, rounding exact halves up. Returns 0 when `possible` is 0.
#[must_use]
pub fn percentage(correct: u32, possible: u32) -> u32 {
    if possible == 0 {
        return 0;
    }
    let correct = u64::from(correct.min(possible));
    let possible = u64::from(possible);
    let rounded = (200 * correct + possible) / (2 * possible);
    u32::try_from(rounded.min(100)).unwrap_or(100)
}

//
// ─── ACCUMULATOR ───────────────────────────────────────────────────────────────
//

#[derive(Default)]
struct Tally {
    possible: u32,
    correct: u32,
    wrong_answers: Vec<WrongAnswer>,
}

impl Tally {
    fn binary(&mut self, prompt: &str, given: &str, expected: &str) {
        self.possible = self.possible.saturating_add(1);
        if given == expected {
            self.correct = self.correct.saturating_add(1);
        } else {
            self.wrong_answers.push(WrongAnswer {
                question: prompt.to_owned(),
                user_answer: given.to_owned(),
                correct_answer: expected.to_owned(),
            });
        }
    }

    fn matching(&mut self, question: &WordMatchingQuestion, stats: MatchingStats) {
        let net_correct = stats.net_correct();
        self.possible = self.possible.saturating_add(stats.total_pairs);
        self.correct = self.correct.saturating_add(net_correct);

        if stats.wrong_attempts > 0 {
            self.wrong_answers.push(WrongAnswer {
                question: format!("Kelime Eşleştirme ({})", question.topic),
                user_answer: format!("{net_correct}/{} doğru", stats.total_pairs),
                correct_answer: format!(
                    "Bu turda {} yanlış deneme yaptın.",
                    stats.wrong_attempts
                ),
            });
        }
    }

    fn into_payload(self) -> EvaluationPayload {
        EvaluationPayload {
            total_questions: self.possible,
            correct_answers: self.correct,
            final_score: percentage(self.correct, self.possible),
            wrong_answers: self.wrong_answers,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
