use thiserror::Error;

use crate::model::{EvaluationResult, ExerciseType, Question, RawAnswer};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStateError {
    #[error("exercise contains no questions")]
    Empty,

    #[error("answer for {answer} submitted to {question} question at index {index}")]
    AnswerKindMismatch {
        index: usize,
        question: ExerciseType,
        answer: ExerciseType,
    },
}

/// Result of offering an answer to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The session was inactive or already finished; nothing changed.
    Ignored,
    /// The cursor moved forward by one.
    Advanced { finished: bool },
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State of one exercise attempt, from load to evaluation.
///
/// Invariants:
/// - `answers.len() == current_index`
/// - `active` implies `questions` is non-empty
/// - finished iff `active && current_index >= questions.len()`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    questions: Vec<Question>,
    current_index: usize,
    answers: Vec<RawAnswer>,
    active: bool,
    final_score: Option<u32>,
    final_feedback: Option<String>,
    error: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a freshly fetched question batch and activate the session.
    ///
    /// Any previous state is discarded first.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::Empty` if `questions` is empty; the session stays inactive.
    pub fn load(&mut self, questions: Vec<Question>) -> Result<(), SessionStateError> {
        self.reset();
        if questions.is_empty() {
            return Err(SessionStateError::Empty);
        }
        self.questions = questions;
        self.active = true;
        Ok(())
    }

    /// Append an answer at the cursor and advance by one.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::AnswerKindMismatch` if the answer variant does not match
    /// the current question. The session is left untouched.
    pub fn record_answer(&mut self, answer: RawAnswer) -> Result<AnswerOutcome, SessionStateError> {
        let Some(question) = self.current_question() else {
            return Ok(AnswerOutcome::Ignored);
        };

        let expected = question.exercise_type();
        if answer.exercise_type() != expected {
            return Err(SessionStateError::AnswerKindMismatch {
                index: self.current_index,
                question: expected,
                answer: answer.exercise_type(),
            });
        }

        self.answers.push(answer);
        self.current_index += 1;

        Ok(AnswerOutcome::Advanced {
            finished: self.is_finished(),
        })
    }

    pub fn record_evaluation(&mut self, result: EvaluationResult) {
        self.final_score = Some(result.score);
        self.final_feedback = Some(result.feedback);
        self.error = None;
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Clear everything back to the empty, inactive state. Idempotent.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[RawAnswer] {
        &self.answers
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.active && self.current_index >= self.questions.len()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.active {
            self.questions.get(self.current_index)
        } else {
            None
        }
    }

    #[must_use]
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    #[must_use]
    pub fn final_feedback(&self) -> Option<&str> {
        self.final_feedback.as_deref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        SessionProgress {
            total,
            answered: self.answers.len(),
            remaining: total.saturating_sub(self.current_index),
            is_complete: self.is_finished(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
