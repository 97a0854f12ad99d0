use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use exercise_core::model::{
    AnswerOutcome, EvaluationResult, ExerciseType, Question, RawAnswer, Session, SessionProgress,
};
use exercise_core::{GranularScoring, ScoringPolicy};

use super::view::SessionSnapshot;
use crate::api::ExerciseApi;
use crate::error::SessionError;

/// Shown when a question batch could not be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Alıştırma yüklenirken bir hata oluştu.";
/// Shown when the finished session could not be evaluated.
pub const EVALUATION_FAILED_MESSAGE: &str = "Sonuçlar değerlendirilirken bir hata oluştu.";

/// Result of submitting one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No active session, or it already finished; nothing changed.
    Ignored,
    /// The answer was recorded and more questions remain.
    Advanced(SessionProgress),
    /// The answer finished the session and evaluation succeeded.
    Evaluated(EvaluationResult),
}

#[derive(Default)]
struct ControllerState {
    session: Session,
    is_loading: bool,
    /// Bumped by every start and reset; responses from older generations are dropped.
    generation: u64,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Drives one exercise session at a time from load through evaluation.
///
/// Cloning yields another handle to the same session. The state lock is never held
/// across an `.await`, so readers always observe the state before or after a step,
/// never halfway through one.
#[derive(Clone)]
pub struct SessionController {
    api: ExerciseApi,
    scoring: Arc<dyn ScoringPolicy>,
    state: Arc<Mutex<ControllerState>>,
}

impl SessionController {
    #[must_use]
    pub fn new(api: ExerciseApi) -> Self {
        Self {
            api,
            scoring: Arc::new(GranularScoring),
            state: Arc::new(Mutex::new(ControllerState::default())),
        }
    }

    #[must_use]
    pub fn with_scoring(mut self, scoring: Arc<dyn ScoringPolicy>) -> Self {
        self.scoring = scoring;
        self
    }

    /// Discard any current session and load a new batch for `exercise_type`.
    ///
    /// Returns the number of questions loaded. On failure the session stays inactive
    /// with a fixed error message; calling again is the retry.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::LoadFailed` or `SessionError::EmptyExercise` if no usable
    /// batch arrived, and `SessionError::Superseded` if another start or reset happened
    /// while the request was in flight.
    pub async fn start_session(&self, exercise_type: ExerciseType) -> Result<usize, SessionError> {
        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.session.reset();
            state.is_loading = true;
            state.generation
        };
        info!(%exercise_type, generation, "starting exercise session");

        let fetched = self.api.exercises.fetch_exercise(exercise_type).await;

        let mut state = self.lock();
        if state.generation != generation {
            debug!(generation, current = state.generation, "dropping stale exercise batch");
            return Err(SessionError::Superseded);
        }
        state.is_loading = false;

        let batch = match fetched {
            Ok(batch) => batch,
            Err(err) => {
                warn!(%exercise_type, error = %err, "exercise load failed");
                state.session.record_error(LOAD_FAILED_MESSAGE);
                return Err(SessionError::LoadFailed(err));
            }
        };

        if state.session.load(batch.questions).is_err() {
            warn!(%exercise_type, "exercise batch was empty");
            state.session.record_error(LOAD_FAILED_MESSAGE);
            return Err(SessionError::EmptyExercise);
        }

        let loaded = state.session.questions().len();
        info!(%exercise_type, questions = loaded, "exercise session loaded");
        Ok(loaded)
    }

    /// Record the answer for the current question and advance.
    ///
    /// When this answers the last question the session is scored and evaluated before
    /// returning.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::State` if the answer does not fit the current question
    /// (nothing is recorded), and the errors of evaluation when this answer finished
    /// the session.
    pub async fn submit_answer(&self, answer: RawAnswer) -> Result<SubmitOutcome, SessionError> {
        let (generation, questions, answers) = {
            let mut state = self.lock();
            match state.session.record_answer(answer)? {
                AnswerOutcome::Ignored => return Ok(SubmitOutcome::Ignored),
                AnswerOutcome::Advanced { finished: false } => {
                    return Ok(SubmitOutcome::Advanced(state.session.progress()));
                }
                AnswerOutcome::Advanced { finished: true } => {}
            }
            state.is_loading = true;
            (
                state.generation,
                state.session.questions().to_vec(),
                state.session.answers().to_vec(),
            )
        };

        self.evaluate(generation, &questions, &answers)
            .await
            .map(SubmitOutcome::Evaluated)
    }

    /// Clear the session back to its empty, inactive state. Idempotent.
    ///
    /// Any request still in flight for the cleared session is ignored when it resolves.
    pub fn reset_session(&self) {
        let mut state = self.lock();
        state.generation += 1;
        state.session.reset();
        state.is_loading = false;
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock();
        SessionSnapshot {
            session: state.session.clone(),
            is_loading: state.is_loading,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().is_loading
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.lock().session.is_finished()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<Question> {
        self.lock().session.current_question().cloned()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        self.lock().session.progress()
    }

    async fn evaluate(
        &self,
        generation: u64,
        questions: &[Question],
        answers: &[RawAnswer],
    ) -> Result<EvaluationResult, SessionError> {
        let payload = match self.scoring.evaluate(questions, answers) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "scoring rejected the finished session");
                self.fail_evaluation(generation);
                return Err(err.into());
            }
        };
        debug!(
            total = payload.total_questions,
            correct = payload.correct_answers,
            score = payload.final_score,
            mistakes = payload.wrong_answers.len(),
            "evaluation payload built"
        );

        let result = match self.api.evaluator.submit_evaluation(&payload).await {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "evaluation request failed");
                self.fail_evaluation(generation);
                return Err(SessionError::EvaluationFailed(err));
            }
        };

        {
            let mut state = self.lock();
            if state.generation != generation {
                debug!(generation, "dropping stale evaluation result");
                return Err(SessionError::Superseded);
            }
            state.session.record_evaluation(result.clone());
        }
        info!(score = result.score, "session evaluated");

        if let Err(err) = self.api.profile.refresh_user_profile().await {
            warn!(error = %err, "profile refresh after evaluation failed");
        }

        let mut state = self.lock();
        if state.generation == generation {
            state.is_loading = false;
        }
        Ok(result)
    }

    fn fail_evaluation(&self, generation: u64) {
        let mut state = self.lock();
        if state.generation == generation {
            state.session.record_error(EVALUATION_FAILED_MESSAGE);
            state.is_loading = false;
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("SessionController")
            .field("questions_len", &state.session.questions().len())
            .field("current", &state.session.current_index())
            .field("active", &state.session.is_active())
            .field("is_loading", &state.is_loading)
            .field("generation", &state.generation)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InMemoryExerciseApi;
    use exercise_core::ScoringError;
    use exercise_core::model::{EvaluationPayload, GrammarQuestion};

    fn grammar(correct: &str) -> Question {
        Question::Grammar(GrammarQuestion {
            sentence_template: "It ___ raining.".into(),
            word_bank: vec!["is".into(), "are".into()],
            correct_word: correct.into(),
        })
    }

    fn controller(api: &InMemoryExerciseApi) -> SessionController {
        SessionController::new(ExerciseApi::in_memory(api.clone()))
    }

    struct HalfCredit;

    impl ScoringPolicy for HalfCredit {
        fn evaluate(
            &self,
            _questions: &[Question],
            answers: &[RawAnswer],
        ) -> Result<EvaluationPayload, ScoringError> {
            let total = u32::try_from(answers.len()).unwrap_or(u32::MAX);
            Ok(EvaluationPayload {
                total_questions: total,
                correct_answers: total / 2,
                final_score: 50,
                wrong_answers: Vec::new(),
            })
        }
    }

    #[tokio::test]
    async fn submit_without_session_is_a_no_op() {
        let api = InMemoryExerciseApi::new();
        let controller = controller(&api);

        let outcome = controller.submit_answer(RawAnswer::grammar("is")).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert_eq!(controller.snapshot().session, Session::new());
        assert!(api.submitted_payloads().is_empty());
    }

    #[tokio::test]
    async fn advances_then_evaluates_on_last_answer() {
        let api = InMemoryExerciseApi::new()
            .with_exercise(ExerciseType::Grammar, vec![grammar("is"), grammar("is")]);
        let controller = controller(&api);
        controller.start_session(ExerciseType::Grammar).await.unwrap();

        let first = controller.submit_answer(RawAnswer::grammar("is")).await.unwrap();
        assert!(matches!(first, SubmitOutcome::Advanced(ref p) if p.answered == 1));
        assert!(api.submitted_payloads().is_empty());

        let second = controller.submit_answer(RawAnswer::grammar("are")).await.unwrap();
        assert_eq!(
            second,
            SubmitOutcome::Evaluated(EvaluationResult {
                score: 50,
                feedback: String::new(),
            })
        );
        assert_eq!(api.refresh_count(), 1);

        let snapshot = controller.snapshot();
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.session.final_score(), Some(50));
    }

    #[tokio::test]
    async fn custom_policy_replaces_scoring() {
        let api = InMemoryExerciseApi::new()
            .with_exercise(ExerciseType::Grammar, vec![grammar("is"), grammar("is")]);
        let controller = controller(&api).with_scoring(Arc::new(HalfCredit));
        controller.start_session(ExerciseType::Grammar).await.unwrap();

        controller.submit_answer(RawAnswer::grammar("is")).await.unwrap();
        controller.submit_answer(RawAnswer::grammar("is")).await.unwrap();

        let payloads = api.submitted_payloads();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].correct_answers, 1);
        assert_eq!(payloads[0].final_score, 50);
    }

    #[tokio::test]
    async fn reset_invalidates_loading_flag_and_state() {
        let api = InMemoryExerciseApi::new()
            .with_exercise(ExerciseType::Grammar, vec![grammar("is"), grammar("is")]);
        let controller = controller(&api);
        controller.start_session(ExerciseType::Grammar).await.unwrap();
        controller.submit_answer(RawAnswer::grammar("is")).await.unwrap();

        controller.reset_session();
        controller.reset_session();

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.session, Session::new());
        assert!(!snapshot.is_loading);
        assert!(controller.current_question().is_none());
    }

    #[test]
    fn debug_output_is_compact() {
        let controller = controller(&InMemoryExerciseApi::new());
        let rendered = format!("{controller:?}");
        assert!(rendered.starts_with("SessionController"));
        assert!(rendered.contains("is_loading: false"));
    }
}
