use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use exercise_core::model::{EvaluationPayload, EvaluationResult, ExerciseType, Question};

use super::{Evaluator, ExerciseBatch, ExerciseSource, ProfileRefresher};
use crate::error::ApiError;

#[derive(Default)]
struct Script {
    batches: HashMap<ExerciseType, Vec<Question>>,
    evaluation: Option<EvaluationResult>,
    fail_fetch: bool,
    fail_evaluation: bool,
    fail_refresh: bool,
    submitted: Vec<EvaluationPayload>,
    fetch_count: usize,
    refresh_count: usize,
}

/// Scripted in-memory collaborator for testing and prototyping.
///
/// Without a scripted evaluation, the evaluator echoes the payload's score with empty
/// feedback.
#[derive(Clone, Default)]
pub struct InMemoryExerciseApi {
    script: Arc<Mutex<Script>>,
}

impl InMemoryExerciseApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_exercise(self, exercise_type: ExerciseType, questions: Vec<Question>) -> Self {
        self.script().batches.insert(exercise_type, questions);
        self
    }

    #[must_use]
    pub fn with_evaluation(self, result: EvaluationResult) -> Self {
        self.script().evaluation = Some(result);
        self
    }

    pub fn fail_fetches(&self, fail: bool) {
        self.script().fail_fetch = fail;
    }

    pub fn fail_evaluations(&self, fail: bool) {
        self.script().fail_evaluation = fail;
    }

    pub fn fail_refreshes(&self, fail: bool) {
        self.script().fail_refresh = fail;
    }

    /// Payloads received by the evaluator, oldest first.
    #[must_use]
    pub fn submitted_payloads(&self) -> Vec<EvaluationPayload> {
        self.script().submitted.clone()
    }

    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.script().fetch_count
    }

    #[must_use]
    pub fn refresh_count(&self) -> usize {
        self.script().refresh_count
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ExerciseSource for InMemoryExerciseApi {
    async fn fetch_exercise(&self, exercise_type: ExerciseType) -> Result<ExerciseBatch, ApiError> {
        let mut script = self.script();
        script.fetch_count += 1;
        if script.fail_fetch {
            return Err(ApiError::Unavailable("fetch failure scripted".into()));
        }
        let questions = script
            .batches
            .get(&exercise_type)
            .cloned()
            .ok_or_else(|| ApiError::Unavailable(format!("no {exercise_type} exercise scripted")))?;
        Ok(ExerciseBatch {
            exercise_type: Some(exercise_type),
            questions,
        })
    }
}

#[async_trait]
impl Evaluator for InMemoryExerciseApi {
    async fn submit_evaluation(
        &self,
        payload: &EvaluationPayload,
    ) -> Result<EvaluationResult, ApiError> {
        let mut script = self.script();
        if script.fail_evaluation {
            return Err(ApiError::Unavailable("evaluation failure scripted".into()));
        }
        script.submitted.push(payload.clone());
        Ok(script.evaluation.clone().unwrap_or_else(|| EvaluationResult {
            score: payload.final_score,
            feedback: String::new(),
        }))
    }
}

#[async_trait]
impl ProfileRefresher for InMemoryExerciseApi {
    async fn refresh_user_profile(&self) -> Result<(), ApiError> {
        let mut script = self.script();
        script.refresh_count += 1;
        if script.fail_refresh {
            return Err(ApiError::Unavailable("refresh failure scripted".into()));
        }
        Ok(())
    }
}
