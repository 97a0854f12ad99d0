//! Collaborator contracts the session controller talks to, plus adapters.

mod http;
mod in_memory;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use exercise_core::model::{EvaluationPayload, EvaluationResult, ExerciseType, Question};

use crate::error::ApiError;

pub use http::{ApiConfig, HttpExerciseApi};
pub use in_memory::InMemoryExerciseApi;

/// A batch of questions for one session, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseBatch {
    #[serde(default)]
    pub exercise_type: Option<ExerciseType>,
    pub questions: Vec<Question>,
}

/// Source of new exercise batches.
#[async_trait]
pub trait ExerciseSource: Send + Sync {
    /// Fetch a fresh question batch for `exercise_type`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any transport or server failure.
    async fn fetch_exercise(&self, exercise_type: ExerciseType) -> Result<ExerciseBatch, ApiError>;
}

/// Turns a scored payload into a final score and feedback text.
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Submit the evaluation payload of a finished session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any transport or server failure.
    async fn submit_evaluation(
        &self,
        payload: &EvaluationPayload,
    ) -> Result<EvaluationResult, ApiError>;
}

/// Refreshes cached profile data after an evaluation changed it server-side.
#[async_trait]
pub trait ProfileRefresher: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` if the profile could not be fetched.
    async fn refresh_user_profile(&self) -> Result<(), ApiError>;
}

/// Aggregates the collaborators behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct ExerciseApi {
    pub exercises: Arc<dyn ExerciseSource>,
    pub evaluator: Arc<dyn Evaluator>,
    pub profile: Arc<dyn ProfileRefresher>,
}

impl ExerciseApi {
    #[must_use]
    pub fn http(api: HttpExerciseApi) -> Self {
        Self::from_shared(Arc::new(api))
    }

    #[must_use]
    pub fn in_memory(api: InMemoryExerciseApi) -> Self {
        Self::from_shared(Arc::new(api))
    }

    fn from_shared<T>(api: Arc<T>) -> Self
    where
        T: ExerciseSource + Evaluator + ProfileRefresher + 'static,
    {
        let exercises: Arc<dyn ExerciseSource> = api.clone();
        let evaluator: Arc<dyn Evaluator> = api.clone();
        let profile: Arc<dyn ProfileRefresher> = api;
        Self {
            exercises,
            evaluator,
            profile,
        }
    }
}
