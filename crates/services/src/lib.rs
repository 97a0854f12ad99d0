#![forbid(unsafe_code)]

pub mod api;
pub mod error;
pub mod sessions;

pub use api::{
    ApiConfig, Evaluator, ExerciseApi, ExerciseBatch, ExerciseSource, HttpExerciseApi,
    InMemoryExerciseApi, ProfileRefresher,
};
pub use error::{ApiConfigError, ApiError, SessionError};
pub use sessions::{SessionController, SessionSnapshot, SubmitOutcome};
