//! Shared error types for the services crate.

use thiserror::Error;

use exercise_core::ScoringError;
use exercise_core::model::SessionStateError;

/// Errors surfaced by the exercise API collaborators.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("exercise api returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("exercise api unavailable: {0}")]
    Unavailable(String),
}

/// Errors emitted while building an `ApiConfig`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiConfigError {
    #[error("invalid base URL")]
    InvalidBaseUrl,
}

/// Errors emitted by the session controller.
///
/// Load and evaluation failures are also recorded on the session itself, so a UI can
/// ignore the returned error and render from the snapshot instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("failed to load exercise")]
    LoadFailed(#[source] ApiError),
    #[error("exercise contains no questions")]
    EmptyExercise,
    #[error("failed to evaluate session")]
    EvaluationFailed(#[source] ApiError),
    #[error("a newer session replaced this one before the response arrived")]
    Superseded,
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    State(#[from] SessionStateError),
}
