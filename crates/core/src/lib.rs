#![forbid(unsafe_code)]

pub mod model;
pub mod scoring;

pub use model::{ExerciseType, Question, RawAnswer, Session};
pub use scoring::{GranularScoring, ScoringError, ScoringPolicy, build_evaluation_payload};
