mod answer;
mod evaluation;
mod exercise_type;
mod matching;
mod question;
mod session;
mod user;

pub use answer::{MatchingStats, RawAnswer};
pub use evaluation::{EvaluationPayload, EvaluationResult, WrongAnswer};
pub use exercise_type::{ExerciseType, ParseExerciseTypeError};
pub use matching::{MatchAttempt, MatchingRound};
pub use question::{
    DialogueLine, DialogueQuestion, GrammarQuestion, Question, WordMatchingQuestion,
};
pub use session::{AnswerOutcome, Session, SessionProgress, SessionStateError};
pub use user::UserProfile;
