use serde::{Deserialize, Serialize};

/// The signed-in learner as reported by the profile endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub username: String,
    /// Accumulated evaluation scores for the current week.
    pub weekly_score: i64,
    pub current_level: String,
}
