use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown exercise type: {0}")]
pub struct ParseExerciseTypeError(pub String);

/// The three exercise flavours a session can be started for.
///
/// Also used as the discriminant of `Question` and `RawAnswer`, so the wire names
/// must stay in sync with the `type` tags of those enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    Grammar,
    Dialogue,
    WordMatching,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 3] = [Self::Grammar, Self::Dialogue, Self::WordMatching];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExerciseType::Grammar => "grammar",
            ExerciseType::Dialogue => "dialogue",
            ExerciseType::WordMatching => "word_matching",
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseType {
    type Err = ParseExerciseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| ParseExerciseTypeError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names() {
        assert_eq!("grammar".parse(), Ok(ExerciseType::Grammar));
        assert_eq!("dialogue".parse(), Ok(ExerciseType::Dialogue));
        assert_eq!(" word_matching ".parse(), Ok(ExerciseType::WordMatching));
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "listening".parse::<ExerciseType>().unwrap_err();
        assert_eq!(err, ParseExerciseTypeError("listening".into()));
    }

    #[test]
    fn display_matches_serde_name() {
        for kind in ExerciseType::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }
}
