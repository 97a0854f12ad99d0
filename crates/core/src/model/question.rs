use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::ExerciseType;

//
// ─── VARIANTS ──────────────────────────────────────────────────────────────────
//

/// Fill-in-the-blank sentence with a small word bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarQuestion {
    /// Sentence containing a `___` gap.
    pub sentence_template: String,
    #[serde(default)]
    pub word_bank: Vec<String>,
    pub correct_word: String,
}

/// One line of a short scripted dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub speaker: String,
    pub line: String,
}

/// Multiple-choice continuation of a dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueQuestion {
    #[serde(default)]
    pub dialogue: Vec<DialogueLine>,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// A themed round of word → meaning pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordMatchingQuestion {
    pub topic: String,
    pub words: Vec<String>,
    /// Meanings in display order, shuffled relative to `words`.
    #[serde(default)]
    pub meanings: Vec<String>,
    pub correct_pairs: BTreeMap<String, String>,
}

impl WordMatchingQuestion {
    /// Returns true if `meaning` is the expected meaning for `word`.
    #[must_use]
    pub fn is_correct_pair(&self, word: &str, meaning: &str) -> bool {
        self.correct_pairs
            .get(word)
            .is_some_and(|expected| expected == meaning)
    }

    /// Number of matchable pairs in the round.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.words.len()
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single exercise round as delivered by the exercise source.
///
/// The `type` tag selects which fields are meaningful; consumers match exhaustively
/// so a new exercise flavour has to be handled everywhere before it compiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Question {
    Grammar(GrammarQuestion),
    Dialogue(DialogueQuestion),
    WordMatching(WordMatchingQuestion),
}

impl Question {
    #[must_use]
    pub fn exercise_type(&self) -> ExerciseType {
        match self {
            Question::Grammar(_) => ExerciseType::Grammar,
            Question::Dialogue(_) => ExerciseType::Dialogue,
            Question::WordMatching(_) => ExerciseType::WordMatching,
        }
    }

    /// Human-readable text identifying the question in feedback.
    #[must_use]
    pub fn prompt_text(&self) -> &str {
        match self {
            Question::Grammar(q) => &q.sentence_template,
            Question::Dialogue(q) => &q.question,
            Question::WordMatching(q) => &q.topic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_tagged_batch() {
        let raw = json!([
            {
                "type": "grammar",
                "sentence_template": "She ___ an apple.",
                "word_bank": ["eat", "eats", "ate", "eating"],
                "correct_word": "eats"
            },
            {
                "type": "dialogue",
                "dialogue": [
                    {"speaker": "Shopkeeper", "line": "Hello, can I help you?"},
                    {"speaker": "Customer", "line": "Yes, please. I'd like an apple."}
                ],
                "question": "What should the shopkeeper say next?",
                "options": ["Here you are.", "I am a doctor."],
                "correct_answer": "Here you are."
            },
            {
                "type": "word_matching",
                "topic": "Fruits",
                "words": ["Apple", "Banana"],
                "meanings": ["Muz", "Elma"],
                "correct_pairs": {"Apple": "Elma", "Banana": "Muz"}
            }
        ]);

        let questions: Vec<Question> = serde_json::from_value(raw).unwrap();
        let kinds: Vec<_> = questions.iter().map(Question::exercise_type).collect();
        assert_eq!(
            kinds,
            vec![
                ExerciseType::Grammar,
                ExerciseType::Dialogue,
                ExerciseType::WordMatching
            ]
        );
        assert_eq!(questions[0].prompt_text(), "She ___ an apple.");
        assert_eq!(questions[1].prompt_text(), "What should the shopkeeper say next?");
        assert_eq!(questions[2].prompt_text(), "Fruits");
    }

    #[test]
    fn optional_lists_default_to_empty() {
        let raw = json!({
            "type": "dialogue",
            "question": "Reply?",
            "correct_answer": "Hi"
        });
        let Question::Dialogue(q) = serde_json::from_value::<Question>(raw).unwrap() else {
            panic!("expected dialogue");
        };
        assert!(q.dialogue.is_empty());
        assert!(q.options.is_empty());
    }

    #[test]
    fn missing_type_tag_is_rejected() {
        let raw = json!({"sentence_template": "There ___ two cats.", "correct_word": "are"});
        assert!(serde_json::from_value::<Question>(raw).is_err());
    }

    #[test]
    fn checks_matching_pairs() {
        let q = WordMatchingQuestion {
            topic: "Animals".into(),
            words: vec!["Cat".into(), "Dog".into()],
            meanings: vec!["Köpek".into(), "Kedi".into()],
            correct_pairs: BTreeMap::from([
                ("Cat".into(), "Kedi".into()),
                ("Dog".into(), "Köpek".into()),
            ]),
        };
        assert!(q.is_correct_pair("Cat", "Kedi"));
        assert!(!q.is_correct_pair("Cat", "Köpek"));
        assert!(!q.is_correct_pair("Bird", "Kuş"));
        assert_eq!(q.pair_count(), 2);
    }
}
