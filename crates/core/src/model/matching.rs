use std::collections::BTreeSet;

use crate::model::{MatchingStats, RawAnswer, WordMatchingQuestion};

/// Outcome of a single pairing attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchAttempt {
    Correct,
    Wrong,
    /// The word was already matched; nothing is counted.
    AlreadyMatched,
    /// The word is not part of this round; nothing is counted.
    UnknownWord,
}

/// Tracks a word-matching round while the user pairs words with meanings.
///
/// Produces the statistics form of the answer once the round is done.
#[derive(Debug, Clone)]
pub struct MatchingRound {
    question: WordMatchingQuestion,
    matched: BTreeSet<String>,
    wrong_attempts: u32,
}

impl MatchingRound {
    #[must_use]
    pub fn new(question: &WordMatchingQuestion) -> Self {
        Self {
            question: question.clone(),
            matched: BTreeSet::new(),
            wrong_attempts: 0,
        }
    }

    pub fn attempt(&mut self, word: &str, meaning: &str) -> MatchAttempt {
        if !self.question.words.iter().any(|w| w == word) {
            return MatchAttempt::UnknownWord;
        }
        if self.matched.contains(word) {
            return MatchAttempt::AlreadyMatched;
        }

        if self.question.is_correct_pair(word, meaning) {
            self.matched.insert(word.to_owned());
            MatchAttempt::Correct
        } else {
            self.wrong_attempts = self.wrong_attempts.saturating_add(1);
            MatchAttempt::Wrong
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.matched.len() >= self.question.pair_count()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.question.pair_count().saturating_sub(self.matched.len())
    }

    #[must_use]
    pub fn wrong_attempts(&self) -> u32 {
        self.wrong_attempts
    }

    #[must_use]
    pub fn stats(&self) -> MatchingStats {
        let total_pairs = u32::try_from(self.question.pair_count()).unwrap_or(u32::MAX);
        MatchingStats::new(total_pairs, self.wrong_attempts)
    }

    #[must_use]
    pub fn into_answer(self) -> RawAnswer {
        RawAnswer::WordMatching(self.stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn animals() -> WordMatchingQuestion {
        WordMatchingQuestion {
            topic: "Animals".into(),
            words: vec!["Cat".into(), "Dog".into(), "Bird".into()],
            meanings: vec!["Kuş".into(), "Kedi".into(), "Köpek".into()],
            correct_pairs: BTreeMap::from([
                ("Cat".into(), "Kedi".into()),
                ("Dog".into(), "Köpek".into()),
                ("Bird".into(), "Kuş".into()),
            ]),
        }
    }

    #[test]
    fn counts_wrong_attempts_until_complete() {
        let mut round = MatchingRound::new(&animals());

        assert_eq!(round.attempt("Cat", "Köpek"), MatchAttempt::Wrong);
        assert_eq!(round.attempt("Cat", "Kedi"), MatchAttempt::Correct);
        assert_eq!(round.attempt("Dog", "Kuş"), MatchAttempt::Wrong);
        assert_eq!(round.attempt("Dog", "Köpek"), MatchAttempt::Correct);
        assert!(!round.is_complete());
        assert_eq!(round.remaining(), 1);
        assert_eq!(round.attempt("Bird", "Kuş"), MatchAttempt::Correct);
        assert!(round.is_complete());

        assert_eq!(round.into_answer(), RawAnswer::word_matching(3, 2));
    }

    #[test]
    fn repeated_and_unknown_words_are_not_counted() {
        let mut round = MatchingRound::new(&animals());
        round.attempt("Cat", "Kedi");

        assert_eq!(round.attempt("Cat", "Köpek"), MatchAttempt::AlreadyMatched);
        assert_eq!(round.attempt("Fish", "Balık"), MatchAttempt::UnknownWord);
        assert_eq!(round.wrong_attempts(), 0);
    }
}
