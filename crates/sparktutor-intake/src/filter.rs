// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword screen for educational questions.
//!
//! Non-educational patterns are checked first and win outright. Patterns
//! match anywhere in the lowercased text, so `"how"` also hits `"show"`.

use std::sync::LazyLock;

use regex::RegexSet;

/// Patterns marking a question as off-topic (shopping, repairs, entertainment).
pub const NON_EDUCATIONAL_PATTERNS: &[&str] = &[
    "movie",
    "theft",
    "robbery",
    "netflix",
    "watch",
    "download",
    "shopping",
    "travel",
    "celebrity",
    "repair my",
    "fix my",
    "broken",
    "not working",
    "how much to repair",
    "where to fix",
    "price of",
    "how much does",
    "cost of",
    "which phone",
    "which mobile",
    "which game",
    "best ice cream",
    "talkingtoplants",
    "recommend a",
    "which brand",
    "better option",
    "should i buy",
    "top rated",
    "which.*best",
];

/// Patterns marking a question as educational.
pub const EDUCATIONAL_PATTERNS: &[&str] = &[
    "explain",
    "how",
    "science",
    "language",
    "history",
    "scientific",
    "logic",
    "architecture",
    "design principles",
    "engineering",
    "teach me",
    "learning",
    "pedagogy",
    "types of",
    "list of",
    "classification of",
    "define",
    "difference between",
];

static DEFAULT_SCREEN: LazyLock<KeywordScreen> = LazyLock::new(|| {
    KeywordScreen::new(NON_EDUCATIONAL_PATTERNS, EDUCATIONAL_PATTERNS)
        .unwrap_or_else(|_| KeywordScreen::empty())
});

/// Verdict of the keyword screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screening {
    Educational,
    NonEducational,
    /// No pattern matched either way.
    Undecided,
}

#[derive(Debug, Clone)]
pub struct KeywordScreen {
    non_educational: RegexSet,
    educational: RegexSet,
}

impl KeywordScreen {
    /// Compiles both pattern sets. Patterns are regexes matched against
    /// lowercased input, so they should be written in lowercase.
    pub fn new(non_educational: &[&str], educational: &[&str]) -> Result<Self, regex::Error> {
        Ok(Self {
            non_educational: RegexSet::new(non_educational)?,
            educational: RegexSet::new(educational)?,
        })
    }

    /// Screen with no patterns; everything is undecided.
    pub fn empty() -> Self {
        Self {
            non_educational: RegexSet::empty(),
            educational: RegexSet::empty(),
        }
    }

    pub fn screen(&self, text: &str) -> Screening {
        let lower = text.to_lowercase();
        if self.non_educational.is_match(&lower) {
            Screening::NonEducational
        } else if self.educational.is_match(&lower) {
            Screening::Educational
        } else {
            Screening::Undecided
        }
    }
}

impl Default for KeywordScreen {
    fn default() -> Self {
        DEFAULT_SCREEN.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_patterns_compile() {
        assert!(KeywordScreen::new(NON_EDUCATIONAL_PATTERNS, EDUCATIONAL_PATTERNS).is_ok());
    }

    #[test]
    fn educational_questions() {
        let screen = KeywordScreen::default();
        assert_eq!(screen.screen("Explain photosynthesis"), Screening::Educational);
        assert_eq!(screen.screen("Define entropy"), Screening::Educational);
        assert_eq!(
            screen.screen("What is the DIFFERENCE BETWEEN mitosis and meiosis?"),
            Screening::Educational
        );
    }

    #[test]
    fn non_educational_questions() {
        let screen = KeywordScreen::default();
        assert_eq!(screen.screen("Should I buy a new laptop?"), Screening::NonEducational);
        assert_eq!(screen.screen("Price of an iPhone"), Screening::NonEducational);
        assert_eq!(screen.screen("My screen is broken"), Screening::NonEducational);
    }

    #[test]
    fn non_educational_wins_over_educational() {
        let screen = KeywordScreen::default();
        assert_eq!(
            screen.screen("Explain which movie I should watch"),
            Screening::NonEducational
        );
    }

    #[test]
    fn which_best_is_a_regex() {
        let screen = KeywordScreen::default();
        assert_eq!(
            screen.screen("Which laptop is the best for gaming"),
            Screening::NonEducational
        );
    }

    #[test]
    fn unmatched_text_is_undecided() {
        let screen = KeywordScreen::default();
        assert_eq!(screen.screen("What is 2+2?"), Screening::Undecided);
        assert_eq!(screen.screen(""), Screening::Undecided);
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(KeywordScreen::new(&["(unclosed"], &[]).is_err());
    }

    #[test]
    fn empty_screen_is_always_undecided() {
        assert_eq!(KeywordScreen::empty().screen("explain movies"), Screening::Undecided);
    }
}
