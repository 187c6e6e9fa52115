//! Answer classification policy.
//!
//! An answer is `Exact` when it matches after normalization, `Tolerant`
//! when it is within [`tolerance_threshold`] edits of the expected answer,
//! and `Incorrect` otherwise. An empty answer is never credited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::distance::levenshtein;
use crate::normalize::normalize;

/// Edits forgiven per this many characters of the expected answer.
const CHARS_PER_FORGIVEN_EDIT: usize = 5;

/// One graded unit: what the answer should be and what the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerPair {
    /// Question shown to the user, kept for display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Canonical correct answer.
    pub expected: String,
    /// Raw user input; may be empty.
    pub actual: String,
}

impl AnswerPair {
    pub fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            prompt: None,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Attach the question text shown to the user.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }
}

/// How an answer was judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Exact,
    Tolerant,
    Incorrect,
}

impl Classification {
    /// Whether the answer counts toward the score.
    pub fn is_credited(self) -> bool {
        matches!(self, Classification::Exact | Classification::Tolerant)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Exact => write!(f, "exact"),
            Classification::Tolerant => write!(f, "tolerant"),
            Classification::Incorrect => write!(f, "incorrect"),
        }
    }
}

impl FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(Classification::Exact),
            "tolerant" => Ok(Classification::Tolerant),
            "incorrect" => Ok(Classification::Incorrect),
            other => Err(format!("unknown classification: {other}")),
        }
    }
}

/// Outcome of grading one [`AnswerPair`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    pub expected: String,
    pub actual: String,
    pub classification: Classification,
    pub normalized_expected: String,
    pub normalized_actual: String,
    /// Edit distance between the normalized strings; 0 for exact matches.
    pub distance: usize,
    /// Maximum distance that would still have been credited.
    pub threshold: usize,
}

impl GradeResult {
    pub fn is_credited(&self) -> bool {
        self.classification.is_credited()
    }
}

/// Maximum credited edit distance for a normalized expected answer.
///
/// One edit per five characters, but always at least one.
pub fn tolerance_threshold(normalized_expected: &str) -> usize {
    (normalized_expected.chars().count() / CHARS_PER_FORGIVEN_EDIT).max(1)
}

/// Grade a single answer against its expected value.
pub fn classify(expected: &str, actual: &str) -> GradeResult {
    let normalized_expected = normalize(expected);
    let normalized_actual = normalize(actual);
    let threshold = tolerance_threshold(&normalized_expected);

    let (classification, distance) = if normalized_actual.is_empty() {
        (
            Classification::Incorrect,
            normalized_expected.chars().count(),
        )
    } else if normalized_actual == normalized_expected {
        (Classification::Exact, 0)
    } else {
        let distance = levenshtein(&normalized_expected, &normalized_actual);
        if distance <= threshold {
            (Classification::Tolerant, distance)
        } else {
            (Classification::Incorrect, distance)
        }
    };

    GradeResult {
        prompt: None,
        expected: expected.to_string(),
        actual: actual.to_string(),
        classification,
        normalized_expected,
        normalized_actual,
        distance,
        threshold,
    }
}

/// Grade an [`AnswerPair`], carrying its prompt into the result.
pub fn classify_pair(pair: &AnswerPair) -> GradeResult {
    let mut result = classify(&pair.expected, &pair.actual);
    result.prompt = pair.prompt.clone();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match() {
        let r = classify("cat", "cat");
        assert_eq!(r.classification, Classification::Exact);
        assert_eq!(r.distance, 0);
    }

    #[test]
    fn one_typo_on_long_word_is_tolerated() {
        let r = classify("elephant", "elefant");
        assert_eq!(r.distance, 1);
        assert_eq!(r.threshold, 1);
        assert_eq!(r.classification, Classification::Tolerant);
    }

    #[test]
    fn unrelated_short_word_is_incorrect() {
        let r = classify("cat", "dog");
        assert_eq!(r.distance, 3);
        assert_eq!(r.threshold, 1);
        assert_eq!(r.classification, Classification::Incorrect);
    }

    #[test]
    fn case_and_spacing_are_ignored() {
        let r = classify("hello world", "Hello   World");
        assert_eq!(r.classification, Classification::Exact);
        assert_eq!(r.normalized_actual, "hello world");
        assert_eq!(r.actual, "Hello   World");
    }

    #[test]
    fn empty_answer_is_never_credited() {
        assert_eq!(
            classify("anything", "").classification,
            Classification::Incorrect
        );
        assert_eq!(
            classify("a", "   ").classification,
            Classification::Incorrect
        );
        assert_eq!(classify("", "").classification, Classification::Incorrect);
    }

    #[test]
    fn empty_expected_against_single_char() {
        // Degenerate: threshold is still 1, so one stray char is tolerated.
        let r = classify("", "x");
        assert_eq!(r.distance, 1);
        assert_eq!(r.classification, Classification::Tolerant);
        assert_eq!(
            classify("", "xyz").classification,
            Classification::Incorrect
        );
    }

    #[test]
    fn threshold_scales_with_length() {
        assert_eq!(tolerance_threshold(""), 1);
        assert_eq!(tolerance_threshold("cat"), 1);
        assert_eq!(tolerance_threshold("abcdefghij"), 2);
        assert_eq!(tolerance_threshold("abcdefghijklmno"), 3);

        // 10 chars allow two edits, 15 allow three.
        assert_eq!(
            classify("strawberry", "strawbery").classification,
            Classification::Tolerant
        );
        assert_eq!(
            classify("strawberry", "strwbery").classification,
            Classification::Tolerant
        );
        assert_eq!(
            classify("strawberry", "strwbry").classification,
            Classification::Incorrect
        );
    }

    #[test]
    fn threshold_counts_chars() {
        // 10 Cyrillic chars (20 bytes) still means two forgiven edits.
        assert_eq!(tolerance_threshold("достопримечательность"), 4);
        assert_eq!(tolerance_threshold("переводчик"), 2);
    }

    #[test]
    fn classify_pair_keeps_prompt() {
        let pair = AnswerPair::new("dog", "dig").with_prompt("собака");
        let r = classify_pair(&pair);
        assert_eq!(r.prompt.as_deref(), Some("собака"));
        assert_eq!(r.classification, Classification::Tolerant);
    }

    #[test]
    fn classification_display_and_parse() {
        assert_eq!(Classification::Tolerant.to_string(), "tolerant");
        assert_eq!(
            "EXACT".parse::<Classification>().unwrap(),
            Classification::Exact
        );
        assert!("close".parse::<Classification>().is_err());
        assert!(Classification::Exact.is_credited());
        assert!(!Classification::Incorrect.is_credited());
    }
}
