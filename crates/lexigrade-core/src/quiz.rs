//! A quiz session over one week's words.
//!
//! The session only tracks questions and answers; rendering and input
//! handling belong to the caller. Grading happens once, in [`Quiz::finish`].

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::grading::{classify, AnswerPair, GradeResult};
use crate::model::{Direction, PageInfo, Selection, WordList};
use crate::report::{build_report, AttemptRecord, TestReport};

/// One question of a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizItem {
    pub word_id: String,
    /// Text shown to the user.
    pub prompt: String,
    /// Answer the user should type.
    pub expected: String,
}

/// Minimum score needed to pass a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassPolicy {
    pub min_score: u8,
    /// Whether a score equal to `min_score` passes.
    #[serde(default)]
    pub inclusive: bool,
}

impl Default for PassPolicy {
    fn default() -> Self {
        Self {
            min_score: 50,
            inclusive: false,
        }
    }
}

impl PassPolicy {
    pub fn passes_score(&self, score: Option<u8>) -> bool {
        match score {
            Some(s) if self.inclusive => s >= self.min_score,
            Some(s) => s > self.min_score,
            None => false,
        }
    }

    pub fn passes(&self, report: &TestReport) -> bool {
        self.passes_score(report.score_percent)
    }
}

/// An in-progress quiz.
#[derive(Debug, Clone)]
pub struct Quiz {
    week: u32,
    selection: Selection,
    direction: Direction,
    items: Vec<QuizItem>,
    answers: Vec<String>,
    index: usize,
}

impl Quiz {
    /// Start a quiz over a page of the list, or all of it.
    pub fn new(
        list: &WordList,
        selection: Selection,
        direction: Direction,
        page_size: usize,
    ) -> Result<Self, QuizError> {
        if page_size == 0 {
            return Err(QuizError::ZeroPageSize);
        }
        if list.words.is_empty() {
            return Err(QuizError::EmptyList { week: list.week });
        }

        let words = match selection {
            Selection::All => &list.words[..],
            Selection::Page(page) => {
                let pages = list.page_count(page_size);
                if page == 0 || page > pages {
                    return Err(QuizError::PageOutOfRange {
                        week: list.week,
                        page,
                        pages,
                    });
                }
                list.page(page, page_size)
            }
        };

        let items: Vec<QuizItem> = words
            .iter()
            .map(|w| {
                let (prompt, expected) = direction.question(w);
                QuizItem {
                    word_id: w.id.clone(),
                    prompt: prompt.to_string(),
                    expected: expected.to_string(),
                }
            })
            .collect();

        tracing::debug!(
            week = list.week,
            questions = items.len(),
            %direction,
            "quiz started"
        );

        Ok(Self {
            week: list.week,
            selection,
            direction,
            answers: vec![String::new(); items.len()],
            items,
            index: 0,
        })
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Zero-based index of the current question.
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&QuizItem> {
        self.items.get(self.index)
    }

    pub fn items(&self) -> &[QuizItem] {
        &self.items
    }

    /// Record the answer to the current question, replacing any earlier one.
    pub fn answer(&mut self, text: impl Into<String>) {
        if let Some(slot) = self.answers.get_mut(self.index) {
            *slot = text.into();
        }
    }

    /// The answer recorded for the current question.
    pub fn current_answer(&self) -> &str {
        self.answers
            .get(self.index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Move to the next question; returns `false` on the last one.
    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.items.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Move back one question, stopping at the first.
    pub fn previous(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Grade live input against the current question without recording it.
    pub fn preview(&self, input: &str) -> Option<GradeResult> {
        self.current().map(|item| {
            let mut result = classify(&item.expected, input);
            result.prompt = Some(item.prompt.clone());
            result
        })
    }

    /// The answer pairs as they stand, unanswered questions included.
    pub fn pairs(&self) -> Vec<AnswerPair> {
        self.items
            .iter()
            .zip(&self.answers)
            .map(|(item, answer)| {
                AnswerPair::new(item.expected.clone(), answer.clone())
                    .with_prompt(item.prompt.clone())
            })
            .collect()
    }

    /// Grade every question and produce the attempt record.
    pub fn finish(self) -> AttemptRecord {
        let report = build_report(&self.pairs());
        AttemptRecord::new(
            self.week,
            PageInfo::from(self.selection),
            self.direction,
            report,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::Classification;
    use crate::model::Word;

    fn list(words: &[(&str, &str)]) -> WordList {
        WordList {
            week: 4,
            name: "test".into(),
            words: words
                .iter()
                .enumerate()
                .map(|(i, (w, t))| Word {
                    id: format!("id-{i}"),
                    word: w.to_string(),
                    translation: t.to_string(),
                    week: 4,
                })
                .collect(),
        }
    }

    #[test]
    fn walks_questions_and_grades() {
        let l = list(&[("cat", "кот"), ("elephant", "слон"), ("fish", "рыба")]);
        let mut quiz = Quiz::new(&l, Selection::All, Direction::ToWord, 10).unwrap();
        assert_eq!(quiz.len(), 3);
        assert_eq!(quiz.current().unwrap().prompt, "кот");

        quiz.answer("Cat");
        assert!(quiz.next());
        quiz.answer("elefant");
        assert!(quiz.next());
        assert!(!quiz.next());
        assert_eq!(quiz.position(), 2);

        let record = quiz.finish();
        assert_eq!(record.week, 4);
        assert_eq!(record.page, PageInfo::from(Selection::All));
        assert_eq!(record.report.exact_count, 1);
        assert_eq!(record.report.tolerant_count, 1);
        assert_eq!(record.report.incorrect_count, 1);
        assert_eq!(record.report.details[2].actual, "");
        assert_eq!(record.report.details[0].prompt.as_deref(), Some("кот"));
    }

    #[test]
    fn previous_and_overwrite() {
        let l = list(&[("cat", "кот"), ("dog", "собака")]);
        let mut quiz = Quiz::new(&l, Selection::All, Direction::ToWord, 10).unwrap();
        quiz.answer("wrong");
        quiz.next();
        quiz.previous();
        quiz.previous();
        assert_eq!(quiz.position(), 0);
        assert_eq!(quiz.current_answer(), "wrong");
        quiz.answer("cat");
        assert_eq!(quiz.pairs()[0].actual, "cat");
    }

    #[test]
    fn preview_does_not_record() {
        let l = list(&[("elephant", "слон")]);
        let quiz = Quiz::new(&l, Selection::All, Direction::ToWord, 10).unwrap();
        let live = quiz.preview("elefant").unwrap();
        assert_eq!(live.classification, Classification::Tolerant);
        assert_eq!(quiz.current_answer(), "");
    }

    #[test]
    fn page_selection() {
        let words: Vec<(String, String)> =
            (0..12).map(|i| (format!("w{i}"), format!("t{i}"))).collect();
        let refs: Vec<(&str, &str)> = words.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        let l = list(&refs);

        let quiz = Quiz::new(&l, Selection::Page(2), Direction::ToTranslation, 10).unwrap();
        assert_eq!(quiz.len(), 2);
        assert_eq!(quiz.items()[0].prompt, "w10");
        assert_eq!(quiz.items()[0].expected, "t10");

        assert_eq!(
            Quiz::new(&l, Selection::Page(3), Direction::ToWord, 10).unwrap_err(),
            QuizError::PageOutOfRange {
                week: 4,
                page: 3,
                pages: 2
            }
        );
        assert_eq!(
            Quiz::new(&l, Selection::All, Direction::ToWord, 0).unwrap_err(),
            QuizError::ZeroPageSize
        );
    }

    #[test]
    fn empty_list_is_rejected() {
        let l = list(&[]);
        assert_eq!(
            Quiz::new(&l, Selection::All, Direction::ToWord, 10).unwrap_err(),
            QuizError::EmptyList { week: 4 }
        );
    }

    #[test]
    fn pass_policy() {
        let strict = PassPolicy::default();
        assert!(!strict.passes_score(Some(50)));
        assert!(strict.passes_score(Some(51)));
        assert!(!strict.passes_score(None));

        let inclusive = PassPolicy {
            min_score: 50,
            inclusive: true,
        };
        assert!(inclusive.passes_score(Some(50)));
        assert!(!inclusive.passes_score(Some(49)));
    }
}
