//! Vocabulary data model.
//!
//! Words are grouped into weekly lists. A quiz asks either for the word
//! given its translation or the other way round, over one page of a list
//! or the whole list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Words per quiz page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A single vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Identifier assigned by the word service; empty for local lists.
    #[serde(default, alias = "_id")]
    pub id: String,
    /// The word being learned.
    pub word: String,
    /// Its translation.
    pub translation: String,
    /// Week the word belongs to.
    #[serde(default)]
    pub week: u32,
}

/// All words of one week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordList {
    pub week: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub words: Vec<Word>,
}

impl WordList {
    /// Number of pages of `page_size` words.
    pub fn page_count(&self, page_size: usize) -> usize {
        page_count(self.words.len(), page_size)
    }

    /// Words of a 1-based page; empty when out of range.
    pub fn page(&self, page: usize, page_size: usize) -> &[Word] {
        if page == 0 || page_size == 0 {
            return &[];
        }
        let start = (page - 1).saturating_mul(page_size);
        if start >= self.words.len() {
            return &[];
        }
        let end = (start + page_size).min(self.words.len());
        &self.words[start..end]
    }
}

/// Number of pages needed for `len` items.
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Which side of a word the user has to type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Shown the translation, type the word.
    #[default]
    ToWord,
    /// Shown the word, type the translation.
    ToTranslation,
}

impl Direction {
    /// Split a word into `(prompt, expected answer)`.
    pub fn question<'a>(&self, word: &'a Word) -> (&'a str, &'a str) {
        match self {
            Direction::ToWord => (&word.translation, &word.word),
            Direction::ToTranslation => (&word.word, &word.translation),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ToWord => write!(f, "to-word"),
            Direction::ToTranslation => write!(f, "to-translation"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "to-word" | "word" => Ok(Direction::ToWord),
            "to-translation" | "translation" => Ok(Direction::ToTranslation),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

/// Which words of a list a quiz covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    All,
    /// 1-based page number.
    Page(usize),
}

/// Page information stored with a result: `"all"` or a page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageInfo {
    Page(usize),
    All(AllPages),
}

/// Serializes as the string `"all"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllPages {
    All,
}

impl From<Selection> for PageInfo {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::All => PageInfo::All(AllPages::All),
            Selection::Page(n) => PageInfo::Page(n),
        }
    }
}

impl fmt::Display for PageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageInfo::All(_) => write!(f, "all"),
            PageInfo::Page(n) => write!(f, "page {n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(n: usize) -> WordList {
        WordList {
            week: 1,
            name: String::new(),
            words: (0..n)
                .map(|i| Word {
                    id: i.to_string(),
                    word: format!("w{i}"),
                    translation: format!("t{i}"),
                    week: 1,
                })
                .collect(),
        }
    }

    #[test]
    fn paging() {
        let l = list(23);
        assert_eq!(l.page_count(10), 3);
        assert_eq!(l.page(1, 10).len(), 10);
        assert_eq!(l.page(3, 10).len(), 3);
        assert_eq!(l.page(3, 10)[0].word, "w20");
        assert!(l.page(4, 10).is_empty());
        assert!(l.page(0, 10).is_empty());
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
    }

    #[test]
    fn direction_question() {
        let w = Word {
            id: String::new(),
            word: "cat".into(),
            translation: "кот".into(),
            week: 1,
        };
        assert_eq!(Direction::ToWord.question(&w), ("кот", "cat"));
        assert_eq!(Direction::ToTranslation.question(&w), ("cat", "кот"));
    }

    #[test]
    fn direction_display_and_parse() {
        assert_eq!(Direction::ToTranslation.to_string(), "to-translation");
        assert_eq!("to_word".parse::<Direction>().unwrap(), Direction::ToWord);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn page_info_serde() {
        let all: PageInfo = Selection::All.into();
        assert_eq!(serde_json::to_string(&all).unwrap(), "\"all\"");
        let page: PageInfo = Selection::Page(2).into();
        assert_eq!(serde_json::to_string(&page).unwrap(), "2");
        let parsed: PageInfo = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(parsed, all);
    }

    #[test]
    fn word_accepts_remote_id_field() {
        let w: Word =
            serde_json::from_str(r#"{"_id":"abc","word":"cat","translation":"кот","week":2}"#)
                .unwrap();
        assert_eq!(w.id, "abc");
        assert_eq!(w.week, 2);
    }
}
