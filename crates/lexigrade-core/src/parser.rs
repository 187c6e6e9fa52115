//! Word-list and answer-sheet parsing.
//!
//! Word lists are TOML files, one week per file. Answer sheets are TOML or
//! JSON; JSON sheets are checked field by field so malformed input fails
//! with a precise [`GradeError`] instead of being coerced.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GradeError;
use crate::grading::AnswerPair;
use crate::model::{Word, WordList};
use crate::normalize::normalize;

/// Intermediate TOML structure for word-list files.
#[derive(Debug, Serialize, Deserialize)]
struct TomlWordFile {
    word_list: TomlWordListHeader,
    #[serde(default)]
    words: Vec<TomlWord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlWordListHeader {
    week: u32,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlWord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    id: String,
    word: String,
    translation: String,
}

/// Intermediate TOML structure for answer sheets.
#[derive(Debug, Deserialize)]
struct TomlAnswerSheet {
    #[serde(default)]
    answers: Vec<AnswerPair>,
}

/// Parse a single TOML file into a `WordList`.
pub fn parse_word_list(path: &Path) -> Result<WordList> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read word list: {}", path.display()))?;

    parse_word_list_str(&content, path)
}

/// Parse a TOML string into a `WordList` (useful for testing).
pub fn parse_word_list_str(content: &str, source_path: &Path) -> Result<WordList> {
    let parsed: TomlWordFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let week = parsed.word_list.week;
    let words = parsed
        .words
        .into_iter()
        .map(|w| Word {
            id: w.id,
            word: w.word,
            translation: w.translation,
            week,
        })
        .collect();

    Ok(WordList {
        week,
        name: parsed.word_list.name,
        words,
    })
}

/// Render a `WordList` in the TOML word-list format.
pub fn word_list_to_toml(list: &WordList) -> Result<String> {
    let file = TomlWordFile {
        word_list: TomlWordListHeader {
            week: list.week,
            name: list.name.clone(),
        },
        words: list
            .words
            .iter()
            .map(|w| TomlWord {
                id: w.id.clone(),
                word: w.word.clone(),
                translation: w.translation.clone(),
            })
            .collect(),
    };
    toml::to_string_pretty(&file).context("failed to serialize word list")
}

/// Recursively load all `.toml` word lists from a directory, sorted by path.
pub fn load_word_directory(dir: &Path) -> Result<Vec<WordList>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        paths.push(entry?.path());
    }
    paths.sort();

    let mut lists = Vec::new();
    for path in paths {
        if path.is_dir() {
            lists.extend(load_word_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_word_list(&path) {
                Ok(list) => lists.push(list),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(lists)
}

/// Load word lists from a file or a directory.
pub fn load_word_lists(path: &Path) -> Result<Vec<WordList>> {
    if path.is_dir() {
        load_word_directory(path)
    } else {
        Ok(vec![parse_word_list(path)?])
    }
}

/// Load an answer sheet, choosing the format from the file extension.
pub fn parse_answer_sheet(path: &Path) -> Result<Vec<AnswerPair>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer sheet: {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON: {}", path.display()))?;
        let pairs = answer_pairs_from_json(&value)
            .with_context(|| format!("invalid answer sheet: {}", path.display()))?;
        Ok(pairs)
    } else {
        let sheet: TomlAnswerSheet = toml::from_str(&content)
            .with_context(|| format!("failed to parse TOML: {}", path.display()))?;
        Ok(sheet.answers)
    }
}

/// Convert untyped JSON into answer pairs, rejecting anything that is not
/// an array of `{expected: string, actual: string, prompt?: string}`.
pub fn answer_pairs_from_json(value: &Value) -> Result<Vec<AnswerPair>, GradeError> {
    let items = value.as_array().ok_or(GradeError::NotAList {
        found: json_type(value),
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let obj = item.as_object().ok_or(GradeError::NotAnObject {
                index,
                found: json_type(item),
            })?;

            let string_field = |field: &'static str| -> Result<Option<String>, GradeError> {
                match obj.get(field) {
                    None => Ok(None),
                    Some(Value::String(s)) => Ok(Some(s.clone())),
                    Some(other) => Err(GradeError::InvalidType {
                        index,
                        field,
                        found: json_type(other),
                    }),
                }
            };
            let required = |field: &'static str| -> Result<String, GradeError> {
                string_field(field)?.ok_or(GradeError::MissingField { index, field })
            };

            Ok(AnswerPair {
                prompt: string_field("prompt")?,
                expected: required("expected")?,
                actual: required("actual")?,
            })
        })
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A warning from word-list validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The offending word (if applicable).
    pub word: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a word list for common issues.
pub fn validate_word_list(list: &WordList) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if list.week == 0 {
        warnings.push(ValidationWarning {
            word: None,
            message: "week numbers start at 1".into(),
        });
    }

    if list.words.is_empty() {
        warnings.push(ValidationWarning {
            word: None,
            message: "word list is empty".into(),
        });
    }

    let mut seen = HashSet::new();
    for (i, w) in list.words.iter().enumerate() {
        let normalized = normalize(&w.word);
        let label = if normalized.is_empty() {
            format!("#{}", i + 1)
        } else {
            w.word.clone()
        };

        if normalized.is_empty() {
            warnings.push(ValidationWarning {
                word: Some(label.clone()),
                message: "word is empty".into(),
            });
        } else if !seen.insert(normalized) {
            warnings.push(ValidationWarning {
                word: Some(label.clone()),
                message: format!("duplicate word: {}", w.word),
            });
        }

        if normalize(&w.translation).is_empty() {
            warnings.push(ValidationWarning {
                word: Some(label),
                message: "translation is empty".into(),
            });
        }
    }

    warnings
}
