//! Test reports, attempt records with JSON persistence, and attempt comparison.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grading::{classify_pair, AnswerPair, Classification, GradeResult};
use crate::model::{Direction, PageInfo};

/// Aggregate outcome of one graded quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReport {
    pub total: usize,
    pub exact_count: usize,
    pub tolerant_count: usize,
    pub incorrect_count: usize,
    /// `exact_count + tolerant_count`.
    pub credited_count: usize,
    /// Rounded credited percentage; `None` when nothing was graded.
    pub score_percent: Option<u8>,
    /// Per-question results in input order.
    pub details: Vec<GradeResult>,
}

/// Coarse feedback for a finished attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// Every answer was credited.
    Perfect,
    /// At least 70% credited.
    Good,
    NeedsPractice,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Perfect => write!(f, "perfect"),
            Verdict::Good => write!(f, "good"),
            Verdict::NeedsPractice => write!(f, "needs practice"),
        }
    }
}

impl TestReport {
    /// Feedback tier, or `None` for an empty report.
    pub fn verdict(&self) -> Option<Verdict> {
        if self.total == 0 {
            return None;
        }
        Some(if self.credited_count == self.total {
            Verdict::Perfect
        } else if self.credited_count * 10 >= self.total * 7 {
            Verdict::Good
        } else {
            Verdict::NeedsPractice
        })
    }

    /// Results with the given classification, in input order.
    pub fn by_classification(
        &self,
        classification: Classification,
    ) -> impl Iterator<Item = &GradeResult> {
        self.details
            .iter()
            .filter(move |d| d.classification == classification)
    }
}

/// Round `credited / total * 100` half-up; `None` when `total == 0`.
pub fn score_percent(credited: usize, total: usize) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let credited = credited.min(total) as u64;
    let total = total as u64;
    let rounded = (200 * credited + total) / (2 * total);
    Some(rounded as u8)
}

/// Incremental report construction, one answer at a time.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    exact_count: usize,
    tolerant_count: usize,
    incorrect_count: usize,
    details: Vec<GradeResult>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grade one pair and append it to the report.
    pub fn push(&mut self, pair: &AnswerPair) -> &GradeResult {
        let result = classify_pair(pair);
        match result.classification {
            Classification::Exact => self.exact_count += 1,
            Classification::Tolerant => self.tolerant_count += 1,
            Classification::Incorrect => self.incorrect_count += 1,
        }
        self.details.push(result);
        &self.details[self.details.len() - 1]
    }

    /// Number of answers graded so far.
    pub fn len(&self) -> usize {
        self.details.len()
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    pub fn finish(self) -> TestReport {
        let total = self.details.len();
        let credited_count = self.exact_count + self.tolerant_count;
        TestReport {
            total,
            exact_count: self.exact_count,
            tolerant_count: self.tolerant_count,
            incorrect_count: self.incorrect_count,
            credited_count,
            score_percent: score_percent(credited_count, total),
            details: self.details,
        }
    }
}

/// Grade every pair and aggregate the results, preserving input order.
pub fn build_report(pairs: &[AnswerPair]) -> TestReport {
    let mut builder = ReportBuilder::new();
    for pair in pairs {
        builder.push(pair);
    }
    let report = builder.finish();
    tracing::debug!(
        total = report.total,
        exact = report.exact_count,
        tolerant = report.tolerant_count,
        incorrect = report.incorrect_count,
        "graded answers"
    );
    report
}

/// A finished quiz attempt with its context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub week: u32,
    pub page: PageInfo,
    #[serde(default)]
    pub direction: Direction,
    pub report: TestReport,
}

/// What gets stored against a user once an attempt is done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub week: u32,
    pub score: u8,
    pub page: PageInfo,
}

impl AttemptRecord {
    pub fn new(week: u32, page: PageInfo, direction: Direction, report: TestReport) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            week,
            page,
            direction,
            report,
        }
    }

    /// The score to persist; `None` when the attempt graded nothing.
    pub fn submission(&self) -> Option<ScoreSubmission> {
        self.report.score_percent.map(|score| ScoreSubmission {
            week: self.week,
            score,
            page: self.page,
        })
    }

    /// Save the record as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize attempt")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write attempt to {}", path.display()))?;
        Ok(())
    }

    /// Load a record from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read attempt from {}", path.display()))?;
        let record: AttemptRecord =
            serde_json::from_str(&content).context("failed to parse attempt JSON")?;
        Ok(record)
    }

    /// Load every `*.json` attempt in a directory, oldest first.
    pub fn load_dir(dir: &Path) -> Result<Vec<Self>> {
        let mut records = Vec::new();
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("failed to read directory: {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                records.push(Self::load_json(&path)?);
            }
        }
        records.sort_by_key(|r| r.created_at);
        Ok(records)
    }

    /// Compare this attempt against an earlier one, item by item.
    ///
    /// Items are matched on their normalized expected answer; a word asked
    /// more than once is matched by its occurrence order.
    pub fn compare(&self, baseline: &AttemptRecord) -> AttemptComparison {
        let baseline_items = occurrence_index(baseline);
        let current_items = occurrence_index(self);

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_items = 0usize;

        for (key, detail) in occurrence_keys(self).zip(&self.report.details) {
            let Some(&before) = baseline_items.get(&key) else {
                new_items += 1;
                continue;
            };
            let change = ItemChange {
                expected: detail.expected.clone(),
                before,
                after: detail.classification,
            };
            match (before.is_credited(), detail.classification.is_credited()) {
                (true, false) => regressions.push(change),
                (false, true) => improvements.push(change),
                _ => unchanged += 1,
            }
        }

        let removed_items = baseline_items
            .keys()
            .filter(|k| !current_items.contains_key(*k))
            .count();

        AttemptComparison {
            baseline_score: baseline.report.score_percent,
            current_score: self.report.score_percent,
            regressions,
            improvements,
            unchanged,
            new_items,
            removed_items,
        }
    }
}

/// `(normalized expected, n)` for the n-th item asking that word, in order.
fn occurrence_keys(record: &AttemptRecord) -> impl Iterator<Item = (String, usize)> + '_ {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    record.report.details.iter().map(move |d| {
        let n = seen.entry(d.normalized_expected.as_str()).or_insert(0);
        let key = (d.normalized_expected.clone(), *n);
        *n += 1;
        key
    })
}

fn occurrence_index(record: &AttemptRecord) -> HashMap<(String, usize), Classification> {
    occurrence_keys(record)
        .zip(record.report.details.iter().map(|d| d.classification))
        .collect()
}

/// Result of comparing two attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptComparison {
    pub baseline_score: Option<u8>,
    pub current_score: Option<u8>,
    /// Items credited before and not credited now.
    pub regressions: Vec<ItemChange>,
    /// Items not credited before and credited now.
    pub improvements: Vec<ItemChange>,
    pub unchanged: usize,
    /// Items only in the current attempt.
    pub new_items: usize,
    /// Items only in the baseline.
    pub removed_items: usize,
}

/// One item whose credit changed between attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemChange {
    pub expected: String,
    pub before: Classification,
    pub after: Classification,
}

fn fmt_score(score: Option<u8>) -> String {
    score.map_or_else(|| "-".to_string(), |s| format!("{s}%"))
}

impl AttemptComparison {
    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Score:** {} -> {}\n\n",
            fmt_score(self.baseline_score),
            fmt_score(self.current_score)
        ));
        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged
        ));

        for (title, items) in [
            ("Regressions", &self.regressions),
            ("Improvements", &self.improvements),
        ] {
            if items.is_empty() {
                continue;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Word | Before | After |\n");
            md.push_str("|------|--------|-------|\n");
            for item in items {
                md.push_str(&format!(
                    "| {} | {} | {} |\n",
                    item.expected, item.before, item.after
                ));
            }
            md.push('\n');
        }

        md
    }

    /// Returns true if any previously credited item lost credit.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}
