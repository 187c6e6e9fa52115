//! Per-week score statistics over past attempts.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quiz::PassPolicy;
use crate::report::AttemptRecord;

/// One stored score, from a local attempt or the remote result store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub week: u32,
    pub score: u8,
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl ScoreEntry {
    /// `None` for attempts that graded nothing.
    pub fn from_attempt(record: &AttemptRecord) -> Option<Self> {
        record.report.score_percent.map(|score| ScoreEntry {
            week: record.week,
            score,
            recorded_at: Some(record.created_at),
        })
    }
}

/// Summary of all attempts for one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekStats {
    pub week: u32,
    pub attempts: usize,
    pub best_score: u8,
    /// Score of the most recent attempt (input order breaks timestamp ties).
    pub latest_score: u8,
    pub average_score: f64,
    /// Whether the best score passes the policy.
    pub passed: bool,
}

/// Group scores by week.
pub fn compute_week_stats(entries: &[ScoreEntry], policy: &PassPolicy) -> BTreeMap<u32, WeekStats> {
    let mut grouped: BTreeMap<u32, Vec<&ScoreEntry>> = BTreeMap::new();
    for e in entries {
        grouped.entry(e.week).or_default().push(e);
    }

    grouped
        .into_iter()
        .map(|(week, group)| {
            let best_score = group.iter().map(|e| e.score).max().unwrap_or(0);
            // Undated entries sort before dated ones; max_by_key keeps the last maximum.
            let latest_score = group
                .iter()
                .max_by_key(|e| e.recorded_at)
                .map(|e| e.score)
                .unwrap_or(0);
            let average_score =
                group.iter().map(|e| e.score as f64).sum::<f64>() / group.len().max(1) as f64;

            (
                week,
                WeekStats {
                    week,
                    attempts: group.len(),
                    best_score,
                    latest_score,
                    average_score,
                    passed: policy.passes_score(Some(best_score)),
                },
            )
        })
        .collect()
}
