//! In-memory backend for testing.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use lexigrade_core::model::WordList;
use lexigrade_core::report::ScoreSubmission;
use lexigrade_core::statistics::ScoreEntry;
use lexigrade_core::traits::{ResultStore, WordSource};

/// A mock vocabulary service for exercising the quiz flow without a server.
#[derive(Default)]
pub struct MockBackend {
    /// Word lists keyed by week.
    lists: BTreeMap<u32, WordList>,
    /// Stored scores keyed by user.
    results: Mutex<HashMap<String, Vec<ScoreEntry>>>,
    /// Submissions received, in order.
    submissions: Mutex<Vec<(String, ScoreSubmission)>>,
    /// Number of calls made.
    call_count: AtomicU32,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock serving the given word lists.
    pub fn with_lists(lists: impl IntoIterator<Item = WordList>) -> Self {
        Self {
            lists: lists.into_iter().map(|l| (l.week, l)).collect(),
            ..Self::default()
        }
    }

    /// Get the number of calls made to this backend.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Every submission received so far.
    pub fn submissions(&self) -> Vec<(String, ScoreSubmission)> {
        self.submissions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl WordSource for MockBackend {
    async fn week_words(&self, week: u32) -> anyhow::Result<WordList> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.lists.get(&week).cloned().unwrap_or_else(|| WordList {
            week,
            name: format!("Week {week}"),
            words: Vec::new(),
        }))
    }

    async fn available_weeks(&self) -> anyhow::Result<Vec<u32>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if self.lists.is_empty() {
            return Ok(vec![1]);
        }
        Ok(self.lists.keys().copied().collect())
    }
}

#[async_trait]
impl ResultStore for MockBackend {
    async fn submit(&self, user_id: &str, submission: &ScoreSubmission) -> anyhow::Result<()> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.submissions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((user_id.to_string(), submission.clone()));
        self.results
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(user_id.to_string())
            .or_default()
            .push(ScoreEntry {
                week: submission.week,
                score: submission.score,
                recorded_at: Some(Utc::now()),
            });
        Ok(())
    }

    async fn results(&self, user_id: &str) -> anyhow::Result<Vec<ScoreEntry>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .results
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }
}
