//! Traits for the remote services the quiz flow talks to.
//!
//! Implemented by `lexigrade-client`; the engine itself never calls them.

use async_trait::async_trait;

use crate::model::WordList;
use crate::report::ScoreSubmission;
use crate::statistics::ScoreEntry;

/// Source of weekly word lists.
#[async_trait]
pub trait WordSource: Send + Sync {
    /// All words of one week.
    async fn week_words(&self, week: u32) -> anyhow::Result<WordList>;

    /// Weeks that have words.
    async fn available_weeks(&self) -> anyhow::Result<Vec<u32>>;
}

/// Store for per-user quiz scores.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Record a finished attempt's score.
    async fn submit(&self, user_id: &str, submission: &ScoreSubmission) -> anyhow::Result<()>;

    /// Every score stored for a user.
    async fn results(&self, user_id: &str) -> anyhow::Result<Vec<ScoreEntry>>;
}
