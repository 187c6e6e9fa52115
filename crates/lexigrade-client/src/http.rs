//! REST client for the vocabulary service.
//!
//! Endpoints (relative to the configured base URL):
//! - `GET /words?week=N&limit=1000` → `{ "words": [...] }`
//! - `GET /words/weeks` → `{ "weeks": [...] }`
//! - `POST /tests` with `{ "userId", "week", "score", "page" }`
//! - `GET /tests/{userId}` → `{ "testResults": [{ "week", "score", "date" }] }`

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use lexigrade_core::model::{PageInfo, Word, WordList};
use lexigrade_core::report::ScoreSubmission;
use lexigrade_core::statistics::ScoreEntry;
use lexigrade_core::traits::{ResultStore, WordSource};

use crate::error::ClientError;

/// Enough to fetch every word of a week in one request.
const WEEK_WORD_LIMIT: u32 = 1000;

/// HTTP implementation of [`WordSource`] and [`ResultStore`].
pub struct HttpBackend {
    base_url: String,
    token: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str, token: Option<String>, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            timeout_secs,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        self.authorize(request).send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout(self.timeout_secs)
            } else {
                ClientError::Network(e.to_string())
            }
        })
    }
}

#[derive(Deserialize)]
struct WordsResponse {
    #[serde(default)]
    words: Vec<Word>,
}

#[derive(Deserialize)]
struct WeeksResponse {
    #[serde(default)]
    weeks: Vec<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitRequest<'a> {
    user_id: &'a str,
    week: u32,
    score: u8,
    page: PageInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TestResultsResponse {
    #[serde(default)]
    test_results: Vec<StoredResult>,
}

#[derive(Deserialize)]
struct StoredResult {
    week: WeekNumber,
    score: f64,
    #[serde(default)]
    date: Option<DateTime<Utc>>,
}

/// The service stores weeks as numbers or numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum WeekNumber {
    Number(u32),
    Text(String),
}

impl WeekNumber {
    fn value(&self) -> Option<u32> {
        match self {
            WeekNumber::Number(n) => Some(*n),
            WeekNumber::Text(s) => s.trim().parse().ok(),
        }
    }
}

async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status().as_u16();
    match status {
        401 | 403 => Err(ClientError::Unauthorized { status }),
        404 => Err(ClientError::NotFound(response.url().path().to_string())),
        s if s >= 400 => {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::Api { status, message })
        }
        _ => Ok(response),
    }
}

async fn parse_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    response.json().await.map_err(|e| ClientError::Api {
        status: 0,
        message: format!("failed to parse response: {e}"),
    })
}

#[async_trait]
impl WordSource for HttpBackend {
    #[instrument(skip(self))]
    async fn week_words(&self, week: u32) -> Result<WordList> {
        let url = self.url(&format!("/words?week={week}&limit={WEEK_WORD_LIMIT}"));
        let response = self.send(self.client.get(url)).await?;

        let words = match error_for_status(response).await {
            Ok(response) => parse_json::<WordsResponse>(response).await?.words,
            Err(ClientError::NotFound(_)) | Err(ClientError::Api { status: 500, .. }) => {
                tracing::warn!(week, "word service has no words for this week");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        let words = words
            .into_iter()
            .map(|mut w| {
                if w.week == 0 {
                    w.week = week;
                }
                w
            })
            .collect();

        Ok(WordList {
            week,
            name: format!("Week {week}"),
            words,
        })
    }

    #[instrument(skip(self))]
    async fn available_weeks(&self) -> Result<Vec<u32>> {
        let response = self.send(self.client.get(self.url("/words/weeks"))).await?;
        match error_for_status(response).await {
            Ok(response) => {
                let mut weeks = parse_json::<WeeksResponse>(response).await?.weeks;
                weeks.sort_unstable();
                weeks.dedup();
                Ok(weeks)
            }
            Err(ClientError::NotFound(_)) => {
                tracing::warn!("week list not found, assuming week 1");
                Ok(vec![1])
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ResultStore for HttpBackend {
    #[instrument(skip(self, submission), fields(week = submission.week, score = submission.score))]
    async fn submit(&self, user_id: &str, submission: &ScoreSubmission) -> Result<()> {
        let body = SubmitRequest {
            user_id,
            week: submission.week,
            score: submission.score,
            page: submission.page,
        };
        let response = self
            .send(self.client.post(self.url("/tests")).json(&body))
            .await?;
        error_for_status(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn results(&self, user_id: &str) -> Result<Vec<ScoreEntry>> {
        let response = self
            .send(self.client.get(self.url(&format!("/tests/{user_id}"))))
            .await?;
        let response = error_for_status(response).await?;
        let parsed: TestResultsResponse = parse_json(response).await?;

        let entries = parsed
            .test_results
            .into_iter()
            .filter_map(|r| {
                let Some(week) = r.week.value() else {
                    tracing::warn!("skipping stored result with unreadable week");
                    return None;
                };
                Some(ScoreEntry {
                    week,
                    score: r.score.round().clamp(0.0, 100.0) as u8,
                    recorded_at: r.date,
                })
            })
            .collect();
        Ok(entries)
    }
}
