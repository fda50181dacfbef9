use chrono::{DateTime, Utc};
use serde::Serialize;

/// A chunk of text paired with its polarity score in [-1.0, 1.0].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecord {
    pub text: String,
    pub sentiment_score: f64,
}

impl ScoredRecord {
    pub fn new(text: impl Into<String>, sentiment_score: f64) -> Self {
        Self {
            text: text.into(),
            sentiment_score,
        }
    }
}

/// A scored record as stored in `sentiment_data`.
///
/// `id` and `created_at` are assigned by the store. `batch_id` and `position`
/// are absent on rows written before batches were tracked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRecord {
    pub id: i64,
    pub text: String,
    pub sentiment_score: f64,
    pub created_at: DateTime<Utc>,
    pub batch_id: Option<String>,
    pub position: Option<u64>,
}

impl PersistedRecord {
    pub fn as_scored(&self) -> ScoredRecord {
        ScoredRecord::new(self.text.clone(), self.sentiment_score)
    }
}

/// Returned by a successful batch save.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReceipt {
    pub batch_id: String,
    pub count: usize,
    pub created_at: DateTime<Utc>,
}
