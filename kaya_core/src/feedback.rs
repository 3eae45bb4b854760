//! Report feedback widget state.
//!
//! Submissions are logged locally; there is no remote endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Helpful,
    NeedsImprovement,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Helpful => "Helpful",
            Sentiment::NeedsImprovement => "Needs Improvement",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    #[error("Please select if the analysis was helpful")]
    NoSelection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub sentiment: Sentiment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Result of a submit that passed validation
#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackOutcome {
    Submitted(FeedbackRecord),
    /// Already in the thank-you state; nothing was recorded
    AlreadySubmitted,
}

#[derive(Debug, Clone, Default)]
pub struct FeedbackForm {
    sentiment: Option<Sentiment>,
    comment: String,
    record: Option<FeedbackRecord>,
}

impl FeedbackForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sentiment(&self) -> Option<Sentiment> {
        self.sentiment
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn is_submitted(&self) -> bool {
        self.record.is_some()
    }

    pub fn record(&self) -> Option<&FeedbackRecord> {
        self.record.as_ref()
    }

    /// Ignored once submitted
    pub fn choose(&mut self, sentiment: Sentiment) {
        if !self.is_submitted() {
            self.sentiment = Some(sentiment);
        }
    }

    /// Ignored once submitted
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        if !self.is_submitted() {
            self.comment = comment.into();
        }
    }

    pub fn submit(&mut self) -> Result<FeedbackOutcome, FeedbackError> {
        if self.is_submitted() {
            return Ok(FeedbackOutcome::AlreadySubmitted);
        }

        let sentiment = self.sentiment.ok_or(FeedbackError::NoSelection)?;
        let comment = self.comment.trim();
        let record = FeedbackRecord {
            sentiment,
            comment: (!comment.is_empty()).then(|| comment.to_string()),
            submitted_at: Utc::now(),
        };

        match serde_json::to_string(&record) {
            Ok(json) => log::info!("Submitting feedback: {}", json),
            Err(_) => log::info!("Submitting feedback: {:?}", record),
        }

        self.record = Some(record.clone());
        Ok(FeedbackOutcome::Submitted(record))
    }
}
