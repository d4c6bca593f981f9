use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::confidence::Confidence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// Catalog entry for a question. Owned by the external catalog; this
/// crate only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub title: String,
    pub url: String,
    pub difficulty: Difficulty,
}

/// Derived position of a record in the review lifecycle. Computed from
/// stored fields at an evaluation time, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewState {
    NeedsRating,
    Scheduled,
    Due,
}

impl ReviewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NeedsRating => "needsRating",
            Self::Scheduled => "scheduled",
            Self::Due => "due",
        }
    }
}

impl std::fmt::Display for ReviewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-(user, question) review tracking state.
///
/// Invariants, upheld by the engine transitions:
/// - `times_reviewed == 0` exactly when `last_reviewed` is `None`
/// - `next_review`, when set, is strictly after `last_reviewed`
///   (or `solved_at` before the first review)
/// - an unrated record is never scheduled
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub id: Uuid,
    pub user_id: String,
    pub question_id: String,
    pub confidence: Option<Confidence>,
    pub times_reviewed: u32,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub next_review: Option<DateTime<Utc>>,
    pub solved_at: DateTime<Utc>,
    pub notes: Option<String>,
    /// Optimistic-concurrency token, bumped by the store on every write.
    pub version: u64,
}

impl ReviewRecord {
    /// Fresh record for a question the user just solved. Unrated and
    /// unscheduled, so it lands in the needing-rating queue.
    pub fn new_solved(user_id: &str, question_id: &str, solved_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            question_id: question_id.to_string(),
            confidence: None,
            times_reviewed: 0,
            last_reviewed: None,
            next_review: None,
            solved_at,
            notes: None,
            version: 0,
        }
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> ReviewState {
        match (self.confidence, self.next_review) {
            (None, _) => ReviewState::NeedsRating,
            (Some(_), Some(next)) if next <= now => ReviewState::Due,
            (Some(_), _) => ReviewState::Scheduled,
        }
    }

    pub fn needs_rating(&self) -> bool {
        self.confidence.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn fresh_record_needs_rating() {
        let record = ReviewRecord::new_solved("u1", "two-sum", at(1_000));
        assert!(record.needs_rating());
        assert_eq!(record.state_at(at(2_000)), ReviewState::NeedsRating);
        assert_eq!(record.times_reviewed, 0);
        assert!(record.last_reviewed.is_none());
        assert!(record.next_review.is_none());
    }

    #[test]
    fn rated_record_is_scheduled_then_due() {
        let mut record = ReviewRecord::new_solved("u1", "two-sum", at(1_000));
        record.confidence = Some(Confidence::Confident);
        record.next_review = Some(at(5_000));

        assert_eq!(record.state_at(at(4_999)), ReviewState::Scheduled);
        assert_eq!(record.state_at(at(5_000)), ReviewState::Due);
        assert_eq!(record.state_at(at(9_000)), ReviewState::Due);
    }

    #[test]
    fn wire_field_names_are_camel_case() {
        let record = ReviewRecord::new_solved("u1", "two-sum", at(1_000));
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("questionId").is_some());
        assert!(json.get("timesReviewed").is_some());
        assert!(json.get("nextReview").is_some());
        assert!(json.get("solvedAt").is_some());
    }
}
