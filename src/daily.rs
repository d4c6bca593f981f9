use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Question;

/// The provider's question of the day. Informational only: it never
/// becomes a [`crate::types::ReviewRecord`] and carries no scheduling
/// state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyChallenge {
    pub date: NaiveDate,
    pub question: Question,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("daily challenge provider unavailable: {0}")]
    Unavailable(String),
    #[error("daily challenge request timed out")]
    Timeout,
}

/// Fetch-by-date contract of the external daily challenge provider.
/// Implementations live outside this crate; the engine only consumes
/// them, behind a timeout.
#[async_trait]
pub trait DailyChallenges: Send + Sync {
    async fn fetch(&self, date: NaiveDate) -> Result<DailyChallenge, ProviderError>;
}

/// Provider double that serves one fixed challenge for any date.
pub struct StaticChallenges {
    challenge: DailyChallenge,
}

impl StaticChallenges {
    pub fn new(challenge: DailyChallenge) -> Self {
        Self { challenge }
    }
}

#[async_trait]
impl DailyChallenges for StaticChallenges {
    async fn fetch(&self, _date: NaiveDate) -> Result<DailyChallenge, ProviderError> {
        Ok(self.challenge.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::types::Difficulty;

    fn challenge() -> DailyChallenge {
        DailyChallenge {
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            question: Question {
                id: "lru-cache".to_string(),
                title: "LRU Cache".to_string(),
                url: "https://leetcode.com/problems/lru-cache/".to_string(),
                difficulty: Difficulty::Medium,
            },
        }
    }

    #[tokio::test]
    async fn static_provider_serves_its_challenge() {
        let provider = StaticChallenges::new(challenge());
        let fetched = provider
            .fetch(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap())
            .await
            .unwrap();
        assert_eq!(fetched.question.id, "lru-cache");
    }

    #[test]
    fn descriptor_serializes_camel_case() {
        let json = serde_json::to_value(challenge()).unwrap();
        assert!(json["question"].get("id").is_some());
        assert_eq!(json["question"]["difficulty"], "medium");
    }
}
