use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::confidence::Confidence;
use crate::daily::{DailyChallenge, DailyChallenges};
use crate::error::EngineError;
use crate::interval;
use crate::queue::{self, Queues, QueueSummary};
use crate::store::ReviewStore;
use crate::types::{ReviewRecord, ReviewState};

/// Merged "today" response: both action queues plus the provider's
/// question of the day, when it answered in time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayView {
    pub due: Vec<ReviewRecord>,
    pub needing_rating: Vec<ReviewRecord>,
    pub daily_challenge: Option<DailyChallenge>,
}

/// Review scheduling engine: owns the legal transitions on
/// [`ReviewRecord`]s and assembles the today view.
///
/// Stateless between calls. Every transition computes its successor
/// record in full and lands it with a single version-checked store
/// write, so a conflicting writer surfaces as
/// [`EngineError::ConcurrentUpdate`] instead of a lost update.
pub struct ReviewEngine {
    store: Arc<dyn ReviewStore>,
    challenges: Option<Arc<dyn DailyChallenges>>,
    config: EngineConfig,
}

impl ReviewEngine {
    pub fn new(
        store: Arc<dyn ReviewStore>,
        challenges: Option<Arc<dyn DailyChallenges>>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            challenges,
            config,
        }
    }

    /// Starts tracking a question the user just solved. The record
    /// enters the needing-rating queue until the first rating arrives.
    pub async fn mark_solved(
        &self,
        user_id: &str,
        question_id: &str,
    ) -> Result<ReviewRecord, EngineError> {
        self.mark_solved_at(user_id, question_id, Utc::now()).await
    }

    pub async fn mark_solved_at(
        &self,
        user_id: &str,
        question_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ReviewRecord, EngineError> {
        let record = ReviewRecord::new_solved(user_id, question_id, now);
        let saved = self.store.insert(record).await?;
        info!(
            "tracking question {} for user {} (record {})",
            question_id, user_id, saved.id
        );
        Ok(saved)
    }

    /// First rating after a solve. Establishes the initial schedule but
    /// does not count as a review, so `times_reviewed` and
    /// `last_reviewed` stay untouched. Only legal from `NeedsRating`;
    /// correcting a rating later has to go through [`Self::complete_review`].
    pub async fn rate_question(
        &self,
        id: Uuid,
        confidence: Confidence,
        notes: Option<String>,
    ) -> Result<ReviewRecord, EngineError> {
        self.rate_question_at(id, confidence, notes, Utc::now())
            .await
    }

    pub async fn rate_question_at(
        &self,
        id: Uuid,
        confidence: Confidence,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<ReviewRecord, EngineError> {
        let mut record = self.fetch(id).await?;

        let state = record.state_at(now);
        if state != ReviewState::NeedsRating {
            return Err(EngineError::InvalidState {
                operation: "rate_question",
                state,
            });
        }

        let days = interval::next_interval_capped(
            confidence,
            record.times_reviewed,
            0,
            self.config.max_interval_days,
        );
        record.confidence = Some(confidence);
        record.next_review = Some(now + Duration::days(days));
        if notes.is_some() {
            record.notes = notes;
        }

        let saved = self.store.update(record).await?;
        debug!(
            "record {} rated {} -> next review in {}d",
            id,
            confidence.as_str(),
            days
        );
        Ok(saved)
    }

    /// Completes a due (or reviewed-ahead) review. A supplied confidence
    /// replaces the stored one; otherwise the previous rating carries
    /// over. Grows or resets the interval from what was actually
    /// scheduled, stamps `last_reviewed`, and bumps `times_reviewed`.
    pub async fn complete_review(
        &self,
        id: Uuid,
        confidence: Option<Confidence>,
        notes: Option<String>,
    ) -> Result<ReviewRecord, EngineError> {
        self.complete_review_at(id, confidence, notes, Utc::now())
            .await
    }

    pub async fn complete_review_at(
        &self,
        id: Uuid,
        confidence: Option<Confidence>,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<ReviewRecord, EngineError> {
        let mut record = self.fetch(id).await?;

        let Some(prior) = record.confidence else {
            return Err(EngineError::InvalidState {
                operation: "complete_review",
                state: ReviewState::NeedsRating,
            });
        };
        let confidence = confidence.unwrap_or(prior);

        let anchor = record.last_reviewed.unwrap_or(record.solved_at);
        let scheduled_for = record.next_review.unwrap_or(now);
        let previous_days = (scheduled_for - anchor).num_days().max(1);

        let days = interval::next_interval_capped(
            confidence,
            record.times_reviewed,
            previous_days,
            self.config.max_interval_days,
        );

        record.confidence = Some(confidence);
        record.last_reviewed = Some(now);
        record.next_review = Some(now + Duration::days(days));
        record.times_reviewed += 1;
        if notes.is_some() {
            record.notes = notes;
        }

        let saved = self.store.update(record).await?;
        debug!(
            "record {} reviewed ({}x) as {} -> next review in {}d",
            id,
            saved.times_reviewed,
            confidence.as_str(),
            days
        );
        Ok(saved)
    }

    /// Both action queues for the user, freshly computed.
    pub async fn queues(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Queues, EngineError> {
        queue::build_queues(self.store.as_ref(), user_id, now).await
    }

    /// Dashboard counts over the same queues.
    pub async fn summary(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<QueueSummary, EngineError> {
        queue::summarize(self.store.as_ref(), user_id, now).await
    }

    /// Assembles the today view. Queue computation and the daily
    /// challenge fetch run concurrently; a slow or failing provider
    /// degrades to `daily_challenge: None` and never fails the view.
    pub async fn today_view(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<TodayView, EngineError> {
        let (queues, daily_challenge) = tokio::join!(
            queue::build_queues(self.store.as_ref(), user_id, now),
            self.fetch_daily_challenge(now.date_naive()),
        );
        let Queues { due, needing_rating } = queues?;

        Ok(TodayView {
            due,
            needing_rating,
            daily_challenge,
        })
    }

    async fn fetch_daily_challenge(&self, date: NaiveDate) -> Option<DailyChallenge> {
        let provider = self.challenges.as_ref()?;

        match tokio::time::timeout(self.config.daily_challenge_timeout, provider.fetch(date)).await
        {
            Ok(Ok(challenge)) => Some(challenge),
            Ok(Err(err)) => {
                warn!("daily challenge fetch failed for {}: {}", date, err);
                None
            }
            Err(_) => {
                warn!(
                    "daily challenge fetch for {} timed out after {:?}",
                    date, self.config.daily_challenge_timeout
                );
                None
            }
        }
    }

    async fn fetch(&self, id: Uuid) -> Result<ReviewRecord, EngineError> {
        self.store
            .get(id)
            .await?
            .ok_or(EngineError::NotFound { id })
    }
}
