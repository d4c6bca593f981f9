use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::EngineError;
use crate::store::ReviewStore;
use crate::types::{ReviewRecord, ReviewState};

/// Action lists for one user at one evaluation time. `Scheduled`
/// records appear in neither list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Queues {
    /// Records whose `next_review` has passed, most overdue first.
    pub due: Vec<ReviewRecord>,
    /// Unrated records, oldest solve first.
    pub needing_rating: Vec<ReviewRecord>,
}

/// Dashboard counts, the home-page summary of the queues.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueSummary {
    pub reviews_due_today: usize,
    pub questions_needing_rating: usize,
}

/// Computes both queues from the latest persisted state. Read-only and
/// safe to call repeatedly; nothing is cached across calls.
pub async fn build_queues(
    store: &dyn ReviewStore,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<Queues, EngineError> {
    let records = store.list_by_user(user_id).await?;

    let mut due = Vec::new();
    let mut needing_rating = Vec::new();
    for record in records {
        match record.state_at(now) {
            ReviewState::Due => due.push(record),
            ReviewState::NeedsRating => needing_rating.push(record),
            ReviewState::Scheduled => {}
        }
    }

    due.sort_by_key(|r| r.next_review);
    needing_rating.sort_by_key(|r| r.solved_at);

    Ok(Queues { due, needing_rating })
}

pub async fn summarize(
    store: &dyn ReviewStore,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<QueueSummary, EngineError> {
    let queues = build_queues(store, user_id, now).await?;
    Ok(QueueSummary {
        reviews_due_today: queues.due.len(),
        questions_needing_rating: queues.needing_rating.len(),
    })
}
