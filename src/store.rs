use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::types::ReviewRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record {0} not found")]
    NotFound(Uuid),
    #[error("version conflict on record {0}")]
    VersionConflict(Uuid),
    #[error("user {user_id} already tracks question {question_id}")]
    Duplicate { user_id: String, question_id: String },
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Narrow repository contract the engine reads and writes through.
///
/// `update` must be atomic per record: the write only lands if the
/// stored version still equals the version the caller read, and the
/// stored version is bumped on success. That is what serializes
/// concurrent transitions on the same record.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<ReviewRecord>, StoreError>;

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<ReviewRecord>, StoreError>;

    /// Persists a new record. Fails with [`StoreError::Duplicate`] if the
    /// (user, question) pair is already tracked.
    async fn insert(&self, record: ReviewRecord) -> Result<ReviewRecord, StoreError>;

    /// Compare-and-set write keyed by `record.id` and `record.version`.
    async fn update(&self, record: ReviewRecord) -> Result<ReviewRecord, StoreError>;
}

/// In-process store with per-record optimistic versioning. Backs the
/// test suite and embedders that do not need durable persistence.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<Uuid, ReviewRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn get(&self, id: Uuid) -> Result<Option<ReviewRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<ReviewRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, mut record: ReviewRecord) -> Result<ReviewRecord, StoreError> {
        let mut records = self.records.write().await;

        let duplicate = records
            .values()
            .any(|r| r.user_id == record.user_id && r.question_id == record.question_id);
        if duplicate {
            return Err(StoreError::Duplicate {
                user_id: record.user_id,
                question_id: record.question_id,
            });
        }

        record.version = 1;
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, mut record: ReviewRecord) -> Result<ReviewRecord, StoreError> {
        let mut records = self.records.write().await;

        let stored = records
            .get(&record.id)
            .ok_or(StoreError::NotFound(record.id))?;
        if stored.version != record.version {
            return Err(StoreError::VersionConflict(record.id));
        }

        record.version += 1;
        records.insert(record.id, record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample(user_id: &str, question_id: &str) -> ReviewRecord {
        ReviewRecord::new_solved(user_id, question_id, Utc.timestamp_opt(1_700_000_000, 0).unwrap())
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let store = MemoryStore::new();
        let inserted = store.insert(sample("u1", "two-sum")).await.unwrap();
        assert_eq!(inserted.version, 1);

        let fetched = store.get(inserted.id).await.unwrap().unwrap();
        assert_eq!(fetched.question_id, "two-sum");
        assert_eq!(fetched.version, 1);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_pair() {
        let store = MemoryStore::new();
        store.insert(sample("u1", "two-sum")).await.unwrap();

        let err = store.insert(sample("u1", "two-sum")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));

        // Same question for another user is fine.
        store.insert(sample("u2", "two-sum")).await.unwrap();
    }

    #[tokio::test]
    async fn update_bumps_version() {
        let store = MemoryStore::new();
        let inserted = store.insert(sample("u1", "two-sum")).await.unwrap();

        let mut changed = inserted.clone();
        changed.notes = Some("review the hash-map trick".to_string());
        let updated = store.update(changed).await.unwrap();
        assert_eq!(updated.version, 2);
    }

    #[tokio::test]
    async fn stale_writer_gets_version_conflict() {
        let store = MemoryStore::new();
        let inserted = store.insert(sample("u1", "two-sum")).await.unwrap();

        // Two writers start from the same read snapshot.
        let first = inserted.clone();
        let second = inserted.clone();

        store.update(first).await.unwrap();
        let err = store.update(second).await.unwrap_err();
        assert!(matches!(err, StoreError::VersionConflict(id) if id == inserted.id));
    }

    #[tokio::test]
    async fn update_on_unknown_record_is_not_found() {
        let store = MemoryStore::new();
        let err = store.update(sample("u1", "two-sum")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
