use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;
use crate::types::ReviewState;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("review record {id} not found")]
    NotFound { id: Uuid },

    #[error("{operation} is not allowed while the record is {state}")]
    InvalidState {
        operation: &'static str,
        state: ReviewState,
    },

    #[error("user {user_id} already tracks question {question_id}")]
    AlreadyTracked { user_id: String, question_id: String },

    /// Retryable: refetch the record and re-apply the transition.
    #[error("concurrent update on record {id}")]
    ConcurrentUpdate { id: Uuid },

    #[error("store failure: {0}")]
    Store(String),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound { id },
            StoreError::VersionConflict(id) => Self::ConcurrentUpdate { id },
            StoreError::Duplicate {
                user_id,
                question_id,
            } => Self::AlreadyTracked {
                user_id,
                question_id,
            },
            StoreError::Backend(message) => Self::Store(message),
        }
    }
}
