//! Review scheduling engine for a coding-interview practice tracker.
//!
//! Tracks one review record per (user, question) pair and decides, from
//! a user-supplied confidence signal, when each solved question should
//! come back for review. The crate owns the confidence model, the
//! interval calculator, the record state machine, and the today-view
//! queues; authentication, HTTP, durable storage, and the daily
//! challenge provider are its callers' and collaborators' concerns.

pub mod config;
pub mod confidence;
pub mod daily;
pub mod engine;
pub mod error;
pub mod interval;
pub mod logging;
pub mod queue;
pub mod store;
pub mod types;

pub use config::EngineConfig;
pub use confidence::{Confidence, ConfidenceLevelInfo, CONFIDENCE_LEVELS};
pub use daily::{DailyChallenge, DailyChallenges, ProviderError};
pub use engine::{ReviewEngine, TodayView};
pub use error::EngineError;
pub use queue::{Queues, QueueSummary};
pub use store::{MemoryStore, ReviewStore, StoreError};
pub use types::{Difficulty, Question, ReviewRecord, ReviewState};
