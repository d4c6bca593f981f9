use std::path::PathBuf;
use std::time::Duration;

use crate::interval::MAX_INTERVAL_DAYS;

const DEFAULT_DAILY_CHALLENGE_TIMEOUT_MS: u64 = 3_000;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Ceiling for computed review intervals.
    pub max_interval_days: i64,
    /// Budget for one daily challenge fetch before the today view gives
    /// up on it.
    pub daily_challenge_timeout: Duration,
    pub log_level: String,
    /// Directory for daily-rolling log files; `None` keeps logging on
    /// stdout only.
    pub log_dir: Option<PathBuf>,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let max_interval_days = std::env::var("REVIEW_MAX_INTERVAL_DAYS")
            .ok()
            .and_then(|value| value.parse::<i64>().ok())
            .filter(|days| *days >= 1)
            .unwrap_or(MAX_INTERVAL_DAYS);

        let daily_challenge_timeout = std::env::var("DAILY_CHALLENGE_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_DAILY_CHALLENGE_TIMEOUT_MS));

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let file_logs = std::env::var("ENABLE_FILE_LOGS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let log_dir = file_logs
            .then(|| std::env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string()))
            .map(PathBuf::from);

        Self {
            max_interval_days,
            daily_challenge_timeout,
            log_level,
            log_dir,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_interval_days: MAX_INTERVAL_DAYS,
            daily_challenge_timeout: Duration::from_millis(DEFAULT_DAILY_CHALLENGE_TIMEOUT_MS),
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}
