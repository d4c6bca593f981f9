use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::EngineConfig;

/// Keeps the non-blocking file writer flushing. Drop it and buffered
/// log lines are lost, so hold it for the process lifetime.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

/// Installs the tracing subscriber for embedders that do not bring
/// their own. Stdout is always on, filtered by the configured level; a
/// daily-rolling file layer is added when [`EngineConfig::log_dir`] is
/// set. An unwritable log directory falls back to stdout-only rather
/// than failing startup.
pub fn init_tracing(config: &EngineConfig) -> Option<FileLogGuard> {
    let filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let mut file_layer = None;
    let mut file_guard = None;
    if let Some(dir) = config.log_dir.as_deref() {
        match rolling_writer(dir) {
            Ok((writer, guard)) => {
                file_layer = Some(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(true),
                );
                file_guard = Some(FileLogGuard { _guard: guard });
            }
            Err(err) => {
                eprintln!("file logging disabled for {}: {err}", dir.display());
            }
        }
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .init();

    file_guard
}

fn rolling_writer(dir: &Path) -> std::io::Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(dir)?;
    let appender = RollingFileAppender::new(Rotation::DAILY, dir, "engine.log");
    Ok(tracing_appender::non_blocking(appender))
}
