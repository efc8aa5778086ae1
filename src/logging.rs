//! Tracing setup.
//!
//! The terminal belongs to the UI, so logs go to
//! `<data_dir>/logs/headlines.log` through a non-blocking writer.  The
//! returned [`WorkerGuard`] flushes that writer on drop and must be held for
//! the life of the program.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "headlines.log";

/// Install the global subscriber writing to `logs_dir/headlines.log`.
///
/// `RUST_LOG` wins over `level` when set.  If the file cannot be opened a
/// warning is printed (the terminal has not been taken over yet) and logging
/// stays off; the application still runs.
pub fn init(logs_dir: &Path, level: &str) -> Option<WorkerGuard> {
    let path = log_path(logs_dir);
    let file = std::fs::create_dir_all(logs_dir).and_then(|()| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
    });

    match file {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter(level))
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .init();
            tracing::info!(path = %path.display(), "logging initialized");
            Some(guard)
        }
        Err(e) => {
            eprintln!(
                "headlines: cannot open log file {}: {e}; continuing without logs",
                path.display()
            );
            None
        }
    }
}

/// `RUST_LOG` if set and valid, else `level`, else `info`.
fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Full path of the log file for a logs directory.
pub fn log_path(logs_dir: &Path) -> PathBuf {
    logs_dir.join(LOG_FILE)
}
