//! Logging Setup
//!
//! File-based tracing so log output never corrupts the TUI screen.
//! Records go to daily-rolling files under the app home's `logs/`
//! directory; `RUST_LOG` overrides the configured level.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Logging options assembled from CLI flags, config and environment
#[derive(Debug, Clone)]
pub struct LogConfig {
    debug: bool,
    level: String,
    dir: PathBuf,
}

impl LogConfig {
    pub fn new() -> Self {
        Self {
            debug: false,
            level: "info".to_string(),
            dir: crate::config::increport_home().join("logs"),
        }
    }

    pub fn with_debug_mode(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_log_dir(mut self, dir: PathBuf) -> Self {
        self.dir = dir;
        self
    }

    /// Directory the rolling appender writes into
    pub fn log_dir(&self) -> &PathBuf {
        &self.dir
    }

    fn default_filter(&self) -> String {
        if self.debug {
            "increport=debug".to_string()
        } else {
            format!("increport={}", self.level)
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the global subscriber. The returned guard must be held for
/// the life of the program or buffered records are lost on exit.
pub fn init_logging(config: LogConfig) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.dir)
        .with_context(|| format!("failed to create log directory {}", config.dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&config.dir, "increport.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}

/// Remove log files older than `keep_days`. Returns how many were removed.
pub fn cleanup_old_logs(dir: &Path, keep_days: u64) -> Result<usize> {
    let cutoff = SystemTime::now() - Duration::from_secs(keep_days * 24 * 60 * 60);
    let mut removed = 0;

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Ok(0),
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let is_log = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("increport.log"));
        if !is_log {
            continue;
        }
        if let Ok(meta) = entry.metadata()
            && let Ok(modified) = meta.modified()
            && modified < cutoff
            && std::fs::remove_file(&path).is_ok()
        {
            removed += 1;
        }
    }
    Ok(removed)
}
