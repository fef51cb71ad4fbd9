// Connection status and message count from the gateway's dated log file

mod classifier;
mod tail;

pub use classifier::{ConnectionClassifier, MarkerRules};
pub use tail::{count_occurrences, read_tail};

use crate::config::{LogsConfig, MAX_TAIL_LINES};
use crate::models::ConnectionStatus;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::time::{Duration, timeout};
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub enum LogReadError {
    #[error("log read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("log read timed out after {0:?}")]
    Timeout(Duration),
    #[error("log read task join: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl LogReadError {
    /// Today's log simply has not been created yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LogReadError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

pub struct LogRepo {
    dir: PathBuf,
    prefix: String,
    tail_lines: usize,
    read_timeout: Duration,
    message_marker: String,
    classifier: Arc<dyn ConnectionClassifier>,
}

impl LogRepo {
    pub fn new(config: &LogsConfig) -> Self {
        Self::with_classifier(config, Arc::new(MarkerRules::from_config(config)))
    }

    pub fn with_classifier(config: &LogsConfig, classifier: Arc<dyn ConnectionClassifier>) -> Self {
        Self {
            dir: PathBuf::from(&config.dir),
            prefix: config.prefix.clone(),
            tail_lines: config.tail_lines.clamp(1, MAX_TAIL_LINES),
            read_timeout: Duration::from_millis(config.read_timeout_ms),
            message_marker: config.message_marker.clone(),
            classifier,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<prefix>-YYYY-MM-DD.log` for the given day.
    pub fn log_path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{}-{}.log", self.prefix, date.format("%Y-%m-%d")))
    }

    /// Path of today's log (local calendar date).
    pub fn today_log_path(&self) -> PathBuf {
        self.log_path_for(Local::now().date_naive())
    }

    pub async fn connection_status(&self) -> ConnectionStatus {
        self.connection_status_on(Local::now().date_naive()).await
    }

    /// `Unknown` when the log is missing or cannot be read in time; otherwise the
    /// classifier's verdict on the last `tail_lines` lines.
    #[instrument(skip(self), fields(repo = "log", operation = "connection_status"))]
    pub async fn connection_status_on(&self, date: NaiveDate) -> ConnectionStatus {
        let path = self.log_path_for(date);
        let max_lines = self.tail_lines;
        match self.run_blocking(move || read_tail(&path, max_lines)).await {
            Ok(tail) => self.classifier.classify(&tail),
            Err(e) if e.is_not_found() => {
                tracing::debug!("log file absent");
                ConnectionStatus::Unknown
            }
            Err(e) => {
                tracing::warn!(error = %e, "connection status unavailable");
                ConnectionStatus::Unknown
            }
        }
    }

    pub async fn message_count(&self) -> u64 {
        self.message_count_on(Local::now().date_naive()).await
    }

    /// Occurrences of the message marker across the whole day's log; 0 on any failure.
    #[instrument(skip(self), fields(repo = "log", operation = "message_count"))]
    pub async fn message_count_on(&self, date: NaiveDate) -> u64 {
        let path = self.log_path_for(date);
        let marker = self.message_marker.clone();
        match self
            .run_blocking(move || count_occurrences(&path, &marker))
            .await
        {
            Ok(count) => count,
            Err(e) if e.is_not_found() => 0,
            Err(e) => {
                tracing::warn!(error = %e, "message count unavailable");
                0
            }
        }
    }

    /// Runs a file read on the blocking pool, bounded by the configured read timeout.
    async fn run_blocking<T, F>(&self, f: F) -> Result<T, LogReadError>
    where
        F: FnOnce() -> std::io::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        match timeout(self.read_timeout, tokio::task::spawn_blocking(f)).await {
            Ok(joined) => Ok(joined??),
            Err(_) => Err(LogReadError::Timeout(self.read_timeout)),
        }
    }
}
