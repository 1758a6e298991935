use crate::config::SubmissionConfig;
use crate::domain::submission::Submission;
use crate::error::{AppError, Result};
use crate::storage::SubmissionStore;
use async_trait::async_trait;
use backon::{BlockingRetryable, ConstantBuilder};
use std::fs::{File, OpenOptions, TryLockError};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Flat text file holding one line per submission.
///
/// Every append opens the file in append mode, takes an exclusive advisory lock, writes the
/// whole line with a single call and releases the lock before returning.
#[derive(Debug, Clone)]
pub struct SubmissionLog {
    path: PathBuf,
    lock_timeout: Duration,
    retry_interval: Duration,
}

impl SubmissionLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, lock_timeout: Duration, retry_interval: Duration) -> Self {
        Self { path: path.into(), lock_timeout, retry_interval }
    }

    #[must_use]
    pub fn from_config(config: &SubmissionConfig) -> Self {
        Self::new(
            config.log_path.clone(),
            Duration::from_millis(config.lock_timeout_ms),
            Duration::from_millis(config.lock_retry_interval_ms),
        )
    }

    fn append_line(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        self.acquire_lock(&file)?;

        let written = file.write_all(line.as_bytes()).and_then(|()| file.flush());
        let unlocked = file.unlock();
        written?;
        unlocked?;
        Ok(())
    }

    fn acquire_lock(&self, file: &File) -> Result<()> {
        let interval_ms = self.retry_interval.as_millis().max(1);
        let max_times = usize::try_from(self.lock_timeout.as_millis() / interval_ms).unwrap_or(usize::MAX);
        let strategy = ConstantBuilder::default().with_delay(self.retry_interval).with_max_times(max_times);

        let result = (|| file.try_lock())
            .retry(strategy)
            .sleep(std::thread::sleep)
            .when(|e| matches!(e, TryLockError::WouldBlock))
            .notify(|_, delay| {
                tracing::trace!(delay_ms = %delay.as_millis(), "Log file is locked, waiting");
            })
            .call();

        match result {
            Ok(()) => Ok(()),
            Err(TryLockError::WouldBlock) => Err(AppError::LockTimeout),
            Err(TryLockError::Error(e)) => Err(AppError::Storage(e)),
        }
    }
}

#[async_trait]
impl SubmissionStore for SubmissionLog {
    #[tracing::instrument(level = "debug", skip(self, submission), fields(path = %self.path.display()), err(level = "warn"))]
    async fn append(&self, submission: &Submission) -> Result<()> {
        let line = submission.to_log_line()?;
        let log = self.clone();

        tokio::task::spawn_blocking(move || log.append_line(&line)).await.map_err(|e| {
            tracing::error!(error = %e, "Log append task failed");
            AppError::Internal
        })?
    }

    async fn check(&self) -> Result<()> {
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || OpenOptions::new().create(true).append(true).open(path).map(drop))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Log check task failed");
                AppError::Internal
            })?
            .map_err(AppError::Storage)
    }
}
