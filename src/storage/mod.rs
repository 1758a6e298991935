use crate::domain::submission::Submission;
use crate::error::Result;
use async_trait::async_trait;

pub mod submission_log;

pub use submission_log::SubmissionLog;

/// Append-only sink for accepted submissions.
#[async_trait]
pub trait SubmissionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Appends one submission as a single complete line. Concurrent appends never interleave.
    ///
    /// # Errors
    /// Returns `AppError::LockTimeout` when exclusive access cannot be obtained in time, or
    /// `AppError::Storage` for I/O failures.
    async fn append(&self, submission: &Submission) -> Result<()>;

    /// Verifies the store can currently accept writes.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the store is not writable.
    async fn check(&self) -> Result<()>;
}
