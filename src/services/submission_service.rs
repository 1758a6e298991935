use crate::domain::notice::ErrorCode;
use crate::domain::submission::{Submission, SubmissionFields, ValidationError, local_now};
use crate::error::AppError;
use crate::storage::SubmissionStore;
use opentelemetry::{KeyValue, global, metrics::Counter};
use std::sync::Arc;
use thiserror::Error;

#[derive(Clone, Debug)]
struct SubmissionMetrics {
    submissions_total: Counter<u64>,
}

impl SubmissionMetrics {
    fn new() -> Self {
        let meter = global::meter("contact-form");
        Self {
            submissions_total: meter
                .u64_counter("contact_submissions_total")
                .with_description("Total number of contact form submissions by outcome")
                .build(),
        }
    }

    fn record(&self, outcome: &'static str) {
        self.submissions_total.add(1, &[KeyValue::new("outcome", outcome)]);
    }
}

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Failed to persist submission: {0}")]
    Storage(#[from] AppError),
}

impl SubmissionError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Invalid(ValidationError::MissingField) => ErrorCode::MissingField,
            Self::Invalid(ValidationError::InvalidEmail) => ErrorCode::InvalidEmail,
            Self::Storage(_) => ErrorCode::StorageFailure,
        }
    }

    const fn outcome(&self) -> &'static str {
        match self {
            Self::Invalid(ValidationError::MissingField) => "missing_field",
            Self::Invalid(ValidationError::InvalidEmail) => "invalid_email",
            Self::Storage(_) => "storage_error",
        }
    }
}

#[derive(Clone, Debug)]
pub struct SubmissionService {
    store: Arc<dyn SubmissionStore>,
    metrics: SubmissionMetrics,
}

impl SubmissionService {
    #[must_use]
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self { store, metrics: SubmissionMetrics::new() }
    }

    /// Validates the raw fields and, if they pass, appends one record to the store.
    /// Nothing is written when validation fails.
    ///
    /// # Errors
    /// Returns `SubmissionError::Invalid` for rejected input and `SubmissionError::Storage`
    /// when the record could not be persisted.
    #[tracing::instrument(skip(self, fields))]
    pub async fn submit(&self, fields: SubmissionFields) -> Result<(), SubmissionError> {
        let result = self.persist(&fields).await;

        match &result {
            Ok(()) => {
                self.metrics.record("success");
                tracing::info!("Submission recorded");
            }
            Err(e @ SubmissionError::Storage(_)) => {
                self.metrics.record(e.outcome());
                tracing::error!(error = %e, "Submission could not be recorded");
            }
            Err(e) => self.metrics.record(e.outcome()),
        }

        result
    }

    async fn persist(&self, fields: &SubmissionFields) -> Result<(), SubmissionError> {
        let submission = Submission::parse(fields, local_now())?;
        self.store.append(&submission).await?;
        Ok(())
    }
}
