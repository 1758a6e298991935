use crate::config::HealthConfig;
use crate::storage::SubmissionStore;
use opentelemetry::{KeyValue, global, metrics::Gauge};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

#[derive(Clone, Debug)]
pub struct Metrics {
    pub status: Gauge<i64>,
}

impl Metrics {
    #[must_use]
    pub(crate) fn new() -> Self {
        let meter = global::meter("contact-form");
        Self {
            status: meter
                .i64_gauge("contact_health_status")
                .with_description("Status of health checks (1 for ok, 0 for error)")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct HealthService {
    store: Arc<dyn SubmissionStore>,
    config: HealthConfig,
    metrics: Metrics,
}

impl HealthService {
    #[must_use]
    pub fn new(store: Arc<dyn SubmissionStore>, config: HealthConfig) -> Self {
        Self { store, config, metrics: Metrics::new() }
    }

    /// Checks that the submission log can be opened for appending.
    ///
    /// # Errors
    /// Returns a string describing the failure if the log is not writable in time.
    pub async fn check_log_store(&self) -> Result<(), String> {
        let check_timeout = Duration::from_millis(self.config.health_timeout_ms);

        match timeout(check_timeout, self.store.check()).await {
            Ok(Ok(())) => {
                self.metrics.status.record(1, &[KeyValue::new("component", "log_store")]);
                Ok(())
            }
            Ok(Err(e)) => {
                self.metrics.status.record(0, &[KeyValue::new("component", "log_store")]);
                Err(format!("Log store is not writable: {e}"))
            }
            Err(_) => {
                self.metrics.status.record(0, &[KeyValue::new("component", "log_store")]);
                Err("Log store check timed out".to_string())
            }
        }
    }
}
