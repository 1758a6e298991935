use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub submissions: SubmissionConfig,

    #[command(flatten)]
    pub page: PageConfig,

    #[command(flatten)]
    pub health: HealthConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "CONTACT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the public contact page
    #[arg(long, env = "CONTACT_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for the liveness and readiness probes
    #[arg(long, env = "CONTACT_MGMT_PORT", default_value_t = 3001)]
    pub mgmt_port: u16,

    /// How long to wait for in-flight work after a shutdown signal
    #[arg(long, env = "CONTACT_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,
}

#[derive(Clone, Debug, Args)]
pub struct SubmissionConfig {
    /// Append-only file that receives one line per accepted submission
    #[arg(long, env = "CONTACT_LOG_PATH", default_value = "/var/www/html/form-submissions.log")]
    pub log_path: PathBuf,

    /// Upper bound on the time spent waiting for the exclusive file lock
    #[arg(long, env = "CONTACT_LOCK_TIMEOUT_MS", default_value_t = 2000)]
    pub lock_timeout_ms: u64,

    /// Delay between attempts to take the file lock
    #[arg(long, env = "CONTACT_LOCK_RETRY_INTERVAL_MS", default_value_t = 10)]
    pub lock_retry_interval_ms: u64,
}

#[derive(Clone, Debug, Args)]
pub struct PageConfig {
    /// Document title of the contact page
    #[arg(long, env = "CONTACT_PAGE_TITLE", default_value = "Web Form")]
    pub page_title: String,

    /// Heading shown above the form
    #[arg(long, env = "CONTACT_PAGE_HEADING", default_value = "Contact Us")]
    pub page_heading: String,
}

#[derive(Clone, Debug, Args)]
pub struct HealthConfig {
    /// Timeout for the log store readiness check
    #[arg(long, env = "CONTACT_HEALTH_TIMEOUT_MS", default_value_t = 2000)]
    pub health_timeout_ms: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Diagnostic log output format
    #[arg(long, env = "CONTACT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OTLP collector endpoint; traces and metrics are only exported when set
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}
