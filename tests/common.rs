#![allow(dead_code)]
use contact_form::api::{self, MgmtState};
use contact_form::config::{
    Config, HealthConfig, LogFormat, PageConfig, ServerConfig, SubmissionConfig, TelemetryConfig,
};
use contact_form::storage::SubmissionStore;
use contact_form::AppBuilder;
use std::path::PathBuf;
use std::sync::{Arc, Once};
use tokio::net::TcpListener;
use tokio::sync::watch;
use uuid::Uuid;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("contact_form=debug".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().init();
    });
}

pub fn temp_log_path() -> PathBuf {
    std::env::temp_dir().join(format!("contact-form-it-{}.log", Uuid::new_v4()))
}

pub fn get_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            mgmt_port: 0,
            shutdown_timeout_secs: 1,
        },
        submissions: SubmissionConfig {
            log_path: temp_log_path(),
            lock_timeout_ms: 5000,
            lock_retry_interval_ms: 5,
        },
        page: PageConfig { page_title: "Web Form".to_string(), page_heading: "Contact Us".to_string() },
        health: HealthConfig { health_timeout_ms: 2000 },
        telemetry: TelemetryConfig { log_format: LogFormat::Text, otlp_endpoint: None },
    }
}

pub struct TestApp {
    pub server_url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
    pub config: Config,
    shutdown_tx: watch::Sender<bool>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_config(get_test_config()).await
    }

    pub async fn spawn_with_config(config: Config) -> Self {
        Self::start(config, None).await
    }

    pub async fn spawn_with_store(store: Arc<dyn SubmissionStore>) -> Self {
        Self::start(get_test_config(), Some(store)).await
    }

    async fn start(config: Config, store: Option<Arc<dyn SubmissionStore>>) -> Self {
        setup_tracing();

        let mut builder = AppBuilder::new(config.clone());
        if let Some(store) = store {
            builder = builder.with_store(store);
        }
        let app = builder.build().expect("Failed to build app");

        let app_router = api::app_router(app.services);
        let mgmt_router = api::mgmt_router(MgmtState { health_service: app.health_service });

        let api_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mgmt_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server_url = format!("http://{}", api_listener.local_addr().unwrap());
        let mgmt_url = format!("http://{}", mgmt_listener.local_addr().unwrap());

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let mut api_rx = shutdown_rx.clone();
        tokio::spawn(async move {
            axum::serve(api_listener, app_router)
                .with_graceful_shutdown(async move {
                    let _ = api_rx.wait_for(|&s| s).await;
                })
                .await
                .unwrap();
        });

        let mut mgmt_rx = shutdown_rx;
        tokio::spawn(async move {
            axum::serve(mgmt_listener, mgmt_router)
                .with_graceful_shutdown(async move {
                    let _ = mgmt_rx.wait_for(|&s| s).await;
                })
                .await
                .unwrap();
        });

        let client = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none()).build().unwrap();

        Self { server_url, mgmt_url, client, config, shutdown_tx }
    }

    pub async fn submit(&self, fields: &[(&str, &str)]) -> reqwest::Response {
        self.client.post(format!("{}/submit", self.server_url)).form(fields).send().await.unwrap()
    }

    pub fn log_lines(&self) -> Vec<String> {
        match std::fs::read_to_string(&self.config.submissions.log_path) {
            Ok(contents) => contents.lines().map(str::to_string).collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => panic!("Failed to read submission log: {e}"),
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
        let _ = std::fs::remove_file(&self.config.submissions.log_path);
    }
}

pub fn location(resp: &reqwest::Response) -> &str {
    resp.headers().get(reqwest::header::LOCATION).expect("Missing Location header").to_str().unwrap()
}
