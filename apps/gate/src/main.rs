//! Maintenance gate process entry point.
//!
//! Reads one invocation document from stdin, decides whether to park or
//! release its continuation token, and writes the outcome to stdout.

#![forbid(unsafe_code)]

mod gate_config;

use std::sync::Arc;
use std::time::Duration;

use maintgate_application::{MaintenanceGateService, TokenStore};
use maintgate_core::{AppError, AppResult};
use maintgate_infrastructure::{
    HttpTokenReleasePort, HttpWorkflowMetadataLookup, InMemoryTokenStore, OrchestratorApi,
    PostgresTokenStore, RedisTokenStore,
};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tokio::io::AsyncReadExt;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::gate_config::{GateAppConfig, TokenStoreBackend};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = GateAppConfig::load()?;
    let service = build_gate_service(&config).await?;
    let event = read_event().await?;

    let outcome = match service.handle_event(event).await {
        Ok(outcome) => outcome,
        Err(error) => {
            error!(error = %error, "maintenance gate invocation failed");
            return Err(error);
        }
    };

    info!(status = outcome.status(), "maintenance gate invocation completed");

    let output = serde_json::to_string(&outcome)
        .map_err(|error| AppError::Internal(format!("failed to encode gate outcome: {error}")))?;
    println!("{output}");

    Ok(())
}

async fn build_gate_service(config: &GateAppConfig) -> AppResult<MaintenanceGateService> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.orchestrator_timeout_seconds))
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;
    let api = OrchestratorApi::new(
        http_client,
        config.orchestrator_api_base_url.as_str(),
        config.orchestrator_shared_secret.clone(),
    )?;

    let token_store = build_token_store(config).await?;

    info!(
        bucket = %config.gate.bucket(),
        prefix = %config.gate.prefix(),
        token_store_backend = config.token_store_backend.as_str(),
        orchestrator_api_base_url = %config.orchestrator_api_base_url,
        "maintenance gate configured"
    );

    Ok(MaintenanceGateService::new(
        Arc::new(config.gate.clone()),
        token_store,
        Arc::new(HttpWorkflowMetadataLookup::new(api.clone())),
        Arc::new(HttpTokenReleasePort::new(api)),
    ))
}

async fn build_token_store(config: &GateAppConfig) -> AppResult<Arc<dyn TokenStore>> {
    match config.token_store_backend {
        TokenStoreBackend::Redis => {
            let redis_url = config.redis_url.as_deref().ok_or_else(|| {
                AppError::Validation("REDIS_URL is required for the redis backend".to_owned())
            })?;
            let client = redis::Client::open(redis_url)
                .map_err(|error| AppError::Validation(format!("invalid REDIS_URL: {error}")))?;

            Ok(Arc::new(RedisTokenStore::new(
                client,
                config.redis_key_prefix.clone(),
            )))
        }
        TokenStoreBackend::Postgres => {
            let database_url = config.database_url.as_deref().ok_or_else(|| {
                AppError::Validation("DATABASE_URL is required for the postgres backend".to_owned())
            })?;
            let pool = PgPoolOptions::new()
                .max_connections(2)
                .connect(database_url)
                .await
                .map_err(|error| {
                    AppError::Internal(format!("failed to connect to database: {error}"))
                })?;

            sqlx::migrate!("../../crates/infrastructure/migrations")
                .run(&pool)
                .await
                .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

            Ok(Arc::new(PostgresTokenStore::new(pool)))
        }
        TokenStoreBackend::Memory => {
            warn!("memory token store selected, parked tokens will not outlive this process");
            Ok(Arc::new(InMemoryTokenStore::new()))
        }
    }
}

async fn read_event() -> AppResult<Value> {
    let mut input = Vec::new();
    tokio::io::stdin()
        .read_to_end(&mut input)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read invocation: {error}")))?;

    serde_json::from_slice(input.as_slice()).map_err(|error| {
        AppError::Validation(format!("invocation is not a valid JSON document: {error}"))
    })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
