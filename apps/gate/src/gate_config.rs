use std::env;

use maintgate_application::MaintenanceGateConfig;
use maintgate_core::{AppError, AppResult};

/// Backend used to persist parked task tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStoreBackend {
    /// Redis keys under a configurable prefix.
    Redis,
    /// The `parked_task_tokens` PostgreSQL table.
    Postgres,
    /// Process memory; parked tokens are lost when the process exits.
    Memory,
}

impl TokenStoreBackend {
    fn parse(value: &str) -> AppResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(AppError::Validation(format!(
                "TOKEN_STORE_BACKEND must be one of redis, postgres, memory (got '{other}')"
            ))),
        }
    }

    /// Returns the stable backend name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Redis => "redis",
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        }
    }
}

/// Process-wide configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct GateAppConfig {
    pub gate: MaintenanceGateConfig,
    pub token_store_backend: TokenStoreBackend,
    pub redis_url: Option<String>,
    pub redis_key_prefix: String,
    pub database_url: Option<String>,
    pub orchestrator_api_base_url: String,
    pub orchestrator_shared_secret: Option<String>,
    pub orchestrator_timeout_seconds: u64,
}

impl GateAppConfig {
    /// Loads configuration from process environment variables.
    pub fn load() -> AppResult<Self> {
        Self::from_source(|name| env::var(name).ok())
    }

    fn from_source(source: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let lookup = |name: &str| {
            source(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let required = |name: &str| {
            lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))
        };

        let gate = MaintenanceGateConfig::new(required("Bucket")?, required("Prefix")?)?;
        let token_store_backend = match lookup("TOKEN_STORE_BACKEND") {
            Some(value) => TokenStoreBackend::parse(value.as_str())?,
            None => TokenStoreBackend::Redis,
        };

        let redis_url = lookup("REDIS_URL");
        let database_url = lookup("DATABASE_URL");
        match token_store_backend {
            TokenStoreBackend::Redis if redis_url.is_none() => {
                return Err(AppError::Validation(
                    "REDIS_URL is required when TOKEN_STORE_BACKEND=redis".to_owned(),
                ));
            }
            TokenStoreBackend::Postgres if database_url.is_none() => {
                return Err(AppError::Validation(
                    "DATABASE_URL is required when TOKEN_STORE_BACKEND=postgres".to_owned(),
                ));
            }
            _ => {}
        }

        let orchestrator_timeout_seconds = match lookup("ORCHESTRATOR_HTTP_TIMEOUT_SECONDS") {
            Some(value) => value.parse::<u64>().map_err(|error| {
                AppError::Validation(format!(
                    "invalid ORCHESTRATOR_HTTP_TIMEOUT_SECONDS value '{value}': {error}"
                ))
            })?,
            None => 15,
        };

        if orchestrator_timeout_seconds == 0 {
            return Err(AppError::Validation(
                "ORCHESTRATOR_HTTP_TIMEOUT_SECONDS must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            gate,
            token_store_backend,
            redis_url,
            redis_key_prefix: lookup("TOKEN_STORE_REDIS_KEY_PREFIX")
                .unwrap_or_else(|| "maintenance_gate".to_owned()),
            database_url,
            orchestrator_api_base_url: required("ORCHESTRATOR_API_BASE_URL")?,
            orchestrator_shared_secret: lookup("ORCHESTRATOR_SHARED_SECRET"),
            orchestrator_timeout_seconds,
        })
    }
}
