//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_token_release_port;
mod http_workflow_metadata_lookup;
mod in_memory_token_store;
mod orchestrator_api;
mod postgres_token_store;
mod redis_token_store;

pub use http_token_release_port::HttpTokenReleasePort;
pub use http_workflow_metadata_lookup::HttpWorkflowMetadataLookup;
pub use in_memory_token_store::InMemoryTokenStore;
pub use orchestrator_api::OrchestratorApi;
pub use postgres_token_store::PostgresTokenStore;
pub use redis_token_store::RedisTokenStore;
