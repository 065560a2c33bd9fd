use async_trait::async_trait;
use serde_json::Value;

use crate::{
    history::types::HistoryEntry,
    service::{
        error::ServiceError,
        types::{GenerateRequest, UserState},
    },
};

/// Remote curriculum-generation endpoint. Returns the raw payload exactly as
/// the service produced it; normalization happens on the caller's side.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<Value, ServiceError>;
}

/// Remote history store, keyed by opaque entry identifiers.
#[async_trait]
pub trait HistoryBackend: Send + Sync {
    async fn list(&self) -> Result<Vec<HistoryEntry>, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
    async fn clear(&self) -> Result<(), ServiceError>;
}

/// Authentication/quota subsystem, surfaced read-only.
#[async_trait]
pub trait AccountBackend: Send + Sync {
    async fn user_state(&self) -> Result<UserState, ServiceError>;
}
