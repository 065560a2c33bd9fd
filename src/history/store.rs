use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    history::{
        cache::HistoryCache,
        types::{HistoryEntry, SortOrder},
    },
    service::{
        error::{ServiceError, ServiceErrorKind},
        ports::HistoryBackend,
    },
};

/// Remote-backed history mirror. Mutations commit to the cache only after
/// the server confirms them; a failed call leaves the cache exactly as it
/// was and surfaces a `HistoryOp` error for the view to display.
pub struct HistoryStore {
    backend: Arc<dyn HistoryBackend>,
    cache: Mutex<HistoryCache>,
}

impl HistoryStore {
    pub fn new(backend: Arc<dyn HistoryBackend>) -> Self {
        Self {
            backend,
            cache: Mutex::new(HistoryCache::new()),
        }
    }

    /// Replaces the entire cache with the server's current list. On failure
    /// the cache keeps its previous value; how the error is displayed is the
    /// caller's concern.
    pub async fn load(&self) -> Result<Vec<HistoryEntry>, ServiceError> {
        let entries = self.backend.list().await?;
        let mut cache = self.cache.lock().await;
        cache.replace_all(entries.clone());
        tracing::info!(target: "history", count = entries.len(), "history_loaded");
        Ok(entries)
    }

    pub async fn entries(&self) -> Vec<HistoryEntry> {
        self.cache.lock().await.entries().to_vec()
    }

    pub async fn len(&self) -> usize {
        self.cache.lock().await.len()
    }

    pub async fn sorted(&self, order: SortOrder) -> Vec<HistoryEntry> {
        self.cache.lock().await.sorted(order)
    }

    pub async fn filter(&self, query: &str) -> Vec<HistoryEntry> {
        self.cache.lock().await.filter(query)
    }

    /// Two-phase delete: the remote call first, the cache commit only after
    /// the server acknowledged success.
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if let Err(err) = self.backend.delete(id).await {
            tracing::warn!(target: "history", id, error = %err, "history_delete_failed");
            return Err(as_history_op(err));
        }

        let mut cache = self.cache.lock().await;
        if !cache.confirm_delete(id) {
            tracing::warn!(target: "history", id, "confirmed_delete_missing_entry");
        }
        tracing::info!(target: "history", id, "history_entry_deleted");
        Ok(())
    }

    /// Two-phase clear-all. Not even attempted when the cache is already
    /// empty.
    pub async fn clear(&self) -> Result<(), ServiceError> {
        if self.cache.lock().await.is_empty() {
            return Ok(());
        }

        if let Err(err) = self.backend.clear().await {
            tracing::warn!(target: "history", error = %err, "history_clear_failed");
            return Err(as_history_op(err));
        }

        self.cache.lock().await.confirm_clear();
        tracing::info!(target: "history", "history_cleared");
        Ok(())
    }
}

/// Delete/clear failures surface under one kind regardless of whether the
/// transport or the server rejected them; status and code are preserved.
fn as_history_op(err: ServiceError) -> ServiceError {
    ServiceError {
        kind: ServiceErrorKind::HistoryOp,
        ..err
    }
}
