use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use skillplan::{
    history::{store::HistoryStore, types::HistoryEntry},
    service::{
        error::{ServiceError, ServiceErrorKind, server_error, transport_error},
        ports::HistoryBackend,
    },
};

use crate::entry;

/// Scripted history transport: list responses are consumed in order, and
/// delete/clear answer with a fixed result while counting calls.
#[derive(Default)]
struct ScriptedHistoryBackend {
    list_results: Mutex<Vec<Result<Vec<HistoryEntry>, ServiceError>>>,
    delete_result: Option<ServiceError>,
    clear_result: Option<ServiceError>,
    delete_calls: AtomicUsize,
    clear_calls: AtomicUsize,
}

#[async_trait]
impl HistoryBackend for ScriptedHistoryBackend {
    async fn list(&self) -> Result<Vec<HistoryEntry>, ServiceError> {
        self.list_results
            .lock()
            .await
            .pop()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn delete(&self, _id: &str) -> Result<(), ServiceError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        match &self.delete_result {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn clear(&self) -> Result<(), ServiceError> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        match &self.clear_result {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn three_entries() -> Vec<HistoryEntry> {
    vec![
        entry("4", "Rust", "2026-01-02 10:00:00"),
        entry("5", "Go", "2026-03-01 08:30:00"),
        entry("6", "SQL", "2025-12-24 23:59:59"),
    ]
}

#[tokio::test]
async fn given_a_successful_load_when_applied_then_cache_is_fully_replaced() {
    let backend = Arc::new(ScriptedHistoryBackend {
        list_results: Mutex::new(vec![Ok(three_entries())]),
        ..Default::default()
    });
    let store = HistoryStore::new(backend);

    let loaded = store.load().await.expect("load should succeed");
    assert_eq!(loaded.len(), 3);
    assert_eq!(store.len().await, 3);
}

#[tokio::test]
async fn given_a_failing_load_when_applied_then_previous_cache_survives() {
    let backend = Arc::new(ScriptedHistoryBackend {
        // Consumed back to front: first load succeeds, second fails.
        list_results: Mutex::new(vec![
            Err(transport_error("connection refused")),
            Ok(three_entries()),
        ]),
        ..Default::default()
    });
    let store = HistoryStore::new(backend);

    store.load().await.expect("first load should succeed");
    let err = store.load().await.expect_err("second load should fail");
    assert_eq!(err.kind, ServiceErrorKind::Transport);
    assert_eq!(store.len().await, 3, "failed load must not touch the cache");
}

#[tokio::test]
async fn given_a_confirmed_delete_when_applied_then_entry_leaves_the_cache() {
    let backend = Arc::new(ScriptedHistoryBackend {
        list_results: Mutex::new(vec![Ok(three_entries())]),
        ..Default::default()
    });
    let store = HistoryStore::new(Arc::clone(&backend) as Arc<dyn HistoryBackend>);

    store.load().await.expect("load should succeed");
    store.delete("5").await.expect("delete should succeed");

    let ids: Vec<String> = store.entries().await.into_iter().map(|e| e.id).collect();
    assert_eq!(ids, vec!["4", "6"]);
    assert_eq!(backend.delete_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_a_failing_delete_when_applied_then_cache_is_byte_identical() {
    let backend = Arc::new(ScriptedHistoryBackend {
        list_results: Mutex::new(vec![Ok(three_entries())]),
        delete_result: Some(server_error("boom").with_http_status(500)),
        ..Default::default()
    });
    let store = HistoryStore::new(backend);

    store.load().await.expect("load should succeed");
    let before = serde_json::to_vec(&store.entries().await).expect("entries serialize");

    let err = store.delete("5").await.expect_err("delete should fail");
    assert_eq!(err.kind, ServiceErrorKind::HistoryOp);
    assert_eq!(err.http_status, Some(500));

    let after = serde_json::to_vec(&store.entries().await).expect("entries serialize");
    assert_eq!(before, after, "failed delete must leave the cache untouched");
}

#[tokio::test]
async fn given_an_empty_cache_when_cleared_then_no_remote_call_is_made() {
    let backend = Arc::new(ScriptedHistoryBackend::default());
    let store = HistoryStore::new(Arc::clone(&backend) as Arc<dyn HistoryBackend>);

    store.clear().await.expect("empty clear is a no-op");
    assert_eq!(backend.clear_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_a_failing_clear_when_applied_then_cache_is_unchanged() {
    let backend = Arc::new(ScriptedHistoryBackend {
        list_results: Mutex::new(vec![Ok(three_entries())]),
        clear_result: Some(transport_error("connection reset")),
        ..Default::default()
    });
    let store = HistoryStore::new(Arc::clone(&backend) as Arc<dyn HistoryBackend>);

    store.load().await.expect("load should succeed");
    let err = store.clear().await.expect_err("clear should fail");
    assert_eq!(err.kind, ServiceErrorKind::HistoryOp);
    assert_eq!(store.len().await, 3);
    assert_eq!(backend.clear_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_a_confirmed_clear_when_applied_then_cache_empties() {
    let backend = Arc::new(ScriptedHistoryBackend {
        list_results: Mutex::new(vec![Ok(three_entries())]),
        ..Default::default()
    });
    let store = HistoryStore::new(backend);

    store.load().await.expect("load should succeed");
    store.clear().await.expect("clear should succeed");
    assert_eq!(store.len().await, 0);
}
