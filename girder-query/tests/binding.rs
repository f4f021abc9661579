use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use girder_query::{CacheEntry, QueryBinding, QueryError, QueryExecutor, QueryKey};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Payload {
    value: String,
}

fn key(page: i64) -> QueryKey {
    QueryKey::new("list").arg("page", page)
}

/// Answers with the page number; calls for page 2 block until released.
struct GatedExecutor {
    release: Notify,
    calls: AtomicU32,
}

impl GatedExecutor {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            release: Notify::new(),
            calls: AtomicU32::new(0),
        })
    }
}

#[async_trait]
impl QueryExecutor for GatedExecutor {
    async fn execute(&self, key: &QueryKey) -> Result<Value, QueryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let page = key.get("page").map(|v| v.to_string()).unwrap_or_default();
        if page == "2" {
            self.release.notified().await;
        }
        Ok(json!({ "value": format!("page-{page}") }))
    }
}

/// Counts calls; each reply carries the call ordinal. The first call blocks
/// until released, later ones answer immediately.
struct SlowFirstExecutor {
    release: Notify,
    calls: AtomicU32,
}

impl SlowFirstExecutor {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            release: Notify::new(),
            calls: AtomicU32::new(0),
        })
    }
}

#[async_trait]
impl QueryExecutor for SlowFirstExecutor {
    async fn execute(&self, _key: &QueryKey) -> Result<Value, QueryError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call == 0 {
            self.release.notified().await;
        }
        Ok(json!({ "value": format!("call-{call}") }))
    }
}

struct FailingExecutor {
    calls: AtomicU32,
}

#[async_trait]
impl QueryExecutor for FailingExecutor {
    async fn execute(&self, _key: &QueryKey) -> Result<Value, QueryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(QueryError::service(500, "boom"))
    }
}

struct MalformedExecutor;

#[async_trait]
impl QueryExecutor for MalformedExecutor {
    async fn execute(&self, _key: &QueryKey) -> Result<Value, QueryError> {
        Ok(json!({ "unexpected": true }))
    }
}

/// Re-binds until the entry leaves `Pending`.
async fn settle(binding: &QueryBinding<Payload>, key: QueryKey) -> CacheEntry<Payload> {
    for _ in 0..100 {
        let entry = binding.bind(key.clone(), false);
        if !entry.is_pending() {
            return entry;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("binding never settled for {key}");
}

#[tokio::test]
async fn test_bind_issues_and_resolves() {
    let executor = GatedExecutor::new();
    let binding: QueryBinding<Payload> = QueryBinding::new(executor.clone());

    let first = binding.bind(key(1), false);
    assert!(first.is_pending());
    assert!(first.value().is_none());

    let entry = settle(&binding, key(1)).await;
    assert_eq!(entry.value().unwrap().value, "page-1");
    assert_eq!(executor.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_rebinding_same_key_issues_no_duplicate_request() {
    let executor = GatedExecutor::new();
    let binding: QueryBinding<Payload> = QueryBinding::new(executor.clone());

    settle(&binding, key(1)).await;
    for _ in 0..5 {
        binding.bind(key(1), false);
    }
    assert_eq!(executor.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_skip_issues_nothing_and_clears_nothing() {
    let executor = GatedExecutor::new();
    let binding: QueryBinding<Payload> = QueryBinding::new(executor.clone());

    // Skipped with no prior entry: pending placeholder, no network.
    let entry = binding.bind(key(1), true);
    assert!(entry.is_pending());
    assert!(entry.value().is_none());
    assert_eq!(executor.calls.load(Ordering::SeqCst), 0);

    // Resolve once, then skip again: last good data stays readable.
    settle(&binding, key(1)).await;
    let entry = binding.bind(key(1), true);
    assert!(entry.is_pending());
    assert_eq!(entry.value().unwrap().value, "page-1");
    assert_eq!(executor.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_key_change_carries_stale_value_until_commit() {
    let executor = GatedExecutor::new();
    let binding: QueryBinding<Payload> = QueryBinding::new(executor.clone());

    settle(&binding, key(1)).await;

    // Page 2 blocks: the binding shows pending with page 1's data visible.
    let entry = binding.bind(key(2), false);
    assert!(entry.is_pending());
    assert_eq!(entry.value().unwrap().value, "page-1");

    executor.release.notify_one();
    let entry = settle(&binding, key(2)).await;
    assert_eq!(entry.value().unwrap().value, "page-2");
}

#[tokio::test]
async fn test_late_reply_to_superseded_request_is_discarded() {
    let executor = SlowFirstExecutor::new();
    let binding: QueryBinding<Payload> = QueryBinding::new(executor.clone());

    // First request hangs.
    binding.bind(key(1), false);
    while executor.calls.load(Ordering::SeqCst) == 0 {
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    // Re-issue for the same key; the second call answers immediately.
    binding.refetch();
    let entry = settle(&binding, key(1)).await;
    assert_eq!(entry.value().unwrap().value, "call-1");

    // Now the first reply arrives, stamped with a stale version.
    executor.release.notify_one();
    tokio::time::sleep(Duration::from_millis(50)).await;
    let entry = binding.bind(key(1), false);
    assert_eq!(entry.value().unwrap().value, "call-1");
    assert!(entry.state().is_success());
}

#[tokio::test]
async fn test_error_is_surfaced_and_never_retried() {
    let executor = Arc::new(FailingExecutor {
        calls: AtomicU32::new(0),
    });
    let binding: QueryBinding<Payload> = QueryBinding::new(executor.clone());

    let entry = settle(&binding, key(1)).await;
    assert!(entry.state().is_error());
    assert_eq!(entry.error().unwrap().status_code(), Some(500));
    assert!(entry.value().is_none());

    // Re-binding the same key must not retry on its own.
    for _ in 0..5 {
        binding.bind(key(1), false);
    }
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(executor.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_undecodable_reply_is_a_decode_error() {
    let binding: QueryBinding<Payload> = QueryBinding::new(Arc::new(MalformedExecutor));

    let entry = settle(&binding, key(1)).await;
    let error = entry.error().expect("decode failure expected");
    assert!(matches!(error, QueryError::Decode { .. }));
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn test_dirty_flag_and_wakeup_on_commit() {
    let executor = GatedExecutor::new();
    let binding: QueryBinding<Payload> = QueryBinding::new(executor);

    binding.clear_dirty();
    binding.bind(key(1), false);
    assert!(binding.is_dirty());

    binding.clear_dirty();
    settle(&binding, key(1)).await;
    assert!(binding.is_dirty());
}
