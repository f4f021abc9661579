//! Query binding: couples a query key to its cached entry and drives the
//! request lifecycle.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use tokio::sync::Notify;

use crate::cache::{CacheEntry, QueryCache};
use crate::error::QueryError;
use crate::executor::QueryExecutor;
use crate::key::QueryKey;

/// Binds a [`QueryKey`] to its cached result and owns the async lifecycle.
///
/// The binding is pull-based: callers invoke [`bind`](Self::bind) whenever
/// the key or skip flag may have changed (and after any wakeup) and render
/// from the returned [`CacheEntry`] snapshot. There is no observer graph;
/// resolved requests flip a dirty flag and fire a wakeup so the owning event
/// loop knows to recompute.
///
/// Cheap to clone; clones share the cache, executor and change flag.
///
/// # Example
///
/// ```ignore
/// let binding: QueryBinding<ListResult<Investor>> = QueryBinding::new(executor);
///
/// // Event loop turn: re-evaluate, render from the snapshot.
/// let entry = binding.bind(ListArgs::default().key("investors"), false);
/// match entry.state() {
///     QueryState::Pending => render_loading(entry.value()),
///     QueryState::Success(list) => render_rows(list),
///     QueryState::Error(e) => render_failure(e),
/// }
/// ```
pub struct QueryBinding<T> {
    inner: Arc<BindingInner<T>>,
}

struct BindingInner<T> {
    cache: QueryCache<T>,
    executor: Arc<dyn QueryExecutor>,
    bound: Mutex<Option<QueryKey>>,
    dirty: AtomicBool,
    notify: Notify,
}

impl<T> QueryBinding<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Creates a binding with its own empty cache.
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            inner: Arc::new(BindingInner {
                cache: QueryCache::new(),
                executor,
                bound: Mutex::new(None),
                dirty: AtomicBool::new(false),
                notify: Notify::new(),
            }),
        }
    }

    /// Re-evaluates the binding against `key` and returns a snapshot of the
    /// cached entry.
    ///
    /// - `skip == true`: no request is issued and nothing is cleared; the
    ///   snapshot reads as `Pending` while still serving any prior value.
    /// - Key changed (or first bind) while not skipped: a new request is
    ///   issued under a bumped version. The previous key's last good value
    ///   seeds the new entry's stale slot so dependent views keep showing
    ///   last-known-good data while the request resolves.
    /// - Same key re-bound: no duplicate request; the current entry is
    ///   returned as-is. Errors are never retried here, see
    ///   [`refetch`](Self::refetch).
    ///
    /// Must be called within a tokio runtime context: resolution runs on a
    /// spawned task.
    pub fn bind(&self, key: QueryKey, skip: bool) -> CacheEntry<T> {
        if skip {
            log::debug!("binding skipped for {key}");
            // The bound key is left alone: last good data stays visible and
            // carry-over still works when skip flips back off.
            let bound = self.lock_bound().clone();
            return bound
                .as_ref()
                .and_then(|k| self.inner.cache.entry(k))
                .or_else(|| self.inner.cache.entry(&key))
                .unwrap_or_default()
                .into_skipped();
        }

        // Outer None = same key, nothing to issue. Outer Some = key changed,
        // inner value is the previous entry's last good value to carry over.
        let changed = {
            let mut bound = self.lock_bound();
            if bound.as_ref() == Some(&key) {
                None
            } else {
                let previous = bound.replace(key.clone());
                Some(previous.and_then(|prev| {
                    self.inner
                        .cache
                        .entry(&prev)
                        .and_then(|e| e.value().cloned())
                }))
            }
        };

        if let Some(carry) = changed {
            let version = self.inner.cache.begin(&key);
            if let Some(value) = carry {
                self.inner.cache.seed_stale(&key, value);
            }
            self.spawn_fetch(key.clone(), version);
            self.mark_changed();
        }

        self.inner.cache.entry(&key).unwrap_or_default()
    }

    /// Re-issues the request for the currently bound key.
    ///
    /// This is the hook for caller-owned retry UI after an `Error` entry;
    /// the binding itself never retries.
    pub fn refetch(&self) {
        let key = self.lock_bound().clone();
        if let Some(key) = key {
            let version = self.inner.cache.begin(&key);
            self.spawn_fetch(key, version);
            self.mark_changed();
        }
    }

    fn spawn_fetch(&self, key: QueryKey, version: u64) {
        log::debug!("issuing {key} (version {version})");
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let result = match inner.executor.execute(&key).await {
                Ok(raw) => serde_json::from_value::<T>(raw)
                    .map_err(|e| QueryError::decode(e.to_string())),
                Err(e) => Err(e),
            };
            if inner.cache.commit(&key, version, result) {
                inner.dirty.store(true, Ordering::SeqCst);
                inner.notify.notify_one();
            }
        });
    }

    fn mark_changed(&self) {
        self.inner.dirty.store(true, Ordering::SeqCst);
        self.inner.notify.notify_one();
    }
}

impl<T> QueryBinding<T> {
    /// Returns the underlying cache.
    pub fn cache(&self) -> &QueryCache<T> {
        &self.inner.cache
    }

    /// Returns the currently bound key, if any.
    pub fn current_key(&self) -> Option<QueryKey> {
        self.lock_bound().clone()
    }

    /// Check if the binding has changed since the last
    /// [`clear_dirty`](Self::clear_dirty).
    pub fn is_dirty(&self) -> bool {
        self.inner.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.inner.dirty.store(false, Ordering::SeqCst);
    }

    /// Waits until a request resolves or the binding otherwise changes.
    pub async fn changed(&self) {
        self.inner.notify.notified().await;
    }

    fn lock_bound(&self) -> std::sync::MutexGuard<'_, Option<QueryKey>> {
        self.inner
            .bound
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T> Clone for QueryBinding<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for QueryBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBinding")
            .field("bound", &*self.lock_bound())
            .field("dirty", &self.is_dirty())
            .finish_non_exhaustive()
    }
}
