//! Version-stamped cache for query results.
//!
//! Each distinct [`QueryKey`] owns one [`CacheEntry`]. Entries are
//! overwritten in place when a newer result commits and are never evicted;
//! the key space in this domain is a handful of list/detail signatures, so
//! the cache is deliberately unbounded.

use dashmap::DashMap;

use crate::error::QueryError;
use crate::key::QueryKey;

/// The lifecycle state of one cached query result.
#[derive(Debug, Clone)]
pub enum QueryState<T> {
    /// No committed data yet. A request may be in flight, or the binding is
    /// skipped. Not an error.
    Pending,
    /// The service answered with a decoded value. A result with zero items
    /// is still `Success`; empty results are a valid terminal state.
    Success(T),
    /// The service or transport failed. Never retried by this layer.
    Error(QueryError),
}

// Manual impls: the derive would demand `T: Default`, but `Pending` and an
// empty entry exist for every payload type.
impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self::Pending
    }
}

impl<T> QueryState<T> {
    /// Check if no result has been committed.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Check if a result has been committed.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Check if the query failed.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Get a reference to the committed value.
    pub fn as_success(&self) -> Option<&T> {
        match self {
            Self::Success(v) => Some(v),
            _ => None,
        }
    }

    /// Get the error if present.
    pub fn as_error(&self) -> Option<&QueryError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Map the committed value.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> QueryState<U> {
        match self {
            Self::Pending => QueryState::Pending,
            Self::Success(v) => QueryState::Success(f(v)),
            Self::Error(e) => QueryState::Error(e),
        }
    }
}

/// One cached result with its request version and stale-display value.
///
/// `version` increments each time a new request is issued for the entry's
/// key; a response only commits if its version still matches, which is what
/// discards replies to superseded requests.
///
/// `last_success` retains the most recent committed value across later
/// `Pending`/`Error` transitions, so callers can keep showing last-known-good
/// data while a newer request is in flight ("stale-while-revalidate").
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    version: u64,
    state: QueryState<T>,
    last_success: Option<T>,
}

impl<T> Default for CacheEntry<T> {
    fn default() -> Self {
        Self {
            version: 0,
            state: QueryState::Pending,
            last_success: None,
        }
    }
}

impl<T> CacheEntry<T> {
    /// Returns the current request version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> &QueryState<T> {
        &self.state
    }

    /// Returns the error if the entry is in the error state.
    pub fn error(&self) -> Option<&QueryError> {
        self.state.as_error()
    }

    /// Returns the best value available for display: the committed value if
    /// the entry is `Success`, otherwise the retained last success.
    pub fn value(&self) -> Option<&T> {
        self.state.as_success().or(self.last_success.as_ref())
    }

    /// Check if no result has been committed for the current version.
    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Returns this entry as observed through a skipped binding: `Pending`,
    /// with any committed value folded into the stale slot so `value()`
    /// keeps serving it. Skipping never clears prior data.
    pub fn into_skipped(self) -> Self {
        let last_success = match self.state {
            QueryState::Success(v) => Some(v),
            _ => self.last_success,
        };
        Self {
            version: self.version,
            state: QueryState::Pending,
            last_success,
        }
    }
}

/// Concurrent map from [`QueryKey`] to [`CacheEntry`].
///
/// Mutated only by the binding that owns it, in response to its own issued
/// requests; readers pull snapshots. No eviction policy: entries are only
/// ever overwritten.
#[derive(Debug)]
pub struct QueryCache<T> {
    entries: DashMap<QueryKey, CacheEntry<T>>,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<T: Clone> QueryCache<T> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Returns a snapshot of the entry for `key`, if one exists.
    pub fn entry(&self, key: &QueryKey) -> Option<CacheEntry<T>> {
        self.entries.get(key).map(|e| e.clone())
    }

    /// Returns the number of distinct keys seen so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entry has been created yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Marks a new request issued for `key`: bumps the version and moves the
    /// entry to `Pending`, retaining the entry's own last committed value
    /// for stale display. Returns the version the response must carry to
    /// commit.
    pub fn begin(&self, key: &QueryKey) -> u64 {
        let mut entry = self.entries.entry(key.clone()).or_default();
        entry.version += 1;
        let state = std::mem::take(&mut entry.state);
        if let QueryState::Success(v) = state {
            entry.last_success = Some(v);
        }
        entry.state = QueryState::Pending;
        entry.version
    }

    /// Seeds the stale-display value for `key` if it has none of its own.
    ///
    /// Used when a binding changes key: the previous entry's last good value
    /// stays visible while the new request resolves.
    pub fn seed_stale(&self, key: &QueryKey, value: T) {
        let mut entry = self.entries.entry(key.clone()).or_default();
        if entry.last_success.is_none() && !entry.state.is_success() {
            entry.last_success = Some(value);
        }
    }

    /// Commits a response for `key`, replacing whatever the entry held
    /// before (merge policy is replace: paginated results never accumulate
    /// across pages). Discards the response and returns `false` if `version`
    /// no longer matches the entry, i.e. the request was superseded.
    pub fn commit(&self, key: &QueryKey, version: u64, result: Result<T, QueryError>) -> bool {
        let Some(mut entry) = self.entries.get_mut(key) else {
            log::debug!("discarding response for unknown key {key}");
            return false;
        };
        if entry.version != version {
            log::debug!(
                "discarding superseded response for {key} (version {version}, current {})",
                entry.version
            );
            return false;
        }
        match result {
            Ok(value) => {
                entry.last_success = Some(value.clone());
                entry.state = QueryState::Success(value);
            }
            Err(error) => {
                log::warn!("query {key} failed: {error}");
                entry.state = QueryState::Error(error);
            }
        }
        true
    }
}
