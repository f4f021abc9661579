//! Wire shapes for the master list and detail queries.
//!
//! These mirror the query service's contract. Pagination metadata in
//! [`ListResult`] is trusted as the service reports it; the client never
//! recomputes totals from `items.len()`.

use serde::Deserialize;

use crate::key::{ArgValue, QueryKey};

/// Default page number for list queries.
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size for list queries.
pub const DEFAULT_SIZE: u32 = 20;
/// Largest page size the service accepts.
pub const MAX_SIZE: u32 = 100;

/// Arguments for the paginated master list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListArgs {
    /// 1-based page number.
    pub page: u32,
    /// Items per page, within the service's accepted range.
    pub size: u32,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_SIZE,
        }
    }
}

impl ListArgs {
    /// Creates list arguments, clamping into the service's accepted ranges
    /// (`page >= 1`, `1 <= size <= 100`).
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size: size.clamp(1, MAX_SIZE),
        }
    }

    /// Builds the cache key for this request under `operation`.
    pub fn key(&self, operation: &str) -> QueryKey {
        QueryKey::new(operation)
            .arg("page", self.page)
            .arg("size", self.size)
    }
}

/// One page of list results with service-supplied pagination metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResult<T> {
    /// The records on this page.
    pub items: Vec<T>,
    /// Total records across all pages, as reported by the service.
    pub total: u64,
    /// The page the service actually served.
    pub page: u32,
    /// The page size the service actually used.
    pub size: u32,
    /// Total page count, as reported by the service.
    pub total_pages: u32,
    /// Service-computed aggregate over the full record set (not just this
    /// page).
    pub aggregate: f64,
}

impl<T> ListResult<T> {
    /// Returns `true` if the service reported zero matching records.
    ///
    /// An empty result is a valid terminal state, not an error.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Arguments for the selection-dependent detail query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailArgs {
    /// Identity of the selected master record. Required; the query is
    /// skipped entirely while this is empty.
    pub primary_id: String,
    /// Optional secondary dimension filter; `None` or empty means "all".
    pub secondary_filter: Option<String>,
}

impl DetailArgs {
    /// Creates detail arguments for the given primary record.
    pub fn for_id(primary_id: impl Into<String>) -> Self {
        Self {
            primary_id: primary_id.into(),
            secondary_filter: None,
        }
    }

    /// Sets the secondary dimension filter.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.secondary_filter = Some(filter.into());
        self
    }

    /// Returns `true` if this query cannot be issued yet.
    pub fn should_skip(&self) -> bool {
        self.primary_id.is_empty()
    }

    /// Builds the cache key for this request under `operation`.
    ///
    /// An empty secondary filter normalizes to `Null` so "no filter" and
    /// "explicitly all" share one cache entry.
    pub fn key(&self, operation: &str) -> QueryKey {
        let filter = self
            .secondary_filter
            .as_deref()
            .filter(|f| !f.is_empty())
            .map(str::to_string);
        QueryKey::new(operation)
            .arg("primary_id", self.primary_id.as_str())
            .arg("secondary_filter", ArgValue::from(filter))
    }
}
