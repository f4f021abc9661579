//! Master/detail view composition.
//!
//! Pull-based recomputation: the owner calls `recompute` after any event
//! (query resolution, filter/page/selection change) and re-renders from the
//! returned output. There is no observer graph; bindings flip a dirty flag
//! and fire a wakeup when a request resolves, and the event loop pulls.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use girder_query::{
    CacheEntry, DetailArgs, ListArgs, ListResult, QueryBinding, QueryExecutor,
};

use crate::filter::SearchFilter;
use crate::grid::{Grid, GridOutput};
use crate::page::PageWindow;
use crate::selection::SelectionState;

/// Projection of a record's searchable fields.
pub type FieldsFn<T> = Arc<dyn Fn(&T) -> Vec<String> + Send + Sync>;

/// The master list view: a paginated list binding composed with free-text
/// filtering, a page window and single selection, rendered through a grid.
///
/// Data flows `binding result -> filter -> window -> grid`. Pagination is
/// server-side (page and size are binding arguments; changing them replaces
/// the cached page wholesale), while the filter narrows the loaded page
/// client-side without touching the binding key.
pub struct MasterView<T, K> {
    operation: String,
    binding: QueryBinding<ListResult<T>>,
    grid: Grid<T, K>,
    fields: FieldsFn<T>,
    filter: SearchFilter,
    window: PageWindow,
    selection: SelectionState<K>,
    aggregate: Option<f64>,
}

impl<T, K> MasterView<T, K>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
    K: Clone + Eq,
{
    /// Creates a master view querying `operation` through `executor`.
    ///
    /// `fields` projects the searchable fields of one record for the
    /// free-text filter.
    pub fn new(
        operation: impl Into<String>,
        executor: Arc<dyn QueryExecutor>,
        grid: Grid<T, K>,
        fields: impl Fn(&T) -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            operation: operation.into(),
            binding: QueryBinding::new(executor),
            grid,
            fields: Arc::new(fields),
            filter: SearchFilter::new(),
            window: PageWindow::default(),
            selection: SelectionState::new(),
            aggregate: None,
        }
    }

    /// Replaces the free-text search term. Client-side only; the binding
    /// key is untouched and no query is issued.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.set_term(term);
    }

    /// Returns the current search term.
    pub fn search_term(&self) -> &str {
        self.filter.term()
    }

    /// Requests a page. Clamped against the last known total; the next
    /// `recompute` issues the query for the (possibly clamped) page.
    pub fn set_page(&mut self, page: usize) {
        self.window.set_page(page);
    }

    /// Changes the page size and re-clamps the page.
    pub fn set_size(&mut self, size: usize) {
        self.window.set_size(size);
    }

    /// Returns the page window (for pager display).
    pub fn window(&self) -> &PageWindow {
        &self.window
    }

    /// Returns the service-computed aggregate over the full record set, from
    /// the most recent result.
    pub fn aggregate(&self) -> Option<f64> {
        self.aggregate
    }

    /// Selects a record by key. Idempotent for the current selection.
    pub fn select(&mut self, key: K) -> bool {
        self.selection.select(key)
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) -> bool {
        self.selection.clear()
    }

    /// Returns the selection state.
    pub fn selection(&self) -> &SelectionState<K> {
        &self.selection
    }

    /// Returns the underlying binding (for wakeups and dirty checks).
    pub fn binding(&self) -> &QueryBinding<ListResult<T>> {
        &self.binding
    }

    /// Re-issues the current list query. Retry hook for the owner's UI.
    pub fn refetch(&self) {
        self.binding.refetch();
    }

    /// Re-evaluates the view: binds the current page arguments, syncs the
    /// window totals from the freshest result, then renders
    /// `filter -> window -> grid`.
    ///
    /// A failed query renders the failure placeholder even when stale data
    /// exists; errors are surfaced, never masked. Selection is left alone
    /// throughout - records filtered or paged out of view stay selected.
    pub fn recompute(&mut self) -> GridOutput<K> {
        let args = ListArgs::new(self.window.page() as u32, self.window.size() as u32);
        let entry = self.binding.bind(args.key(&self.operation), false);

        if let Some(error) = entry.error() {
            log::debug!("list query failed: {error}");
            return self.grid.failure(error.clone());
        }

        match entry.value() {
            None => self.grid.loading(),
            Some(list) => {
                // The service's page/size/total are authoritative. Re-clamp
                // before slicing so an out-of-range page renders empty
                // rather than faulting.
                self.window.set_size(list.size as usize);
                self.window.set_total(list.total as usize);
                self.aggregate = Some(list.aggregate);

                let filtered = self.filter.apply(&list.items, |r| (self.fields)(r));

                // The service already sliced this page; locally the window
                // only bounds the filtered page to the page size.
                let mut local = PageWindow::new(1, self.window.size());
                local.set_total(filtered.len());
                let visible = local.slice(&filtered);

                self.grid.render(visible.iter().copied(), &self.selection)
            }
        }
    }
}

impl<T, K> MasterView<T, K>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
    K: Clone + Eq + ToString,
{
    /// Returns the selected record's identity as the detail query expects
    /// it.
    pub fn selected_id(&self) -> Option<String> {
        self.selection.selected().map(ToString::to_string)
    }
}

/// The detail view binding, re-keyed off the master selection.
///
/// The view itself only owns the binding lifecycle; rendering the breakdown
/// is the caller's concern. While nothing is selected the binding is
/// skipped entirely: no request, and the previous breakdown stays readable
/// as stale data.
pub struct DetailView<D> {
    operation: String,
    binding: QueryBinding<D>,
    secondary_filter: Option<String>,
}

impl<D> DetailView<D>
where
    D: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Creates a detail view querying `operation` through `executor`.
    pub fn new(operation: impl Into<String>, executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            operation: operation.into(),
            binding: QueryBinding::new(executor),
            secondary_filter: None,
        }
    }

    /// Sets the secondary dimension filter (`None` or empty means "all").
    /// Takes effect on the next `recompute`.
    pub fn set_secondary_filter(&mut self, filter: Option<String>) {
        self.secondary_filter = filter;
    }

    /// Returns the secondary dimension filter.
    pub fn secondary_filter(&self) -> Option<&str> {
        self.secondary_filter.as_deref()
    }

    /// Returns the underlying binding (for wakeups and dirty checks).
    pub fn binding(&self) -> &QueryBinding<D> {
        &self.binding
    }

    /// Re-issues the current detail query. Retry hook for the owner's UI.
    pub fn refetch(&self) {
        self.binding.refetch();
    }

    /// Re-evaluates the binding for the given master selection and returns
    /// the cached entry snapshot.
    pub fn recompute(&self, primary_id: Option<&str>) -> CacheEntry<D> {
        let mut args = DetailArgs::for_id(primary_id.unwrap_or_default());
        if let Some(filter) = &self.secondary_filter {
            args = args.with_filter(filter.clone());
        }
        let skip = args.should_skip();
        self.binding.bind(args.key(&self.operation), skip)
    }
}
