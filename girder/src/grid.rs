//! Grid assembly: columns x records -> renderable keyed rows.

use std::fmt;
use std::sync::Arc;

use girder_query::QueryError;

use crate::column::ColumnModel;
use crate::content::Content;
use crate::selection::SelectionState;

/// One rendered cell with its declared row span.
///
/// `span == 1` is a normal cell; `span > 1` covers that many rows starting
/// here; `span == 0` marks a cell covered by an earlier spanning cell in the
/// same column. The grid carries the spans through verbatim - which rows
/// merge is decided by the column's row-span callback, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub content: Content,
    pub span: usize,
}

/// One rendered row.
///
/// Rows are identified by the record key, not their position: a reorder
/// without content change keeps every key stable, so downstream diffing can
/// move rows instead of re-rendering them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow<K> {
    /// Stable record identity.
    pub key: K,
    /// Index of the row within the rendered slice.
    pub index: usize,
    /// Whether this row is the current selection.
    pub selected: bool,
    /// Cells in column order.
    pub cells: Vec<GridCell>,
}

/// The outcome of rendering a grid against its current data source.
#[derive(Debug, Clone)]
pub enum GridOutput<K> {
    /// No committed data yet and nothing stale to show.
    Loading { placeholder: Content },
    /// The query failed. Rendered distinctly from the empty state.
    Failed {
        error: QueryError,
        placeholder: Content,
    },
    /// Zero rows after filtering and paging, or zero columns configured.
    Empty { placeholder: Content },
    /// Renderable rows.
    Rows(Vec<GridRow<K>>),
}

impl<K> GridOutput<K> {
    /// Returns the rows if this output has any.
    pub fn rows(&self) -> Option<&[GridRow<K>]> {
        match self {
            Self::Rows(rows) => Some(rows),
            _ => None,
        }
    }

    /// Check if this output renders a placeholder rather than rows.
    pub fn is_placeholder(&self) -> bool {
        !matches!(self, Self::Rows(_))
    }
}

/// A generic grid: a [`ColumnModel`] plus an explicit key projection.
///
/// The grid renders an already filtered and paged slice; it does not own
/// filtering or pagination. Column render callbacks must be pure - the grid
/// may re-invoke them on any re-render.
///
/// # Example
///
/// ```
/// use girder::column::{Column, ColumnModel};
/// use girder::content::Content;
/// use girder::grid::Grid;
/// use girder::selection::SelectionState;
///
/// struct Investor { id: String, name: String }
///
/// let columns = ColumnModel::new(vec![
///     Column::new("name", "Name", |r: &Investor, _| Content::text(&r.name)),
/// ]).unwrap();
/// let grid = Grid::new(columns, |r: &Investor| r.id.clone());
///
/// let records = vec![Investor { id: "a".into(), name: "Alder".into() }];
/// let output = grid.render(&records, &SelectionState::new());
/// assert_eq!(output.rows().unwrap().len(), 1);
/// ```
pub struct Grid<T, K> {
    columns: ColumnModel<T>,
    key_of: Arc<dyn Fn(&T) -> K + Send + Sync>,
    loading_placeholder: Content,
    empty_placeholder: Content,
    failure_placeholder: Content,
}

impl<T, K: Clone + Eq> Grid<T, K> {
    /// Creates a grid over `columns` with the given key projection.
    pub fn new(columns: ColumnModel<T>, key_of: impl Fn(&T) -> K + Send + Sync + 'static) -> Self {
        Self {
            columns,
            key_of: Arc::new(key_of),
            loading_placeholder: Content::text("Loading..."),
            empty_placeholder: Content::text("No records"),
            failure_placeholder: Content::text("Failed to load"),
        }
    }

    /// Sets the placeholder shown while the first result is pending.
    pub fn loading_placeholder(mut self, content: impl Into<Content>) -> Self {
        self.loading_placeholder = content.into();
        self
    }

    /// Sets the placeholder shown for an empty result.
    pub fn empty_placeholder(mut self, content: impl Into<Content>) -> Self {
        self.empty_placeholder = content.into();
        self
    }

    /// Sets the placeholder shown when the query failed.
    pub fn failure_placeholder(mut self, content: impl Into<Content>) -> Self {
        self.failure_placeholder = content.into();
        self
    }

    /// Returns the column model.
    pub fn columns(&self) -> &ColumnModel<T> {
        &self.columns
    }

    /// Returns the key for one record.
    pub fn key_of(&self, record: &T) -> K {
        (self.key_of)(record)
    }

    /// Renders an already filtered and paged slice into keyed rows.
    ///
    /// With zero columns the empty placeholder is rendered unconditionally;
    /// columns and data are both required for a non-empty render. An unknown
    /// selection key simply marks no row selected.
    pub fn render<'a, I>(&self, records: I, selection: &SelectionState<K>) -> GridOutput<K>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        if self.columns.is_empty() {
            return GridOutput::Empty {
                placeholder: self.empty_placeholder.clone(),
            };
        }

        let rows: Vec<GridRow<K>> = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let key = (self.key_of)(record);
                let selected = selection.is_selected(&key);
                let cells = self
                    .columns
                    .columns()
                    .iter()
                    .map(|column| GridCell {
                        content: column.render(record, index),
                        span: column.span(record, index),
                    })
                    .collect();
                GridRow {
                    key,
                    index,
                    selected,
                    cells,
                }
            })
            .collect();

        if rows.is_empty() {
            GridOutput::Empty {
                placeholder: self.empty_placeholder.clone(),
            }
        } else {
            GridOutput::Rows(rows)
        }
    }

    /// Returns the loading output (pending binding, nothing stale to show).
    pub fn loading(&self) -> GridOutput<K> {
        GridOutput::Loading {
            placeholder: self.loading_placeholder.clone(),
        }
    }

    /// Returns the failure output for a surfaced query error.
    pub fn failure(&self, error: QueryError) -> GridOutput<K> {
        GridOutput::Failed {
            error,
            placeholder: self.failure_placeholder.clone(),
        }
    }
}

impl<T, K> fmt::Debug for Grid<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}
