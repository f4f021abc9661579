//! Column model: ordered, keyed column definitions for a grid.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::content::Content;
use crate::error::GridError;

/// Render callback mapping `(record, row index)` to cell content.
///
/// Must be pure: the grid may re-invoke it on any re-render.
pub type RenderFn<T> = Arc<dyn Fn(&T, usize) -> Content + Send + Sync>;

/// Row-span callback mapping `(record, row index)` to the number of rows the
/// cell covers. `1` means a normal cell; `0` means the cell is covered by an
/// earlier spanning cell in the same column.
pub type RowSpanFn<T> = Arc<dyn Fn(&T, usize) -> usize + Send + Sync>;

/// A single column definition.
///
/// # Example
///
/// ```
/// use girder::column::Column;
/// use girder::content::Content;
///
/// struct Investor { name: String }
///
/// let col = Column::new("name", "Name", |inv: &Investor, _| {
///     Content::text(&inv.name)
/// });
/// assert_eq!(col.key(), "name");
/// ```
#[derive(Clone)]
pub struct Column<T> {
    key: String,
    header: String,
    render: RenderFn<T>,
    row_span: Option<RowSpanFn<T>>,
}

impl<T> Column<T> {
    /// Creates a column with the given key, header label and render callback.
    pub fn new(
        key: impl Into<String>,
        header: impl Into<String>,
        render: impl Fn(&T, usize) -> Content + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            render: Arc::new(render),
            row_span: None,
        }
    }

    /// Sets a row-span callback for this column.
    ///
    /// The grid only carries the declared spans through to its output; the
    /// merge decision stays with this callback.
    pub fn row_span(mut self, f: impl Fn(&T, usize) -> usize + Send + Sync + 'static) -> Self {
        self.row_span = Some(Arc::new(f));
        self
    }

    /// Returns the column key, unique within its model.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the header label.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Renders the cell content for one record.
    pub fn render(&self, record: &T, index: usize) -> Content {
        (self.render)(record, index)
    }

    /// Returns the declared row span for one record (`1` when no callback is
    /// configured).
    pub fn span(&self, record: &T, index: usize) -> usize {
        self.row_span.as_ref().map_or(1, |f| f(record, index))
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("row_span", &self.row_span.is_some())
            .finish()
    }
}

/// An ordered set of columns with unique keys.
///
/// Insertion order is render order (left to right).
#[derive(Clone)]
pub struct ColumnModel<T> {
    columns: Vec<Column<T>>,
}

impl<T> fmt::Debug for ColumnModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnModel")
            .field("columns", &self.columns)
            .finish()
    }
}

impl<T> ColumnModel<T> {
    /// Creates a model from the given columns, rejecting duplicate keys.
    pub fn new(columns: Vec<Column<T>>) -> Result<Self, GridError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.key().to_string()) {
                return Err(GridError::DuplicateColumn {
                    key: column.key().to_string(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Creates a model with no columns. A grid over an empty model renders
    /// its empty placeholder unconditionally.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Returns the columns in render order.
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the model has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the header labels in render order.
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(Column::header).collect()
    }
}
