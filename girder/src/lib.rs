//! Generic grid layer
//!
//! A reusable, record-type-agnostic grid: keyed columns with pure render
//! callbacks, single-selection by record key, free-text filtering over the
//! loaded page, page-window arithmetic, and the master/detail view
//! composition over the `girder-query` binding layer.

pub mod column;
pub mod content;
pub mod error;
pub mod filter;
pub mod grid;
pub mod page;
pub mod selection;
pub mod view;

pub mod prelude {
    pub use crate::column::{Column, ColumnModel};
    pub use crate::content::Content;
    pub use crate::error::GridError;
    pub use crate::filter::SearchFilter;
    pub use crate::grid::{Grid, GridCell, GridOutput, GridRow};
    pub use crate::page::PageWindow;
    pub use crate::selection::SelectionState;
    pub use crate::view::{DetailView, MasterView};
}
