//! `rostergrid-engine` — sort, filter and view state for rendered tables.
//!
//! Pure crate: callers hand in rows of display text and get back row orders
//! and visibility flags. No DOM, IO or event handling.

pub mod compare;
pub mod error;
pub mod filter;
pub mod grid;
pub mod input;
pub mod table;

pub use error::GridError;
pub use filter::{filter_rows, sort_by_column, FilterState, RowView, SortDirection, SortOutcome, SortState};
pub use grid::{Grid, Page};
pub use table::{Cell, Row, Table};
