//! Table model: rows of display-text cells.
//!
//! A `Table` mirrors a rendered HTML table: `head` holds the `<thead>` rows,
//! `body` the `<tbody>` rows. Sorting and filtering only ever look at body
//! rows and never touch cell text.

use serde::{Deserialize, Serialize};

use crate::compare::parse_float;
use crate::error::GridError;

/// One cell's rendered text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell {
    text: String,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Text exactly as rendered
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text with surrounding whitespace removed (the sort key)
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Numeric reading of the trimmed text, if it has one
    pub fn numeric(&self) -> Option<f64> {
        parse_float(self.trimmed())
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self { text }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Build a row from anything string-like
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts.into_iter().map(Cell::new).collect()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<Cell> for Row {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

/// A rendered table identified by its element id.
///
/// All rows (head and body) have the same cell count; `Table::new` rejects
/// ragged input instead of truncating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    id: String,
    head: Vec<Row>,
    body: Vec<Row>,
}

impl Table {
    pub fn new(id: impl Into<String>, head: Vec<Row>, body: Vec<Row>) -> Result<Self, GridError> {
        let table = Self { id: id.into(), head, body };
        table.check_uniform()?;
        Ok(table)
    }

    /// Convenience constructor for a single header row plus body text.
    pub fn from_text<S: AsRef<str>>(
        id: impl Into<String>,
        header: &[S],
        body: &[Vec<S>],
    ) -> Result<Self, GridError> {
        let head = if header.is_empty() {
            Vec::new()
        } else {
            vec![Row::from_texts(header.iter().map(|s| s.as_ref()))]
        };
        let body = body
            .iter()
            .map(|r| Row::from_texts(r.iter().map(|s| s.as_ref())))
            .collect();
        Self::new(id, head, body)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn head(&self) -> &[Row] {
        &self.head
    }

    pub fn body(&self) -> &[Row] {
        &self.body
    }

    /// All rows in document order: head rows, then body rows
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.head.iter().chain(self.body.iter())
    }

    /// Cell count per row, or None when the table has no rows at all
    pub fn width(&self) -> Option<usize> {
        self.rows().next().map(Row::len)
    }

    /// Fails with `ColumnOutOfRange` if `column` is not a valid index.
    /// A table without rows has no known width and accepts any column.
    pub fn check_column(&self, column: usize) -> Result<(), GridError> {
        match self.width() {
            Some(width) if column >= width => Err(GridError::ColumnOutOfRange { column, width }),
            _ => Ok(()),
        }
    }

    fn check_uniform(&self) -> Result<(), GridError> {
        let Some(expected) = self.width() else {
            return Ok(());
        };
        for (row, r) in self.rows().enumerate() {
            if r.len() != expected {
                return Err(GridError::Ragged { row, expected, found: r.len() });
            }
        }
        Ok(())
    }
}
