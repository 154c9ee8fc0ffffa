use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Column index is past the table width.
    ColumnOutOfRange { column: usize, width: usize },
    /// A row's cell count differs from the first row's.
    Ragged { row: usize, expected: usize, found: usize },
    /// No table registered under this id.
    NotFound(String),
    /// Password and confirmation differ.
    PasswordMismatch,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnOutOfRange { column, width } => {
                write!(f, "column {column} out of range for table of width {width}")
            }
            Self::Ragged { row, expected, found } => {
                write!(f, "row {row} has {found} cell(s), expected {expected}")
            }
            Self::NotFound(id) => write!(f, "table not found: {id}"),
            Self::PasswordMismatch => write!(f, "Passwords don't match"),
        }
    }
}

impl std::error::Error for GridError {}
