use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// Delimiter is not a single ASCII character, or is a quote or line break.
    InvalidDelimiter(char),
    /// The CSV writer failed.
    Write(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDelimiter(c) => write!(f, "invalid export delimiter {c:?}"),
            Self::Write(msg) => write!(f, "export write error: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {}
