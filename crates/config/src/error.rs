use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    /// File read/write error.
    Io(String),
    /// TOML parse / serialization error.
    Parse(String),
    /// A value parsed but is not usable.
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Validation(msg) => write!(f, "config validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
