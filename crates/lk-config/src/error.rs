//! Error types for the configuration crate.

use std::io;

/// Errors that can occur while reading a kernel configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The underlying reader failed before EOF.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// A `CONFIG_` line had no `=` separating name and value, or its option
    /// name contained whitespace.
    #[error("malformed config line {line}: {content:?}")]
    MalformedLine { line: usize, content: String },

    /// A line was not valid UTF-8.
    #[error("config line {line} is not valid UTF-8")]
    InvalidEncoding { line: usize },
}

/// Convenience alias for configuration results.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// A write failed part way through serialization.
///
/// `written` is the number of bytes successfully written before the failure.
#[derive(Debug, thiserror::Error)]
#[error("write failed after {written} bytes: {source}")]
pub struct WriteError {
    pub written: u64,
    #[source]
    pub source: io::Error,
}
