use std::io;

/// Errors produced while reading a symbol table.
#[derive(Debug, thiserror::Error)]
pub enum SymbolError {
    /// I/O error opening or reading the table.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The line did not have three or four whitespace-separated fields.
    #[error("malformed symbol table line {line}: {content:?}")]
    MalformedLine { line: usize, content: String },

    /// The address field was not a hexadecimal number.
    #[error("invalid symbol address {address:?} on line {line}: {source}")]
    InvalidAddress {
        line: usize,
        address: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// The type field was not a single character.
    #[error("unknown symbol type {kind:?} on line {line}")]
    UnknownType { line: usize, kind: String },
}

/// Convenience alias used throughout the symbols crate.
pub type Result<T> = std::result::Result<T, SymbolError>;
