//! Error types for the diff crate.

use std::io;

use crate::entry::{ConfigChange, ConfigValue};

/// Reasons a diff cannot be applied to a base configuration.
///
/// Each variant carries the offending diff entry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    /// The diff removes an option the base configuration does not have.
    #[error("cannot apply diff: \"{0}\" removed, but {opt:?} is not in the base config", opt = .0.opt)]
    InvalidOldValue(ConfigValue),

    /// The diff changes an option the base configuration does not have.
    #[error("cannot apply diff: \"{0}\" changed, but {opt:?} is not in the base config", opt = .0.opt)]
    InvalidChange(ConfigChange),

    /// The diff changes an option from a value the base does not hold.
    #[error(
        "cannot apply diff: \"{change}\" changed, but {opt:?} is {actual:?} in the base config",
        opt = .change.opt
    )]
    MismatchedChange {
        change: ConfigChange,
        actual: String,
    },

    /// The diff adds an option the base configuration already has.
    #[error("cannot apply diff: \"{0}\" added, but {opt:?} is already in the base config", opt = .0.opt)]
    InvalidNewValue(ConfigValue),
}

/// Errors that can occur while reading the diff text format.
#[derive(Debug, thiserror::Error)]
pub enum DiffParseError {
    /// The underlying reader failed before EOF.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// A line did not match any of the three entry shapes.
    #[error("malformed diff line {line}: {content:?}")]
    MalformedLine { line: usize, content: String },
}
