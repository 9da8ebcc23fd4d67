//! Reading diffs back from the text format.
//!
//! Each non-blank line starts with a one-character marker: `-` for a removed
//! option, `+` for an added option, and a space for a change. The option name
//! runs up to the first space after the marker; everything after that space
//! is the value, which may be empty or contain spaces. A change splits its
//! values on the first ` -> `.

use std::io::BufRead;

use tracing::debug;

use crate::diff::ConfigDiff;
use crate::entry::{ConfigChange, ConfigValue};
use crate::error::DiffParseError;

enum Entry {
    Removed(ConfigValue),
    Changed(ConfigChange),
    Added(ConfigValue),
}

/// Parse a diff written by [`ConfigDiff::write_to`].
///
/// Lines are only stripped of their terminator, since a trailing space marks
/// an empty value. The result is sorted, so it compares equal to the diff
/// that produced the text.
pub fn parse_diff<R: BufRead>(reader: R) -> Result<ConfigDiff, DiffParseError> {
    let mut diff = ConfigDiff::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        match parse_entry(&line) {
            Some(Entry::Removed(cv)) => diff.in_old.push(cv),
            Some(Entry::Changed(cc)) => diff.changes.push(cc),
            Some(Entry::Added(cv)) => diff.in_new.push(cv),
            None => {
                return Err(DiffParseError::MalformedLine {
                    line: index + 1,
                    content: line,
                })
            }
        }
    }
    diff.sort();
    debug!(
        removed = diff.removals(),
        changed = diff.modifications(),
        added = diff.additions(),
        "parsed config diff"
    );
    Ok(diff)
}

fn parse_entry(line: &str) -> Option<Entry> {
    if let Some(body) = line.strip_prefix('-') {
        let (opt, val) = split_name(body)?;
        Some(Entry::Removed(ConfigValue::new(opt, val)))
    } else if let Some(body) = line.strip_prefix('+') {
        let (opt, val) = split_name(body)?;
        Some(Entry::Added(ConfigValue::new(opt, val)))
    } else if let Some(body) = line.strip_prefix(' ') {
        let (opt, rest) = split_name(body)?;
        let (old_val, new_val) = rest.split_once(" -> ")?;
        Some(Entry::Changed(ConfigChange::new(opt, old_val, new_val)))
    } else {
        None
    }
}

fn split_name(body: &str) -> Option<(&str, &str)> {
    match body.split_once(' ')? {
        ("", _) => None,
        pair => Some(pair),
    }
}
