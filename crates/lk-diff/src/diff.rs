//! The configuration diff type and its text format.
//!
//! The text format is similar to the `scripts/diffconfig` tool shipped with
//! the Linux kernel:
//!
//! ```text
//! -FOO 4
//!  BAR n -> y
//! +BAZ blah
//! ```
//!
//! Removed options come first, then changes, then added options.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use lk_config::{Config, StickyWriter, WriteError};
use serde::{Deserialize, Serialize};

use crate::apply::apply_diff;
use crate::entry::{ConfigChange, ConfigValue};
use crate::error::{ApplyError, DiffParseError};
use crate::parse::parse_diff;

/// Differences between two kernel configurations.
///
/// Every sequence is sorted by option name, so two diffs computed from the
/// same pair of configurations compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDiff {
    /// Options present only in the old configuration.
    pub in_old: Vec<ConfigValue>,
    /// Options present in both, with different values.
    pub changes: Vec<ConfigChange>,
    /// Options present only in the new configuration.
    pub in_new: Vec<ConfigValue>,
}

impl ConfigDiff {
    /// Create an empty diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no differences.
    pub fn is_empty(&self) -> bool {
        self.in_old.is_empty() && self.changes.is_empty() && self.in_new.is_empty()
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.in_old.len() + self.changes.len() + self.in_new.len()
    }

    /// Number of removed options.
    pub fn removals(&self) -> usize {
        self.in_old.len()
    }

    /// Number of changed options.
    pub fn modifications(&self) -> usize {
        self.changes.len()
    }

    /// Number of added options.
    pub fn additions(&self) -> usize {
        self.in_new.len()
    }

    /// Sort every sequence by option name.
    pub fn sort(&mut self) {
        self.in_old.sort_by(|a, b| a.opt.cmp(&b.opt));
        self.changes.sort_by(|a, b| a.opt.cmp(&b.opt));
        self.in_new.sort_by(|a, b| a.opt.cmp(&b.opt));
    }

    /// The diff that undoes this one.
    pub fn reversed(&self) -> Self {
        Self {
            in_old: self.in_new.clone(),
            changes: self.changes.iter().map(ConfigChange::reversed).collect(),
            in_new: self.in_old.clone(),
        }
    }

    /// Apply this diff to `cfg`. See [`apply_diff`].
    pub fn apply_to(&self, cfg: &Config) -> Result<Config, ApplyError> {
        apply_diff(cfg, self)
    }

    /// Read a diff in the text format. See [`parse_diff`].
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, DiffParseError> {
        parse_diff(reader)
    }

    /// Lines of the text format, in output order.
    pub fn lines(&self) -> impl Iterator<Item = DiffLine<'_>> {
        self.in_old
            .iter()
            .map(DiffLine::Removed)
            .chain(self.changes.iter().map(DiffLine::Changed))
            .chain(self.in_new.iter().map(DiffLine::Added))
    }

    /// Write the diff to `w` in the text format, returning the bytes written.
    ///
    /// Stops at the first write error; the error carries the byte count
    /// reached before it.
    pub fn write_to<W: Write>(&self, w: W) -> Result<u64, WriteError> {
        let mut out = StickyWriter::new(w);
        for line in self.lines() {
            out.write_line(format_args!("{line}"));
        }
        out.finish()
    }
}

impl fmt::Display for ConfigDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl FromStr for ConfigDiff {
    type Err = DiffParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_diff(s.as_bytes())
    }
}

/// A single line of the diff text format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffLine<'a> {
    /// `-<opt> <val>`
    Removed(&'a ConfigValue),
    /// ` <opt> <old> -> <new>`
    Changed(&'a ConfigChange),
    /// `+<opt> <val>`
    Added(&'a ConfigValue),
}

impl fmt::Display for DiffLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffLine::Removed(cv) => write!(f, "-{cv}"),
            DiffLine::Changed(cc) => write!(f, " {cc}"),
            DiffLine::Added(cv) => write!(f, "+{cv}"),
        }
    }
}
