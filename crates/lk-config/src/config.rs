//! The kernel configuration model.
//!
//! A [`Config`] maps option names (without the `CONFIG_` prefix) to their
//! textual values:
//!
//! - `CONFIG_X=something` gives `X` → `something`
//! - `CONFIG_Y=""` gives `Y` → `""` (two quote characters)
//! - `# CONFIG_Z is not set` gives `Z` → `n`
//!
//! An option never mentioned in the input is absent, which is distinct from
//! being present with the value `n`.

use std::collections::hash_map::{self, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result, WriteError};
use crate::parse::{parse_line, ConfigLine};
use crate::writer::StickyWriter;

/// Value recorded for `# CONFIG_<name> is not set`.
pub const UNSET: &str = "n";

/// A parsed Linux kernel configuration.
///
/// Iteration order is unspecified. Anything that needs a stable order sorts
/// by option name first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    options: HashMap<String, String>,
}

impl Config {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from `reader`, consuming it until EOF.
    ///
    /// Lines other than option assignments and `is not set` comments are
    /// skipped. A `CONFIG_` line without `=` or with whitespace in the option
    /// name fails the whole parse, as does a line that is not valid UTF-8. If
    /// an option appears more than once, the last occurrence wins.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut cfg = Self::new();
        let mut skipped = 0usize;
        for (index, bytes) in reader.split(b'\n').enumerate() {
            let line = String::from_utf8(bytes?)
                .map_err(|_| ConfigError::InvalidEncoding { line: index + 1 })?;
            match parse_line(&line) {
                ConfigLine::Set { name, value } => {
                    cfg.insert(name, value);
                }
                ConfigLine::Unset { name } => {
                    cfg.insert(name, UNSET);
                }
                ConfigLine::Malformed => {
                    return Err(ConfigError::MalformedLine {
                        line: index + 1,
                        content: line,
                    });
                }
                ConfigLine::Ignored => skipped += 1,
            }
        }
        debug!(options = cfg.len(), skipped, "parsed kernel config");
        Ok(cfg)
    }

    /// Read and parse the configuration file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::parse(BufReader::new(file))
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns `true` if no options are recorded.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Value of `opt`, if present.
    pub fn get(&self, opt: &str) -> Option<&str> {
        self.options.get(opt).map(String::as_str)
    }

    /// Returns `true` if `opt` is present (including as `n`).
    pub fn contains(&self, opt: &str) -> bool {
        self.options.contains_key(opt)
    }

    /// Returns `true` if `opt` is present with the value `n`.
    pub fn is_unset(&self, opt: &str) -> bool {
        self.get(opt) == Some(UNSET)
    }

    /// Set `opt` to `val`, returning the previous value.
    pub fn insert(&mut self, opt: impl Into<String>, val: impl Into<String>) -> Option<String> {
        self.options.insert(opt.into(), val.into())
    }

    /// Remove `opt`, returning its value.
    pub fn remove(&mut self, opt: &str) -> Option<String> {
        self.options.remove(opt)
    }

    /// Iterate over `(option, value)` pairs in unspecified order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.options.iter(),
        }
    }

    /// Option names sorted ascending by byte order.
    pub fn sorted_options(&self) -> Vec<&str> {
        let mut opts: Vec<&str> = self.options.keys().map(String::as_str).collect();
        opts.sort_unstable();
        opts
    }

    /// Write the configuration to `w` in canonical form.
    ///
    /// One line per option sorted by name: `# CONFIG_<name> is not set` for
    /// `n`, `CONFIG_<name>=<value>` otherwise. The output is a valid kernel
    /// configuration file but will differ from whatever file it was parsed
    /// from. Returns the number of bytes written.
    pub fn write_to<W: Write>(&self, w: W) -> std::result::Result<u64, WriteError> {
        let mut out = StickyWriter::new(w);
        for opt in self.sorted_options() {
            match &self.options[opt] {
                v if v == UNSET => out.write_line(format_args!("# CONFIG_{opt} is not set")),
                v => out.write_line(format_args!("CONFIG_{opt}={v}")),
            }
        }
        out.finish()
    }

    /// Render the canonical form into a string.
    pub fn to_canonical_string(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.as_bytes())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Config {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            options: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Config {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.options
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl<'a> IntoIterator for &'a Config {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Iterator over the options of a [`Config`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    inner: hash_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}
