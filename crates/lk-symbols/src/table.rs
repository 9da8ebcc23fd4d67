//! Symbol tables and lookup.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Result, SymbolError};
use crate::symbol::{parse_symbol, Symbol};

/// Where procfs exposes the running kernel's symbols.
pub const DEFAULT_KALLSYMS_PATH: &str = "/proc/kallsyms";

/// A Linux kernel symbol table.
///
/// Several symbols may share a name (static functions in different
/// compilation units or modules); identical lines collapse into one entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: HashSet<Symbol>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a symbol table from `reader`, one symbol per line.
    ///
    /// Any line that is not `<hex address> <type> <name> [<module>]` fails
    /// the whole parse.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            table.insert(parse_symbol(&line, index + 1)?);
        }
        Ok(table)
    }

    /// Read the symbol table at `path`, e.g. `/proc/kallsyms` or a
    /// `System.map`-style dump with the same layout.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let table = Self::parse(BufReader::new(file))?;
        debug!(path = %path.display(), symbols = table.len(), "loaded symbol table");
        Ok(table)
    }

    /// Add a symbol. Returns `false` if it was already present.
    pub fn insert(&mut self, sym: Symbol) -> bool {
        self.symbols.insert(sym)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if the table has no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate over all symbols in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// All symbols named `name`, ordered by address, then module.
    pub fn find(&self, name: &str) -> Vec<&Symbol> {
        let mut found: Vec<&Symbol> = self.symbols.iter().filter(|s| s.name == name).collect();
        found.sort_by(|a, b| (a.addr, &a.module, a.kind).cmp(&(b.addr, &b.module, b.kind)));
        found
    }
}

impl FromStr for SymbolTable {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.as_bytes())
    }
}

impl FromIterator<Symbol> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().collect(),
        }
    }
}

/// Read the running kernel's symbol table from [`DEFAULT_KALLSYMS_PATH`].
///
/// Without sufficient privileges the kernel reports every address as zero.
pub fn kallsyms() -> Result<SymbolTable> {
    SymbolTable::open(DEFAULT_KALLSYMS_PATH)
}
