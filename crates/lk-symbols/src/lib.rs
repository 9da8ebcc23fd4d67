//! Linux kernel symbol tables.
//!
//! Parses `/proc/kallsyms`-style output (`<address> <type> <name> [<module>]`)
//! into a [`SymbolTable`] that can be searched by name.
//!
//! # Key Types
//!
//! - [`Symbol`] -- One symbol: address, type letter, name, owning module
//! - [`SymbolType`] -- The `nm`-style type letter with section predicates
//! - [`SymbolTable`] -- Set of symbols with lookup by name

pub mod error;
pub mod symbol;
pub mod table;

pub use error::{Result, SymbolError};
pub use symbol::{Symbol, SymbolType};
pub use table::{kallsyms, SymbolTable, DEFAULT_KALLSYMS_PATH};
