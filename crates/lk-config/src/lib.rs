//! Linux kernel configuration model.
//!
//! Parses kernel `.config` files into a canonical option → value mapping and
//! writes that mapping back out in a deterministic order.
//!
//! # Key Types
//!
//! - [`Config`] -- Parsed configuration (option name without `CONFIG_` → value)
//! - [`ConfigLine`] -- Classification of a single input line
//! - [`StickyWriter`] -- Line writer that stops at the first I/O error
//! - [`ConfigError`] / [`WriteError`] -- Parse and serialization failures

pub mod config;
pub mod error;
pub mod parse;
pub mod writer;

pub use config::{Config, UNSET};
pub use error::{ConfigError, Result, WriteError};
pub use parse::{parse_line, ConfigLine};
pub use writer::StickyWriter;
