//! Diff engine for Linux kernel configurations.
//!
//! Compares two [`Config`](lk_config::Config) values, producing a diff that
//! classifies every differing option as removed, changed, or added. A diff can
//! be written out in a stable text format, read back, and applied to a base
//! configuration to reconstruct the target.
//!
//! # Key Types
//!
//! - [`ConfigDiff`] -- Removed / changed / added options, each sorted by name
//! - [`ConfigValue`] / [`ConfigChange`] -- Individual diff entries
//! - [`DiffLine`] -- One line of the text format
//! - [`ApplyError`] -- Why a diff does not fit a base configuration

pub mod apply;
pub mod diff;
pub mod engine;
pub mod entry;
pub mod error;
pub mod parse;

pub use apply::apply_diff;
pub use diff::{ConfigDiff, DiffLine};
pub use engine::diff_configs;
pub use entry::{ConfigChange, ConfigValue};
pub use error::{ApplyError, DiffParseError};
pub use parse::parse_diff;
