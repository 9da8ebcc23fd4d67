//! Computing the diff between two configurations.

use lk_config::Config;

use crate::diff::ConfigDiff;
use crate::entry::{ConfigChange, ConfigValue};

/// Compute the differences between `old` and `new`.
///
/// Options only in `old` are reported in `in_old`, options only in `new` in
/// `in_new`, and options in both with different values in `changes`. Options
/// with equal values are omitted. Every sequence is sorted by option name, so
/// the result does not depend on map iteration order.
pub fn diff_configs(old: &Config, new: &Config) -> ConfigDiff {
    let mut diff = ConfigDiff::new();

    for (opt, old_val) in old {
        match new.get(opt) {
            None => diff.in_old.push(ConfigValue::new(opt, old_val)),
            Some(new_val) if new_val != old_val => {
                diff.changes.push(ConfigChange::new(opt, old_val, new_val));
            }
            Some(_) => {}
        }
    }

    for (opt, new_val) in new {
        if !old.contains(opt) {
            diff.in_new.push(ConfigValue::new(opt, new_val));
        }
    }

    diff.sort();
    diff
}
