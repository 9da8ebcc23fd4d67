//! Applying a diff to a base configuration.

use lk_config::Config;
use tracing::debug;

use crate::diff::ConfigDiff;
use crate::error::ApplyError;

/// Apply `diff` to `cfg`, returning the patched configuration.
///
/// Removals are applied first, then changes, then additions. Every entry is
/// checked against `cfg` as given:
///
/// - a removed option must be present,
/// - a changed option must be present with the change's old value,
/// - an added option must be absent.
///
/// On failure nothing is returned but the error. If `diff` was produced by
/// [`diff_configs`](crate::diff_configs)`(cfg, x)`, the result equals `x`.
pub fn apply_diff(cfg: &Config, diff: &ConfigDiff) -> Result<Config, ApplyError> {
    let result = patch(cfg, diff);
    if let Err(e) = &result {
        debug!(error = %e, "diff does not apply");
    }
    result
}

fn patch(cfg: &Config, diff: &ConfigDiff) -> Result<Config, ApplyError> {
    let mut new = cfg.clone();

    for cv in &diff.in_old {
        if !cfg.contains(&cv.opt) {
            return Err(ApplyError::InvalidOldValue(cv.clone()));
        }
        new.remove(&cv.opt);
    }

    for cc in &diff.changes {
        let Some(old_val) = cfg.get(&cc.opt) else {
            return Err(ApplyError::InvalidChange(cc.clone()));
        };
        if old_val != cc.old_val {
            return Err(ApplyError::MismatchedChange {
                change: cc.clone(),
                actual: old_val.to_string(),
            });
        }
        new.insert(cc.opt.clone(), cc.new_val.clone());
    }

    for cv in &diff.in_new {
        if cfg.contains(&cv.opt) {
            return Err(ApplyError::InvalidNewValue(cv.clone()));
        }
        new.insert(cv.opt.clone(), cv.val.clone());
    }

    Ok(new)
}
