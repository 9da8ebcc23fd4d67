//! User settings, read from a TOML file.
//!
//! ```toml
//! kallsyms_path = "/proc/kallsyms"
//! color = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Symbol table read by `syms` when no `--path` is given.
    pub kallsyms_path: PathBuf,
    /// Colorize text output on a terminal.
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            kallsyms_path: PathBuf::from(lk_symbols::DEFAULT_KALLSYMS_PATH),
            color: true,
        }
    }
}

impl Settings {
    /// Load settings from `explicit` if given (it must exist), otherwise
    /// from the per-user settings file if there is one, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => match user_settings_path() {
                Some(path) if path.is_file() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        let settings = toml::from_str(&text)
            .with_context(|| format!("parsing settings {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }
}

/// `$XDG_CONFIG_HOME/lkinspect/config.toml`, falling back to `~/.config`.
fn user_settings_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("lkinspect").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let s = Settings::default();
        assert_eq!(s.kallsyms_path, PathBuf::from("/proc/kallsyms"));
        assert!(s.color);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let s: Settings = toml::from_str("color = false").unwrap();
        assert!(!s.color);
        assert_eq!(s.kallsyms_path, PathBuf::from("/proc/kallsyms"));
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(toml::from_str::<Settings>("colour = false").is_err());
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lk.toml");
        std::fs::write(&path, "kallsyms_path = \"/boot/System.map\"\n").unwrap();
        let s = Settings::load(Some(&path)).unwrap();
        assert_eq!(s.kallsyms_path, PathBuf::from("/boot/System.map"));
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
