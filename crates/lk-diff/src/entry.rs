//! Individual diff entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An option and its value, present in only one of two configurations.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigValue {
    pub opt: String,
    pub val: String,
}

impl ConfigValue {
    pub fn new(opt: impl Into<String>, val: impl Into<String>) -> Self {
        Self {
            opt: opt.into(),
            val: val.into(),
        }
    }
}

/// Formats as, for example, `PKCS8_PRIVATE_KEY_PARSER n`.
impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.opt, self.val)
    }
}

/// An option whose value differs between two configurations.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigChange {
    pub opt: String,
    pub old_val: String,
    pub new_val: String,
}

impl ConfigChange {
    pub fn new(
        opt: impl Into<String>,
        old_val: impl Into<String>,
        new_val: impl Into<String>,
    ) -> Self {
        Self {
            opt: opt.into(),
            old_val: old_val.into(),
            new_val: new_val.into(),
        }
    }

    /// The same change seen from the other direction.
    pub fn reversed(&self) -> Self {
        Self {
            opt: self.opt.clone(),
            old_val: self.new_val.clone(),
            new_val: self.old_val.clone(),
        }
    }
}

/// Formats as, for example, `INET6_ESP_OFFLOAD n -> m`.
impl fmt::Display for ConfigChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.opt, self.old_val, self.new_val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_value() {
        assert_eq!(
            ConfigValue::new("PKCS8_PRIVATE_KEY_PARSER", "n").to_string(),
            "PKCS8_PRIVATE_KEY_PARSER n"
        );
    }

    #[test]
    fn display_change() {
        assert_eq!(
            ConfigChange::new("INET6_ESP_OFFLOAD", "n", "m").to_string(),
            "INET6_ESP_OFFLOAD n -> m"
        );
    }

    #[test]
    fn reversed_swaps_values() {
        let cc = ConfigChange::new("X", "a", "b");
        assert_eq!(cc.reversed(), ConfigChange::new("X", "b", "a"));
        assert_eq!(cc.reversed().reversed(), cc);
    }
}
