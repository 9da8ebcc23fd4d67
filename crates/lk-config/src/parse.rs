//! Line-level decoding of kernel configuration text.

/// Prefix of every configuration option line.
pub const OPTION_PREFIX: &str = "CONFIG_";

const UNSET_PREFIX: &str = "# CONFIG_";
const UNSET_SUFFIX: &str = " is not set";

/// Classification of a single configuration line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigLine<'a> {
    /// `CONFIG_<name>=<value>`.
    Set { name: &'a str, value: &'a str },
    /// `# CONFIG_<name> is not set`.
    Unset { name: &'a str },
    /// A `CONFIG_` line with no `=`, or whose name contains whitespace.
    Malformed,
    /// Blank lines, comments and anything else.
    Ignored,
}

/// Classify a line of a kernel configuration file.
///
/// Surrounding whitespace is ignored. Only the first `=` separates name from
/// value, so values may themselves contain `=`. Lines naming an empty option
/// (`CONFIG_=y`) are ignored. Option names never contain whitespace: such an
/// assignment is malformed, and such an `is not set` comment is ignored.
///
/// # Examples
///
/// ```
/// use lk_config::parse::{parse_line, ConfigLine};
///
/// assert_eq!(
///     parse_line("CONFIG_HAVE_KERNEL_GZIP=y"),
///     ConfigLine::Set { name: "HAVE_KERNEL_GZIP", value: "y" },
/// );
/// assert_eq!(
///     parse_line("# CONFIG_COMPILE_TEST is not set"),
///     ConfigLine::Unset { name: "COMPILE_TEST" },
/// );
/// assert_eq!(parse_line("# General setup"), ConfigLine::Ignored);
/// ```
pub fn parse_line(line: &str) -> ConfigLine<'_> {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix(OPTION_PREFIX) {
        return match rest.split_once('=') {
            Some(("", _)) => ConfigLine::Ignored,
            Some((name, _)) if has_whitespace(name) => ConfigLine::Malformed,
            Some((name, value)) => ConfigLine::Set { name, value },
            None => ConfigLine::Malformed,
        };
    }
    if let Some(name) = line
        .strip_suffix(UNSET_SUFFIX)
        .and_then(|rest| rest.strip_prefix(UNSET_PREFIX))
    {
        if !name.is_empty() && !has_whitespace(name) {
            return ConfigLine::Unset { name };
        }
    }
    ConfigLine::Ignored
}

fn has_whitespace(name: &str) -> bool {
    name.chars().any(char::is_whitespace)
}
