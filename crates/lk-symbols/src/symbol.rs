//! Kernel symbols and their type letters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SymbolError};

/// A kernel symbol, as listed in `/proc/kallsyms`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    /// Load address.
    pub addr: u64,
    /// `nm`-style type letter.
    pub kind: SymbolType,
    pub name: String,
    /// Owning module, for symbols not built into the core kernel image.
    pub module: Option<String>,
}

/// Formats as `ffffffff81000000 T _text`, with ` [module]` appended when set.
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x} {} {}", self.addr, self.kind, self.name)?;
        if let Some(module) = &self.module {
            write!(f, " [{module}]")?;
        }
        Ok(())
    }
}

/// The type of a symbol, as reported by `nm` and `/proc/kallsyms`.
///
/// Lower case letters denote local symbols, upper case global ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolType(pub char);

impl SymbolType {
    /// The raw type letter.
    pub fn letter(self) -> char {
        self.0
    }

    fn is(self, letter: char) -> bool {
        self.0.eq_ignore_ascii_case(&letter)
    }

    /// Absolute value, not changed by further linking (`A`/`a`).
    pub fn is_absolute(self) -> bool {
        self.is('a')
    }

    /// In the BSS data section (`B`/`b`).
    pub fn is_bss(self) -> bool {
        self.is('b')
    }

    /// In the initialized data section (`D`/`d`).
    pub fn is_data(self) -> bool {
        self.is('d')
    }

    /// In a read-only data section (`R`/`r`).
    pub fn is_readonly(self) -> bool {
        self.is('r')
    }

    /// In a text (code) section (`T`/`t`).
    pub fn is_text(self) -> bool {
        self.is('t')
    }

    /// A weak object (`V`/`v`).
    pub fn is_weak_object(self) -> bool {
        self.is('v')
    }

    /// A weak symbol (`W`/`w`).
    pub fn is_weak_symbol(self) -> bool {
        self.is('w')
    }

    /// Global (external) symbol.
    pub fn is_global(self) -> bool {
        self.0.is_uppercase()
    }
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse one symbol table line. `line` is the 1-based line number used in
/// errors.
pub(crate) fn parse_symbol(content: &str, line: usize) -> Result<Symbol> {
    let fields: Vec<&str> = content.split_whitespace().collect();
    if fields.len() != 3 && fields.len() != 4 {
        return Err(SymbolError::MalformedLine {
            line,
            content: content.to_string(),
        });
    }

    let addr = u64::from_str_radix(fields[0], 16).map_err(|source| SymbolError::InvalidAddress {
        line,
        address: fields[0].to_string(),
        source,
    })?;

    let mut letters = fields[1].chars();
    let kind = match (letters.next(), letters.next()) {
        (Some(c), None) => SymbolType(c),
        _ => {
            return Err(SymbolError::UnknownType {
                line,
                kind: fields[1].to_string(),
            })
        }
    };

    let module = fields
        .get(3)
        .map(|m| m.trim_matches(|c: char| c == '[' || c == ']').to_string());

    Ok(Symbol {
        addr,
        kind,
        name: fields[2].to_string(),
        module,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_core_symbol() {
        let sym = parse_symbol("ffffffff81000000 T _text", 1).unwrap();
        assert_eq!(sym.addr, 0xffff_ffff_8100_0000);
        assert_eq!(sym.kind, SymbolType('T'));
        assert_eq!(sym.name, "_text");
        assert_eq!(sym.module, None);
    }

    #[test]
    fn parse_module_symbol() {
        let sym = parse_symbol("ffffffffc0a3d010 t ext4_fill_super\t[ext4]", 1).unwrap();
        assert_eq!(sym.module.as_deref(), Some("ext4"));
        assert!(sym.kind.is_text());
        assert!(!sym.kind.is_global());
    }

    #[test]
    fn display_round_trips() {
        for line in [
            "ffffffff81000000 T _text",
            "ffffffffc0a3d010 t ext4_fill_super [ext4]",
            "0000000000000000 A fixed_percpu_data",
        ] {
            assert_eq!(parse_symbol(line, 1).unwrap().to_string(), line);
        }
    }

    #[test]
    fn wrong_field_count() {
        for line in ["", "ffffffff81000000 T", "a b c d e"] {
            assert!(
                matches!(
                    parse_symbol(line, 7),
                    Err(SymbolError::MalformedLine { line: 7, .. })
                ),
                "{line:?}"
            );
        }
    }

    #[test]
    fn bad_address() {
        let err = parse_symbol("zzzz T foo", 3).unwrap_err();
        match err {
            SymbolError::InvalidAddress { line, address, .. } => {
                assert_eq!(line, 3);
                assert_eq!(address, "zzzz");
            }
            other => panic!("expected InvalidAddress, got {other:?}"),
        }
    }

    #[test]
    fn multi_letter_type() {
        assert!(matches!(
            parse_symbol("ffffffff81000000 TT foo", 1),
            Err(SymbolError::UnknownType { .. })
        ));
    }

    #[test]
    fn type_predicates() {
        let cases = [
            ('A', SymbolType::is_absolute as fn(SymbolType) -> bool),
            ('b', SymbolType::is_bss),
            ('D', SymbolType::is_data),
            ('r', SymbolType::is_readonly),
            ('T', SymbolType::is_text),
            ('v', SymbolType::is_weak_object),
            ('W', SymbolType::is_weak_symbol),
        ];
        for (letter, pred) in cases {
            assert!(pred(SymbolType(letter)), "{letter}");
            assert!(pred(SymbolType(letter.to_ascii_lowercase())), "{letter}");
            assert!(pred(SymbolType(letter.to_ascii_uppercase())), "{letter}");
            assert!(!pred(SymbolType('U')), "{letter}");
        }
        assert!(SymbolType('T').is_global());
        assert!(!SymbolType('t').is_global());
    }
}
