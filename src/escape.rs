//! String escaping for the string table.
//!
//! [`Escaper`] turns a raw string into a double-quoted literal that survives a
//! text-only transport. A character is escaped when it would break the quoting
//! (`"` and `\`), when it is a control character, when it is U+2011 NON-BREAKING
//! HYPHEN, or when its general category is one that renderers and text shapers
//! tend to mangle: marks, separators other than U+0020, format, control,
//! private-use, surrogate and unassigned code points.
//!
//! An escape is the backslash followed by one of:
//!
//! - a single letter for the named escapes (`\0 \b \t \n \f \r \\ \"`)
//! - `x` and two uppercase hex digits below U+0100
//! - `u` and four uppercase hex digits otherwise
//!
//! Code points above U+FFFF that need escaping keep only their low sixteen
//! bits in the `u` form; peers rely on this exact output.
//!
//! ## Examples
//!
//! ```rust
//! use serde_rpcjson::{Escaper, PropertyTable};
//!
//! let escaper = Escaper::new(PropertyTable::shared());
//! assert_eq!(escaper.escape("say \"hi\"\n"), r#""say \"hi\"\n""#);
//! assert_eq!(escaper.escape("a\u{a0}b"), r#""a\xA0b""#);
//! assert_eq!(escaper.escape("x\u{2028}"), r#""x\u2028""#);
//! ```

use crate::category::Category;
use crate::properties::PropertyTable;

/// Delimiter of a string literal.
pub const QUOTE: char = '"';

/// Character introducing an escape sequence.
pub const ESCAPE: char = '\\';

/// U+2011 NON-BREAKING HYPHEN, which some shapers expand into a break and a hyphen.
pub const NON_BREAKING_HYPHEN: char = '\u{2011}';

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// The single-character escape for `code_point`, if it has one.
#[must_use]
pub fn named_escape(code_point: u32) -> Option<char> {
    match code_point {
        0x00 => Some('0'),
        0x08 => Some('b'),
        0x09 => Some('t'),
        0x0A => Some('n'),
        0x0C => Some('f'),
        0x0D => Some('r'),
        0x22 => Some(QUOTE),
        0x5C => Some(ESCAPE),
        _ => None,
    }
}

fn hex_digit(nibble: u32) -> char {
    char::from(HEX_DIGITS[(nibble & 0x0F) as usize])
}

/// Escapes strings using categories from a borrowed [`PropertyTable`].
#[derive(Debug, Clone, Copy)]
pub struct Escaper<'t> {
    table: &'t PropertyTable,
}

impl<'t> Escaper<'t> {
    pub fn new(table: &'t PropertyTable) -> Self {
        Escaper { table }
    }

    /// The table used for category lookups.
    pub fn table(&self) -> &'t PropertyTable {
        self.table
    }

    /// Whether `code_point` must be written as an escape sequence.
    #[must_use]
    pub fn needs_escape(&self, code_point: u32) -> bool {
        match code_point {
            0x20 => false,
            0x22 | 0x5C => true,
            0x2011 => true,
            cp if cp < 0x20 => true,
            cp => self.table.category(cp).is_escaped(),
        }
    }

    /// Category of `code_point` as seen by this escaper.
    #[must_use]
    pub fn category(&self, code_point: u32) -> Category {
        self.table.category(code_point)
    }

    /// Returns `value` as a quoted, escaped literal.
    #[must_use]
    pub fn escape(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        self.escape_into(value, &mut out);
        out
    }

    /// Appends `value` to `out` as a quoted, escaped literal.
    pub fn escape_into(&self, value: &str, out: &mut String) {
        out.push(QUOTE);
        for ch in value.chars() {
            self.push_code_point(u32::from(ch), out);
        }
        out.push(QUOTE);
    }

    /// Escapes a sequence of UTF-16 code units.
    ///
    /// Units are classified one at a time, so both halves of a surrogate pair,
    /// as well as unpaired surrogates, come out as `\uXXXX` escapes.
    #[must_use]
    pub fn escape_utf16(&self, units: &[u16]) -> String {
        let mut out = String::with_capacity(units.len() + 2);
        out.push(QUOTE);
        for &unit in units {
            self.push_code_point(u32::from(unit), &mut out);
        }
        out.push(QUOTE);
        out
    }

    fn push_code_point(&self, code_point: u32, out: &mut String) {
        if self.needs_escape(code_point) {
            push_escape(code_point, out);
            return;
        }
        match char::from_u32(code_point) {
            Some(ch) => out.push(ch),
            None => push_escape(code_point, out),
        }
    }
}

/// Appends the escape sequence for `code_point`, regardless of whether it is needed.
pub fn push_escape(code_point: u32, out: &mut String) {
    out.push(ESCAPE);
    if let Some(letter) = named_escape(code_point) {
        out.push(letter);
    } else if code_point < 0x100 {
        out.push('x');
        out.push(hex_digit(code_point >> 4));
        out.push(hex_digit(code_point));
    } else {
        out.push('u');
        out.push(hex_digit(code_point >> 12));
        out.push(hex_digit(code_point >> 8));
        out.push(hex_digit(code_point >> 4));
        out.push(hex_digit(code_point));
    }
}
