//! Reserved sentinel characters used by the matching engine.
//!
//! The character alphabet is extended with three sentinels, all taken from
//! the Unicode noncharacter block so they cannot collide with well-formed
//! input. Input containing noncharacters is outside the engine's contract.

/// Virtual end-of-input character, reported at position `len`.
pub const EOI: char = '\u{FFFF}';

/// Matches any single real input character.
pub const ANY: char = '\u{FDD4}';

/// Matches the empty string, never consuming input.
pub const EMPTY: char = '\u{FDD5}';

/// Whether `c` is one of the reserved sentinel characters.
pub fn is_sentinel(c: char) -> bool {
    c == EOI || c == ANY || c == EMPTY
}

/// Case-insensitive character comparison using full Unicode lowercasing.
pub fn eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Printable name of a character for labels and diagnostics.
///
/// Sentinels get their symbolic names, control characters are escaped.
pub fn display_char(c: char) -> String {
    match c {
        EOI => "EOI".to_string(),
        ANY => "ANY".to_string(),
        EMPTY => "EMPTY".to_string(),
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        c if c.is_control() => format!("\\u{{{:04x}}}", c as u32),
        c => c.to_string(),
    }
}
