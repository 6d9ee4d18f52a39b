//! Input locations: immutable cursor values over an [`InputBuffer`].

use serde::Serialize;

use crate::buffer::InputBuffer;

/// A position in the input, with the character found there.
///
/// Locations are cheap immutable values. They are produced by advancing
/// from prior locations, so a matching context can snapshot one on entry
/// and restore it on failure without any bookkeeping.
///
/// `ch` equals the character at `index`, or the EOI sentinel when the
/// location sits on the virtual end position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub index: u32,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
    #[serde(skip)]
    pub ch: char,
}

impl Location {
    /// The location of the first character (or of EOI for empty input).
    pub fn start_of(buffer: &InputBuffer) -> Self {
        Self {
            index: 0,
            line: 1,
            column: 1,
            ch: buffer.char_at(0),
        }
    }

    /// The successor location. Advancing past the end is a no-op.
    pub fn advance(&self, buffer: &InputBuffer) -> Self {
        if self.index as usize >= buffer.len() {
            return *self;
        }
        let (line, column) = if self.ch == '\n' {
            (self.line + 1, 1)
        } else {
            (self.line, self.column + 1)
        };
        let index = self.index + 1;
        Self {
            index,
            line,
            column,
            ch: buffer.char_at(index as usize),
        }
    }

    /// Whether this location sits on the virtual end position.
    #[inline]
    pub fn is_at_end(&self, buffer: &InputBuffer) -> bool {
        self.index as usize >= buffer.len()
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
