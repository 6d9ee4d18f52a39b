//! Parse run results.

use serde::Serialize;

use pegtree_core::{InputBuffer, Location, ParseNode, ValueStack};

use super::diagnostics::FailurePrinter;

/// Structured diagnostic for a failed parse: the deepest input location
/// reached and the labels of the matchers that failed there.
#[derive(Debug, Clone, Serialize)]
pub struct ParseFailure {
    pub location: Location,
    pub expected: Vec<String>,
}

impl ParseFailure {
    /// One-line summary, e.g. `expected one of: 'a', 'b'`.
    pub fn message(&self) -> String {
        match self.expected.as_slice() {
            [] => "unexpected input".to_string(),
            [single] => format!("expected {single}"),
            many => format!("expected one of: {}", many.join(", ")),
        }
    }
}

/// The outcome of one parse run.
///
/// A failed match is a regular outcome, not an error: `matched` is false
/// and `failure` carries the diagnostic, while the value stack and input
/// buffer are returned either way.
#[derive(Debug)]
pub struct ParsingResult<V> {
    pub matched: bool,
    /// Root of the parse tree; `None` on failure or when the start
    /// matcher suppresses its own node.
    pub tree: Option<ParseNode<V>>,
    /// Final state of the shared value stack.
    pub stack: ValueStack<V>,
    pub buffer: InputBuffer,
    pub failure: Option<ParseFailure>,
}

impl<V> ParsingResult<V> {
    #[inline]
    pub fn is_success(&self) -> bool {
        self.matched
    }

    /// Indented dump of the parse tree, empty when there is none.
    pub fn format_tree(&self) -> String {
        match &self.tree {
            Some(tree) => tree.format(&self.buffer),
            None => String::new(),
        }
    }

    /// Printer for the failure diagnostic, if the parse failed.
    pub fn failure_printer(&self) -> Option<FailurePrinter<'_>> {
        self.failure
            .as_ref()
            .map(|failure| FailurePrinter::new(failure, &self.buffer))
    }
}
