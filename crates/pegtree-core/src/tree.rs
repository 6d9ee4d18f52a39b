//! Parse-tree nodes.

use serde::Serialize;

use crate::buffer::InputBuffer;
use crate::location::Location;

/// One matched rule invocation, immutable once created.
///
/// Children are strictly ordered by start location and never overlap;
/// their ranges are contained in the parent's `[start, end)` range. The
/// `value` slot holds whatever a user action attached while the node's
/// matcher invocation was running.
#[derive(Clone, Debug, Serialize)]
pub struct ParseNode<V> {
    pub label: String,
    pub start: Location,
    /// Exclusive upper bound.
    pub end: Location,
    pub children: Vec<ParseNode<V>>,
    pub value: Option<V>,
}

impl<V> ParseNode<V> {
    pub fn new(
        label: String,
        start: Location,
        end: Location,
        children: Vec<ParseNode<V>>,
        value: Option<V>,
    ) -> Self {
        Self {
            label,
            start,
            end,
            children,
            value,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of characters covered by the node.
    #[inline]
    pub fn char_count(&self) -> usize {
        (self.end.index - self.start.index) as usize
    }

    /// The matched text, extracted from the buffer.
    pub fn text(&self, buffer: &InputBuffer) -> String {
        buffer.extract(self.start.index as usize..self.end.index as usize)
    }

    /// Indented one-node-per-line dump, for debugging and tests.
    pub fn format(&self, buffer: &InputBuffer) -> String {
        let mut out = String::new();
        format_node(&mut out, self, buffer, 0);
        out
    }
}

/// Format a sequence of sibling nodes (e.g. a context's accumulator).
pub fn format_forest<V>(nodes: &[ParseNode<V>], buffer: &InputBuffer) -> String {
    let mut out = String::new();
    for node in nodes {
        format_node(&mut out, node, buffer, 0);
    }
    out
}

fn format_node<V>(out: &mut String, node: &ParseNode<V>, buffer: &InputBuffer, indent: usize) {
    out.push_str(&" ".repeat(indent));
    out.push_str(&node.label);
    out.push_str(&format!(
        " [{}..{})",
        node.start.index, node.end.index
    ));
    if node.is_leaf() {
        out.push_str(" \"");
        out.push_str(&escape_text(&node.text(buffer)));
        out.push('"');
    }
    out.push('\n');
    for child in &node.children {
        format_node(out, child, buffer, indent + 2);
    }
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}
