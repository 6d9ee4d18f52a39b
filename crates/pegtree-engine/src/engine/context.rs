//! Shared run state and the action-facing context facade.

use pegtree_core::navigation::{collect_by_label, collect_by_path, find_by_path};
use pegtree_core::{InputBuffer, Location, ParseNode, ValueStack};

use crate::grammar::MatcherId;

use super::parser::RunLimits;

/// Mutable state shared by every matcher invocation of one parse.
///
/// Per-invocation frames (start snapshot, accumulator watermark) live on
/// the runner's call stack; everything that must be visible across frames
/// is threaded here by `&mut`. The `nodes` accumulator is shared: each
/// invocation remembers its watermark on entry and truncates back to it
/// on failure, which is what makes try-and-restore cheap.
pub(crate) struct RunState<'i, V> {
    pub buffer: &'i InputBuffer,
    pub location: Location,
    /// Subnode accumulator for the whole parse, watermark-sliced per
    /// invocation.
    pub nodes: Vec<ParseNode<V>>,
    pub stack: ValueStack<V>,
    /// Nonzero while inside a lookahead.
    pub predicate_depth: u32,
    /// Active skip-actions-in-predicates flag; the innermost entered rule
    /// decides.
    pub skip_actions: bool,
    pub recursion_depth: u32,
    pub limits: RunLimits,
    /// Deepest location reached outside lookaheads.
    pub deepest: Location,
    /// Labels of terminals that failed at the deepest location.
    pub expected: Vec<String>,
    /// Ids of the active (non-proxy) matcher invocations.
    pub trail: Vec<MatcherId>,
}

/// Read/write window handed to a user action predicate.
///
/// The view covers the parent context's subnode accumulator so far (not a
/// finalized tree), the shared value stack, and the value slot of the
/// nearest node-producing invocation.
pub struct ActionContext<'a, V> {
    pub(crate) buffer: &'a InputBuffer,
    pub(crate) current: Location,
    pub(crate) start: Location,
    pub(crate) sub_nodes: &'a [ParseNode<V>],
    pub(crate) stack: &'a mut ValueStack<V>,
    pub(crate) value_slot: &'a mut Option<V>,
    pub(crate) path: &'a str,
    pub(crate) in_predicate: bool,
}

impl<V> ActionContext<'_, V> {
    /// The current input location.
    pub fn current_location(&self) -> Location {
        self.current
    }

    /// Where the enclosing matcher started.
    pub fn start_location(&self) -> Location {
        self.start
    }

    /// The parent context's accumulated subnodes so far.
    pub fn sub_nodes(&self) -> &[ParseNode<V>] {
        self.sub_nodes
    }

    /// First already-matched node addressed by a label-prefix path.
    pub fn node_by_path(&self, path: &str) -> Option<&ParseNode<V>> {
        find_by_path(self.sub_nodes, path)
    }

    /// All already-matched nodes addressed by a label-prefix path.
    pub fn collect_by_path(&self, path: &str) -> Vec<&ParseNode<V>> {
        collect_by_path(self.sub_nodes, path)
    }

    /// All already-matched nodes whose label starts with `prefix`.
    pub fn node_by_label(&self, prefix: &str) -> Vec<&ParseNode<V>> {
        collect_by_label(self.sub_nodes, prefix)
    }

    /// The input text covered by `node`.
    pub fn node_text(&self, node: &ParseNode<V>) -> String {
        node.text(self.buffer)
    }

    /// The single character covered by `node`, if it covers exactly one.
    pub fn node_char(&self, node: &ParseNode<V>) -> Option<char> {
        (node.char_count() == 1).then(|| self.buffer.char_at(node.start.index as usize))
    }

    /// Active matcher labels, `/`-joined from the root.
    pub fn path(&self) -> &str {
        self.path
    }

    /// Whether the action runs inside a lookahead.
    pub fn in_predicate(&self) -> bool {
        self.in_predicate
    }

    /// The shared value stack.
    pub fn stack(&self) -> &ValueStack<V> {
        self.stack
    }

    pub fn stack_mut(&mut self) -> &mut ValueStack<V> {
        self.stack
    }

    /// Attach a value to the node of the nearest node-producing
    /// invocation currently on the stack.
    pub fn set_node_value(&mut self, value: V) {
        *self.value_slot = Some(value);
    }

    /// The value attached so far, if any.
    pub fn node_value(&self) -> Option<&V> {
        self.value_slot.as_ref()
    }
}
