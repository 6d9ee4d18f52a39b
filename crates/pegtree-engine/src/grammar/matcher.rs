//! Matcher graph nodes.
//!
//! Matchers form a directed graph stored in a flat arena and referenced by
//! `MatcherId`, so forward references and recursion are ordinary index
//! values. The combinator set is closed: the engine dispatches on
//! [`MatcherKind`] rather than open subtyping.

use std::fmt;
use std::sync::Arc;

use pegtree_core::CharSet;
use pegtree_core::chars;

use crate::engine::{ActionContext, ActionError};

/// Index into the grammar's matcher arena.
pub type MatcherId = u32;

/// User predicate evaluated by an action matcher.
pub type ActionFn<V> =
    Arc<dyn Fn(&mut ActionContext<'_, V>) -> Result<bool, ActionError> + Send + Sync>;

/// Node creation and action policy, fixed per matcher at grammar
/// construction time. Contexts read these flags, never own them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatcherFlags {
    /// Succeed without contributing any parse-tree node; the whole
    /// subtree's nodes are discarded.
    pub suppress_node: bool,
    /// Contribute a node but discard its children.
    pub suppress_subnodes: bool,
    /// Contribute no node; children are promoted to the parent.
    pub skip_node: bool,
    /// Bypass action matchers while inside a lookahead.
    pub skip_actions_in_predicates: bool,
}

/// One node of the matcher graph.
pub struct Matcher<V> {
    pub(crate) kind: MatcherKind<V>,
    /// Explicit label override; rules are labeled with their name.
    pub(crate) label: Option<String>,
    pub(crate) flags: MatcherFlags,
}

impl<V> Matcher<V> {
    pub(crate) fn new(kind: MatcherKind<V>) -> Self {
        Self {
            kind,
            label: None,
            flags: MatcherFlags::default(),
        }
    }

    #[inline]
    pub fn kind(&self) -> &MatcherKind<V> {
        &self.kind
    }

    #[inline]
    pub fn flags(&self) -> MatcherFlags {
        self.flags
    }

    /// The explicit label, if one was set.
    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl<V> fmt::Debug for Matcher<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("kind", &self.kind)
            .field("label", &self.label)
            .field("flags", &self.flags)
            .finish()
    }
}

/// The closed sum of combinator variants.
pub enum MatcherKind<V> {
    /// Single character; the ANY/EOI/EMPTY sentinels get special handling.
    Char(char),
    /// Single character, matched case-insensitively.
    CharIgnoreCase(char),
    /// Inclusive character range.
    CharRange { lo: char, hi: char },
    /// Character set membership.
    AnyOf(CharSet),
    /// Full literal sequence.
    Literal(String),
    /// Full literal sequence, matched case-insensitively per char.
    LiteralIgnoreCase(String),
    /// Ordered choice over literal strings as a single leaf.
    FirstOfStrings(Vec<String>),
    /// All children in order.
    Sequence(Vec<MatcherId>),
    /// Children tried in declaration order, committing on first success.
    FirstOf(Vec<MatcherId>),
    ZeroOrMore(MatcherId),
    OneOrMore(MatcherId),
    Optional(MatcherId),
    /// Positive lookahead.
    Test(MatcherId),
    /// Negative lookahead.
    TestNot(MatcherId),
    /// User predicate over the value stack and parent context.
    Action(ActionFn<V>),
    /// Lazily resolved rule reference; `None` until the builder resolves
    /// it against the rule registry.
    Proxy(Option<MatcherId>),
}

impl<V> MatcherKind<V> {
    /// Structural description used when no explicit label is set.
    pub fn default_label(&self) -> String {
        match self {
            MatcherKind::Char(c) if chars::is_sentinel(*c) => chars::display_char(*c),
            MatcherKind::Char(c) => format!("'{}'", chars::display_char(*c)),
            MatcherKind::CharIgnoreCase(c) => format!("'{}'i", chars::display_char(*c)),
            MatcherKind::CharRange { lo, hi } => {
                format!("{}..{}", chars::display_char(*lo), chars::display_char(*hi))
            }
            MatcherKind::AnyOf(set) => set.to_string(),
            MatcherKind::Literal(s) => format!("\"{s}\""),
            MatcherKind::LiteralIgnoreCase(s) => format!("\"{s}\"i"),
            MatcherKind::FirstOfStrings(_) => "FirstOf".to_string(),
            MatcherKind::Sequence(_) => "Sequence".to_string(),
            MatcherKind::FirstOf(_) => "FirstOf".to_string(),
            MatcherKind::ZeroOrMore(_) => "ZeroOrMore".to_string(),
            MatcherKind::OneOrMore(_) => "OneOrMore".to_string(),
            MatcherKind::Optional(_) => "Optional".to_string(),
            MatcherKind::Test(_) => "Test".to_string(),
            MatcherKind::TestNot(_) => "TestNot".to_string(),
            MatcherKind::Action(_) => "Action".to_string(),
            MatcherKind::Proxy(_) => "Proxy".to_string(),
        }
    }

    /// Child matcher ids, in declaration order.
    pub fn children(&self) -> &[MatcherId] {
        match self {
            MatcherKind::Sequence(ids) | MatcherKind::FirstOf(ids) => ids,
            MatcherKind::ZeroOrMore(id)
            | MatcherKind::OneOrMore(id)
            | MatcherKind::Optional(id)
            | MatcherKind::Test(id)
            | MatcherKind::TestNot(id) => std::slice::from_ref(id),
            _ => &[],
        }
    }
}

impl<V> fmt::Debug for MatcherKind<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatcherKind::Char(c) => f.debug_tuple("Char").field(c).finish(),
            MatcherKind::CharIgnoreCase(c) => f.debug_tuple("CharIgnoreCase").field(c).finish(),
            MatcherKind::CharRange { lo, hi } => f
                .debug_struct("CharRange")
                .field("lo", lo)
                .field("hi", hi)
                .finish(),
            MatcherKind::AnyOf(set) => f.debug_tuple("AnyOf").field(set).finish(),
            MatcherKind::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            MatcherKind::LiteralIgnoreCase(s) => {
                f.debug_tuple("LiteralIgnoreCase").field(s).finish()
            }
            MatcherKind::FirstOfStrings(options) => {
                f.debug_tuple("FirstOfStrings").field(options).finish()
            }
            MatcherKind::Sequence(ids) => f.debug_tuple("Sequence").field(ids).finish(),
            MatcherKind::FirstOf(ids) => f.debug_tuple("FirstOf").field(ids).finish(),
            MatcherKind::ZeroOrMore(id) => f.debug_tuple("ZeroOrMore").field(id).finish(),
            MatcherKind::OneOrMore(id) => f.debug_tuple("OneOrMore").field(id).finish(),
            MatcherKind::Optional(id) => f.debug_tuple("Optional").field(id).finish(),
            MatcherKind::Test(id) => f.debug_tuple("Test").field(id).finish(),
            MatcherKind::TestNot(id) => f.debug_tuple("TestNot").field(id).finish(),
            MatcherKind::Action(_) => f.write_str("Action(..)"),
            MatcherKind::Proxy(target) => f.debug_tuple("Proxy").field(target).finish(),
        }
    }
}
