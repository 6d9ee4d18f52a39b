//! Grammar construction: the matcher arena and its builder.

use indexmap::IndexMap;

use pegtree_core::CharSet;
use pegtree_core::chars;

use crate::engine::{ActionContext, ActionError};

use super::matcher::{ActionFn, Matcher, MatcherId, MatcherKind};

/// Errors detected while a grammar is being assembled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    /// A `rule_ref` names a rule that was never installed.
    #[error("rule `{name}` is referenced but never defined")]
    UnresolvedRule { name: String },

    /// The same rule name was installed twice.
    #[error("rule `{name}` is defined more than once")]
    DuplicateRule { name: String },

    /// The start rule names a rule that was never installed.
    #[error("start rule `{name}` is not defined")]
    UnknownStartRule { name: String },

    /// `finish` was called without selecting a start rule.
    #[error("grammar has no start rule")]
    MissingStart,
}

/// An immutable matcher graph rooted at a start rule.
///
/// Grammars are freely shareable across parses once built; two concurrent
/// parses over the same grammar each construct their own driver.
#[derive(Debug)]
pub struct Grammar<V> {
    matchers: Vec<Matcher<V>>,
    rules: IndexMap<String, MatcherId>,
    start: MatcherId,
}

impl<V> Grammar<V> {
    #[inline]
    pub fn matcher(&self, id: MatcherId) -> &Matcher<V> {
        &self.matchers[id as usize]
    }

    /// Id of the start matcher.
    #[inline]
    pub fn start(&self) -> MatcherId {
        self.start
    }

    /// Look up an installed rule by name.
    pub fn rule(&self, name: &str) -> Option<MatcherId> {
        self.rules.get(name).copied()
    }

    /// Installed rules in declaration order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, MatcherId)> {
        self.rules.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Label used for nodes produced by `id`: the explicit label if set,
    /// the target's label for proxies, the structural description
    /// otherwise.
    pub fn label_of(&self, id: MatcherId) -> String {
        let m = self.matcher(id);
        if let Some(label) = &m.label {
            return label.clone();
        }
        if let MatcherKind::Proxy(Some(target)) = m.kind {
            return self.label_of(target);
        }
        m.kind.default_label()
    }
}

/// Builder assembling a [`Grammar`].
///
/// Combinator constructors append to the arena and return the new
/// matcher's id. Rule proxies created with [`rule_ref`](Self::rule_ref)
/// are resolved against the rule registry at [`finish`](Self::finish),
/// which is what allows forward references and recursion.
pub struct GrammarBuilder<V> {
    matchers: Vec<Matcher<V>>,
    rules: IndexMap<String, MatcherId>,
    /// Unresolved proxies: arena id and referenced rule name.
    pending: Vec<(MatcherId, String)>,
    start: Option<String>,
    duplicate: Option<String>,
}

impl<V> Default for GrammarBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> GrammarBuilder<V> {
    pub fn new() -> Self {
        Self {
            matchers: Vec::new(),
            rules: IndexMap::new(),
            pending: Vec::new(),
            start: None,
            duplicate: None,
        }
    }

    fn add(&mut self, kind: MatcherKind<V>) -> MatcherId {
        let id = self.matchers.len() as MatcherId;
        self.matchers.push(Matcher::new(kind));
        id
    }

    /// Matcher for a single character.
    pub fn ch(&mut self, c: char) -> MatcherId {
        self.add(MatcherKind::Char(c))
    }

    /// Matcher for a single character, case-insensitive.
    pub fn ch_ignore_case(&mut self, c: char) -> MatcherId {
        self.add(MatcherKind::CharIgnoreCase(c))
    }

    /// Matcher accepting any single real character.
    pub fn any(&mut self) -> MatcherId {
        self.add(MatcherKind::Char(chars::ANY))
    }

    /// Matcher accepting only the virtual end of input.
    pub fn eoi(&mut self) -> MatcherId {
        self.add(MatcherKind::Char(chars::EOI))
    }

    /// Matcher that always succeeds without consuming input.
    pub fn empty(&mut self) -> MatcherId {
        self.add(MatcherKind::Char(chars::EMPTY))
    }

    /// Matcher for the inclusive range `lo..=hi`.
    pub fn ch_range(&mut self, lo: char, hi: char) -> MatcherId {
        self.add(MatcherKind::CharRange { lo, hi })
    }

    /// Matcher accepting any character of `set`.
    pub fn any_of(&mut self, set: &str) -> MatcherId {
        self.add(MatcherKind::AnyOf(CharSet::of(set.chars())))
    }

    /// Matcher accepting any character of an explicit [`CharSet`].
    pub fn any_of_set(&mut self, set: CharSet) -> MatcherId {
        self.add(MatcherKind::AnyOf(set))
    }

    /// Matcher accepting any real character not in `set`.
    ///
    /// End of input is excluded as well, so the matcher always consumes.
    pub fn none_of(&mut self, set: &str) -> MatcherId {
        let excluded = CharSet::of(set.chars()).with(chars::EOI);
        self.add(MatcherKind::AnyOf(excluded.complement()))
    }

    /// Matcher for a literal string. The empty string matches without
    /// consuming input.
    pub fn string(&mut self, s: &str) -> MatcherId {
        self.add(MatcherKind::Literal(s.to_owned()))
    }

    /// Matcher for a literal string, case-insensitive per character.
    pub fn string_ignore_case(&mut self, s: &str) -> MatcherId {
        self.add(MatcherKind::LiteralIgnoreCase(s.to_owned()))
    }

    /// Single leaf trying each literal in declaration order.
    pub fn first_of_strings(&mut self, options: &[&str]) -> MatcherId {
        let options = options.iter().map(|s| (*s).to_owned()).collect();
        self.add(MatcherKind::FirstOfStrings(options))
    }

    /// All children in order.
    pub fn seq(&mut self, children: impl IntoIterator<Item = MatcherId>) -> MatcherId {
        self.add(MatcherKind::Sequence(children.into_iter().collect()))
    }

    /// Ordered choice: children tried in order, committing on the first
    /// success.
    pub fn first_of(&mut self, children: impl IntoIterator<Item = MatcherId>) -> MatcherId {
        self.add(MatcherKind::FirstOf(children.into_iter().collect()))
    }

    pub fn zero_or_more(&mut self, child: MatcherId) -> MatcherId {
        self.add(MatcherKind::ZeroOrMore(child))
    }

    pub fn one_or_more(&mut self, child: MatcherId) -> MatcherId {
        self.add(MatcherKind::OneOrMore(child))
    }

    pub fn optional(&mut self, child: MatcherId) -> MatcherId {
        self.add(MatcherKind::Optional(child))
    }

    /// Positive lookahead over `child`.
    pub fn test(&mut self, child: MatcherId) -> MatcherId {
        self.add(MatcherKind::Test(child))
    }

    /// Negative lookahead over `child`.
    pub fn test_not(&mut self, child: MatcherId) -> MatcherId {
        self.add(MatcherKind::TestNot(child))
    }

    /// Action matcher evaluating a user predicate.
    pub fn action<F>(&mut self, f: F) -> MatcherId
    where
        F: Fn(&mut ActionContext<'_, V>) -> Result<bool, ActionError> + Send + Sync + 'static,
    {
        let f: ActionFn<V> = std::sync::Arc::new(f);
        self.add(MatcherKind::Action(f))
    }

    /// Install `id` as the rule `name` and label it with the name.
    ///
    /// Returns `id` for chaining. Duplicate installs are reported at
    /// [`finish`](Self::finish).
    pub fn rule(&mut self, name: &str, id: MatcherId) -> MatcherId {
        if self.rules.contains_key(name) {
            if self.duplicate.is_none() {
                self.duplicate = Some(name.to_owned());
            }
            return id;
        }
        self.rules.insert(name.to_owned(), id);
        if self.matchers[id as usize].label.is_none() {
            self.matchers[id as usize].label = Some(name.to_owned());
        }
        id
    }

    /// Proxy matcher referencing the rule `name`, resolved at
    /// [`finish`](Self::finish). Allows forward references and recursion.
    pub fn rule_ref(&mut self, name: &str) -> MatcherId {
        let id = self.add(MatcherKind::Proxy(None));
        self.pending.push((id, name.to_owned()));
        id
    }

    /// Override the label of `id`.
    pub fn label(&mut self, id: MatcherId, label: &str) -> MatcherId {
        self.matchers[id as usize].label = Some(label.to_owned());
        id
    }

    /// Succeed without contributing any parse-tree node.
    pub fn suppress_node(&mut self, id: MatcherId) -> MatcherId {
        self.matchers[id as usize].flags.suppress_node = true;
        id
    }

    /// Contribute a node but discard its children.
    pub fn suppress_subnodes(&mut self, id: MatcherId) -> MatcherId {
        self.matchers[id as usize].flags.suppress_subnodes = true;
        id
    }

    /// Contribute no node and promote children to the parent.
    pub fn skip_node(&mut self, id: MatcherId) -> MatcherId {
        self.matchers[id as usize].flags.skip_node = true;
        id
    }

    /// Bypass action matchers below `id` while inside a lookahead.
    pub fn skip_actions_in_predicates(&mut self, id: MatcherId) -> MatcherId {
        self.matchers[id as usize].flags.skip_actions_in_predicates = true;
        id
    }

    /// Select the start rule by name.
    pub fn start(&mut self, name: &str) {
        self.start = Some(name.to_owned());
    }

    /// Resolve all proxies and produce the immutable grammar.
    pub fn finish(mut self) -> Result<Grammar<V>, GrammarError> {
        if let Some(name) = self.duplicate {
            return Err(GrammarError::DuplicateRule { name });
        }
        for (id, name) in std::mem::take(&mut self.pending) {
            let Some(&target) = self.rules.get(&name) else {
                return Err(GrammarError::UnresolvedRule { name });
            };
            self.matchers[id as usize].kind = MatcherKind::Proxy(Some(target));
        }
        let start_name = self.start.ok_or(GrammarError::MissingStart)?;
        let Some(&start) = self.rules.get(&start_name) else {
            return Err(GrammarError::UnknownStartRule { name: start_name });
        };
        Ok(Grammar {
            matchers: self.matchers,
            rules: self.rules,
            start,
        })
    }
}
