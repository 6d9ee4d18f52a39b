//! Starter-set analysis.
//!
//! The starter set of a matcher is the set of first characters on which it
//! can possibly succeed. Zero-width matchers contribute the EMPTY
//! sentinel, which sequences use to decide whether later children can also
//! start the sequence. The analysis is cycle-safe: a rule reached again
//! while its own set is being computed contributes nothing to itself.

use std::collections::HashSet;

use pegtree_core::CharSet;
use pegtree_core::chars;

use super::builder::Grammar;
use super::matcher::{MatcherId, MatcherKind};

impl<V> Grammar<V> {
    /// First characters on which the matcher at `id` can succeed.
    pub fn starter_set(&self, id: MatcherId) -> CharSet {
        let mut visiting = HashSet::new();
        self.starter(id, &mut visiting)
    }

    fn starter(&self, id: MatcherId, visiting: &mut HashSet<MatcherId>) -> CharSet {
        if !visiting.insert(id) {
            return CharSet::empty();
        }
        let set = match &self.matcher(id).kind {
            MatcherKind::Char(c) => CharSet::single(*c),
            MatcherKind::CharIgnoreCase(c) => {
                let mut set = CharSet::single(*c);
                for folded in c.to_lowercase().chain(c.to_uppercase()) {
                    set = set.with(folded);
                }
                set
            }
            MatcherKind::CharRange { lo, hi } => CharSet::range(*lo, *hi),
            MatcherKind::AnyOf(set) => set.clone(),
            MatcherKind::Literal(s) => starter_of_literal(s, false),
            MatcherKind::LiteralIgnoreCase(s) => starter_of_literal(s, true),
            MatcherKind::FirstOfStrings(options) => options
                .iter()
                .fold(CharSet::empty(), |acc, s| {
                    acc.union(&starter_of_literal(s, false))
                }),
            MatcherKind::Sequence(ids) => {
                let mut acc = CharSet::empty();
                let mut all_empty = true;
                for &child in ids {
                    let s = self.starter(child, visiting);
                    acc = acc.union(&s.without(chars::EMPTY));
                    if !s.matches_empty() {
                        all_empty = false;
                        break;
                    }
                }
                if all_empty {
                    acc = acc.with(chars::EMPTY);
                }
                acc
            }
            MatcherKind::FirstOf(ids) => ids.iter().fold(CharSet::empty(), |acc, &child| {
                acc.union(&self.starter(child, visiting))
            }),
            MatcherKind::ZeroOrMore(child) | MatcherKind::Optional(child) => {
                self.starter(*child, visiting).with(chars::EMPTY)
            }
            MatcherKind::OneOrMore(child) => self.starter(*child, visiting),
            MatcherKind::Test(child) => self.starter(*child, visiting),
            MatcherKind::TestNot(child) => self.starter(*child, visiting).complement(),
            MatcherKind::Action(_) => CharSet::single(chars::EMPTY),
            MatcherKind::Proxy(Some(target)) => self.starter(*target, visiting),
            MatcherKind::Proxy(None) => CharSet::empty(),
        };
        visiting.remove(&id);
        set
    }
}

fn starter_of_literal(s: &str, ignore_case: bool) -> CharSet {
    match s.chars().next() {
        None => CharSet::single(chars::EMPTY),
        Some(first) if ignore_case => {
            let mut set = CharSet::single(first);
            for folded in first.to_lowercase().chain(first.to_uppercase()) {
                set = set.with(folded);
            }
            set
        }
        Some(first) => CharSet::single(first),
    }
}
