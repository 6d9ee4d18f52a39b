//! Grammar construction: the matcher arena, builder, and static analysis.

mod builder;
mod matcher;
mod starters;

#[cfg(test)]
mod builder_tests;

pub use builder::{Grammar, GrammarBuilder, GrammarError};
pub use matcher::{ActionFn, Matcher, MatcherFlags, MatcherId, MatcherKind};
