//! pegtree: a recursive-descent PEG matcher runtime.
//!
//! Grammars are assembled as a graph of matcher combinators and executed
//! over fully materialized input, producing a typed parse tree plus any
//! value computed by user actions on the shared value stack.
//!
//! # Example
//!
//! ```
//! use pegtree_engine::{GrammarBuilder, Parser};
//!
//! let mut b = GrammarBuilder::<()>::new();
//! let a = b.ch('a');
//! let bb = b.ch('b');
//! let s = b.seq([a, bb]);
//! b.rule("S", s);
//! b.start("S");
//! let grammar = b.finish().expect("valid grammar");
//!
//! let result = Parser::new(grammar).parse("ab").expect("no fatal error");
//! assert!(result.is_success());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;
pub mod grammar;

pub use engine::{
    ActionContext, ActionError, FailurePrinter, NoopTracer, ParseFailure, Parser, ParsingResult,
    PrintTracer, RunLimits, RuntimeError, Tracer, Verbosity,
};
pub use grammar::{
    ActionFn, Grammar, GrammarBuilder, GrammarError, Matcher, MatcherFlags, MatcherId, MatcherKind,
};

// Re-export the core data types alongside the runtime.
pub use pegtree_core::{
    CharSet, InputBuffer, Location, ParseNode, Position, ValueStack, format_forest,
};
