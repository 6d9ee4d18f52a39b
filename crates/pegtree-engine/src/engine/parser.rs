//! The parse driver: seeds the root context, runs the start matcher, and
//! packages the result.

use pegtree_core::{InputBuffer, Location, ValueStack};

use crate::grammar::Grammar;

use super::context::RunState;
use super::error::RuntimeError;
use super::result::{ParseFailure, ParsingResult};
use super::runner::Runner;
use super::trace::{NoopTracer, Tracer};

/// Runtime limits for a parse run.
#[derive(Clone, Copy, Debug)]
pub struct RunLimits {
    /// Maximum nested rule invocations (default: 1,024).
    pub(crate) recursion_limit: u32,
}

impl Default for RunLimits {
    fn default() -> Self {
        Self {
            recursion_limit: 1024,
        }
    }
}

impl RunLimits {
    /// Create new limits with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the recursion limit.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}

/// Drives a grammar's start matcher over one input at a time.
///
/// The parser borrows nothing mutable between runs, so one instance can
/// serve any number of sequential parses; concurrent parses each build
/// their own parser over a shared grammar.
pub struct Parser<V> {
    grammar: Grammar<V>,
    limits: RunLimits,
}

impl<V> Parser<V> {
    pub fn new(grammar: Grammar<V>) -> Self {
        Self {
            grammar,
            limits: RunLimits::default(),
        }
    }

    /// Set the runtime limits.
    pub fn limits(mut self, limits: RunLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn grammar(&self) -> &Grammar<V> {
        &self.grammar
    }

    /// Run the start matcher over `input`.
    ///
    /// This is a convenience method that uses `NoopTracer`, which gets
    /// completely optimized away at compile time.
    pub fn parse(&self, input: &str) -> Result<ParsingResult<V>, RuntimeError> {
        self.parse_with(input, &mut NoopTracer)
    }

    /// Run the start matcher with a tracer for debugging.
    pub fn parse_with<T: Tracer>(
        &self,
        input: &str,
        tracer: &mut T,
    ) -> Result<ParsingResult<V>, RuntimeError> {
        let buffer = InputBuffer::new(input);
        let start_location = Location::start_of(&buffer);
        let start_id = self.grammar.start();

        let state = RunState {
            buffer: &buffer,
            location: start_location,
            nodes: Vec::new(),
            stack: ValueStack::new(),
            predicate_depth: 0,
            skip_actions: false,
            recursion_depth: 0,
            limits: self.limits,
            deepest: start_location,
            expected: Vec::new(),
            trail: Vec::new(),
        };
        let mut runner = Runner {
            grammar: &self.grammar,
            state,
            tracer,
        };

        let mut root_value = None;
        let matched = runner.run(start_id, 0, start_location, &mut root_value)?;

        let RunState {
            nodes,
            stack,
            deepest,
            expected,
            ..
        } = runner.state;

        let tree = if matched {
            nodes.into_iter().next()
        } else {
            None
        };
        let failure = (!matched).then_some(ParseFailure {
            location: deepest,
            expected,
        });

        Ok(ParsingResult {
            matched,
            tree,
            stack,
            buffer,
            failure,
        })
    }
}
