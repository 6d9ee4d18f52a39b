//! Recursive descent over the matcher arena.
//!
//! Every matcher invocation brackets one call to [`Runner::run`]: the
//! entry location and the accumulator watermark are snapshotted on entry,
//! and the failure path restores both, so no residual subnode or cursor
//! advance can escape a failed attempt. This try-and-restore property is
//! the keystone invariant; every composite below preserves it
//! recursively.

use pegtree_core::chars;
use pegtree_core::{Location, ParseNode};

use crate::grammar::{ActionFn, Grammar, Matcher, MatcherId, MatcherKind};

use super::context::{ActionContext, RunState};
use super::error::RuntimeError;
use super::trace::Tracer;

pub(crate) struct Runner<'g, 'i, 't, V, T: Tracer> {
    pub grammar: &'g Grammar<V>,
    pub state: RunState<'i, V>,
    pub tracer: &'t mut T,
}

impl<'g, V, T: Tracer> Runner<'g, '_, '_, V, T> {
    /// Attempt the matcher at `id` at the current location.
    ///
    /// On success the location has advanced by exactly the consumed
    /// characters and, unless suppressed, exactly one node was appended
    /// after `parent_watermark`. On failure both are unchanged.
    ///
    /// The `parent_*` arguments describe the invoking context's frame;
    /// action matchers read the parent's accumulator through them and
    /// write the parent's node value slot.
    pub fn run(
        &mut self,
        id: MatcherId,
        parent_watermark: usize,
        parent_start: Location,
        parent_value: &mut Option<V>,
    ) -> Result<bool, RuntimeError> {
        let grammar = self.grammar;
        let matcher = grammar.matcher(id);
        let start = self.state.location;
        let watermark = self.state.nodes.len();
        let is_proxy = matches!(matcher.kind, MatcherKind::Proxy(_));

        if !is_proxy {
            self.state.trail.push(id);
        }
        self.note_entry();
        if T::ACTIVE {
            let label = grammar.label_of(id);
            self.tracer.trace_enter(&label, start);
        }

        // The flag inherits downward; rules entered through a proxy reset
        // it from their own flags (innermost rule wins).
        let saved_skip = (matcher.flags.skip_actions_in_predicates && !is_proxy)
            .then(|| std::mem::replace(&mut self.state.skip_actions, true));

        let mut node_value: Option<V> = None;
        let matched = self.dispatch(
            matcher,
            id,
            watermark,
            start,
            &mut node_value,
            parent_watermark,
            parent_start,
            parent_value,
        )?;

        if let Some(prev) = saved_skip {
            self.state.skip_actions = prev;
        }

        if matched {
            self.emit_node(matcher, id, start, watermark, node_value);
            if T::ACTIVE {
                let label = grammar.label_of(id);
                self.tracer.trace_success(&label, start, self.state.location);
            }
        } else {
            self.state.location = start;
            self.state.nodes.truncate(watermark);
            if T::ACTIVE {
                let label = grammar.label_of(id);
                self.tracer.trace_failure(&label, start);
            }
        }
        if !is_proxy {
            self.state.trail.pop();
        }
        Ok(matched)
    }

    #[allow(clippy::too_many_arguments)]
    fn dispatch(
        &mut self,
        matcher: &'g Matcher<V>,
        id: MatcherId,
        watermark: usize,
        start: Location,
        node_value: &mut Option<V>,
        parent_watermark: usize,
        parent_start: Location,
        parent_value: &mut Option<V>,
    ) -> Result<bool, RuntimeError> {
        let matched = match &matcher.kind {
            MatcherKind::Char(c) => self.match_char(id, *c),
            MatcherKind::CharIgnoreCase(c) => {
                let ch = self.state.location.ch;
                self.match_if(id, !self.at_end() && chars::eq_ignore_case(ch, *c))
            }
            MatcherKind::CharRange { lo, hi } => {
                let ch = self.state.location.ch;
                self.match_if(id, *lo <= ch && ch <= *hi)
            }
            MatcherKind::AnyOf(set) => {
                let ch = self.state.location.ch;
                self.match_if(id, set.contains(ch))
            }
            MatcherKind::Literal(s) => {
                let ok = self.match_literal(s, false);
                if !ok {
                    self.note_failure(id);
                }
                ok
            }
            MatcherKind::LiteralIgnoreCase(s) => {
                let ok = self.match_literal(s, true);
                if !ok {
                    self.note_failure(id);
                }
                ok
            }
            MatcherKind::FirstOfStrings(options) => {
                let ok = options.iter().any(|s| self.match_literal(s, false));
                if !ok {
                    self.note_failure(id);
                }
                ok
            }
            MatcherKind::Sequence(ids) => {
                let mut ok = true;
                for &child in ids {
                    if !self.run(child, watermark, start, node_value)? {
                        ok = false;
                        break;
                    }
                }
                ok
            }
            MatcherKind::FirstOf(ids) => {
                let mut ok = false;
                for &child in ids {
                    if self.run(child, watermark, start, node_value)? {
                        ok = true;
                        break;
                    }
                }
                ok
            }
            MatcherKind::ZeroOrMore(child) => {
                self.repeat(*child, id, watermark, start, node_value)?;
                true
            }
            MatcherKind::OneOrMore(child) => {
                if !self.run(*child, watermark, start, node_value)? {
                    false
                } else {
                    self.repeat(*child, id, watermark, start, node_value)?;
                    true
                }
            }
            MatcherKind::Optional(child) => {
                self.run(*child, watermark, start, node_value)?;
                true
            }
            MatcherKind::Test(child) => self.lookahead(*child, watermark, start, node_value)?,
            MatcherKind::TestNot(child) => !self.lookahead(*child, watermark, start, node_value)?,
            MatcherKind::Action(f) => {
                self.run_action(f, parent_watermark, parent_start, parent_value)?
            }
            MatcherKind::Proxy(target) => self.run_proxy(
                matcher,
                *target,
                watermark,
                parent_watermark,
                parent_start,
                parent_value,
            )?,
        };
        Ok(matched)
    }

    /// Repeat `child` until it fails or stops consuming input. A
    /// successful zero-width iteration terminates the loop; letting it
    /// continue would never make progress again.
    fn repeat(
        &mut self,
        child: MatcherId,
        id: MatcherId,
        watermark: usize,
        start: Location,
        node_value: &mut Option<V>,
    ) -> Result<(), RuntimeError> {
        loop {
            let before = self.state.location.index;
            if !self.run(child, watermark, start, node_value)? {
                return Ok(());
            }
            if self.state.location.index == before {
                if T::ACTIVE {
                    let label = self.grammar.label_of(id);
                    self.tracer.trace_zero_width_break(&label, self.state.location);
                }
                return Ok(());
            }
        }
    }

    /// Run `child` as a lookahead: match, then fully restore location and
    /// accumulator regardless of outcome.
    fn lookahead(
        &mut self,
        child: MatcherId,
        watermark: usize,
        start: Location,
        node_value: &mut Option<V>,
    ) -> Result<bool, RuntimeError> {
        self.state.predicate_depth += 1;
        let result = self.run(child, watermark, start, node_value);
        self.state.predicate_depth -= 1;
        self.state.location = start;
        self.state.nodes.truncate(watermark);
        result
    }

    fn run_action(
        &mut self,
        action: &ActionFn<V>,
        parent_watermark: usize,
        parent_start: Location,
        parent_value: &mut Option<V>,
    ) -> Result<bool, RuntimeError> {
        if self.state.predicate_depth > 0 && self.state.skip_actions {
            if T::ACTIVE {
                let path = self.render_path();
                self.tracer.trace_action_skipped(&path);
            }
            return Ok(true);
        }

        let path = self.render_path();
        let state = &mut self.state;
        let mut ctx = ActionContext {
            buffer: state.buffer,
            current: state.location,
            start: parent_start,
            sub_nodes: &state.nodes[parent_watermark..],
            stack: &mut state.stack,
            value_slot: parent_value,
            path: &path,
            in_predicate: state.predicate_depth > 0,
        };
        match action(&mut ctx) {
            Ok(ok) => {
                if T::ACTIVE {
                    self.tracer.trace_action(&path, ok);
                }
                Ok(ok)
            }
            Err(source) => Err(RuntimeError::ActionFailed { path, source }),
        }
    }

    fn run_proxy(
        &mut self,
        matcher: &'g Matcher<V>,
        target: Option<MatcherId>,
        watermark: usize,
        parent_watermark: usize,
        parent_start: Location,
        parent_value: &mut Option<V>,
    ) -> Result<bool, RuntimeError> {
        let Some(target) = target else {
            return Err(RuntimeError::UnresolvedProxy);
        };
        if self.state.recursion_depth >= self.state.limits.recursion_limit {
            return Err(RuntimeError::RecursionLimitExceeded(
                self.state.recursion_depth,
            ));
        }

        self.state.recursion_depth += 1;
        let saved_skip = self.state.skip_actions;
        self.state.skip_actions = self
            .grammar
            .matcher(target)
            .flags()
            .skip_actions_in_predicates;
        if T::ACTIVE {
            let name = self.grammar.label_of(target);
            self.tracer.trace_rule_call(&name);
        }

        let result = self.run(target, parent_watermark, parent_start, parent_value);

        if T::ACTIVE {
            let name = self.grammar.label_of(target);
            self.tracer.trace_rule_return(&name);
        }
        self.state.skip_actions = saved_skip;
        self.state.recursion_depth -= 1;

        let matched = result?;
        if matched
            && let Some(label) = &matcher.label
            && self.state.nodes.len() == watermark + 1
        {
            self.state.nodes[watermark].label = label.clone();
        }
        Ok(matched)
    }

    fn match_char(&mut self, id: MatcherId, c: char) -> bool {
        match c {
            chars::EMPTY => true,
            chars::ANY => {
                if self.at_end() {
                    self.note_failure(id);
                    false
                } else {
                    self.advance();
                    true
                }
            }
            chars::EOI => {
                if self.at_end() {
                    true
                } else {
                    self.note_failure(id);
                    false
                }
            }
            c => self.match_if(id, self.state.location.ch == c),
        }
    }

    /// Consume one character when `ok` holds, record the failure
    /// otherwise.
    fn match_if(&mut self, id: MatcherId, ok: bool) -> bool {
        if ok {
            self.advance();
        } else {
            self.note_failure(id);
        }
        ok
    }

    /// Match a full literal; commits the location only on success.
    fn match_literal(&mut self, s: &str, ignore_case: bool) -> bool {
        let mut loc = self.state.location;
        for expected in s.chars() {
            let ok = if ignore_case {
                loc.ch != chars::EOI && chars::eq_ignore_case(loc.ch, expected)
            } else {
                loc.ch == expected
            };
            if !ok {
                return false;
            }
            loc = loc.advance(self.state.buffer);
        }
        self.state.location = loc;
        true
    }

    #[inline]
    fn at_end(&self) -> bool {
        self.state.location.is_at_end(self.state.buffer)
    }

    #[inline]
    fn advance(&mut self) {
        self.state.location = self.state.location.advance(self.state.buffer);
    }

    /// Produce (or suppress) the parse-tree node for a successful
    /// invocation, per the matcher's policy flags.
    fn emit_node(
        &mut self,
        matcher: &Matcher<V>,
        id: MatcherId,
        start: Location,
        watermark: usize,
        value: Option<V>,
    ) {
        if matches!(
            matcher.kind,
            MatcherKind::Test(_)
                | MatcherKind::TestNot(_)
                | MatcherKind::Action(_)
                | MatcherKind::Proxy(_)
        ) {
            return;
        }
        let flags = matcher.flags;
        if flags.suppress_node {
            self.state.nodes.truncate(watermark);
            return;
        }
        if flags.skip_node {
            return;
        }
        let children = if flags.suppress_subnodes {
            self.state.nodes.truncate(watermark);
            Vec::new()
        } else {
            self.state.nodes.split_off(watermark)
        };
        let label = self.grammar.label_of(id);
        self.state
            .nodes
            .push(ParseNode::new(label, start, self.state.location, children, value));
    }

    /// Track the deepest location reached outside lookaheads; failures
    /// below it are not reportable.
    fn note_entry(&mut self) {
        if self.state.predicate_depth == 0 && self.state.location.index > self.state.deepest.index {
            self.state.deepest = self.state.location;
            self.state.expected.clear();
        }
    }

    /// Record a terminal failure at the deepest location for the
    /// "expected one of" diagnostic.
    fn note_failure(&mut self, id: MatcherId) {
        if self.state.predicate_depth > 0
            || self.state.location.index != self.state.deepest.index
        {
            return;
        }
        let label = self.grammar.label_of(id);
        if !self.state.expected.contains(&label) {
            self.state.expected.push(label);
        }
    }

    /// Active matcher labels, `/`-joined from the root.
    pub fn render_path(&self) -> String {
        if self.state.trail.is_empty() {
            return "/".to_string();
        }
        let mut path = String::new();
        for &id in &self.state.trail {
            path.push('/');
            path.push_str(&self.grammar.label_of(id));
        }
        path
    }
}
