//! Tracing infrastructure for debugging matcher execution.
//!
//! The tracer is a zero-cost abstraction: `NoopTracer` methods are empty
//! `#[inline(always)]` functions and its `ACTIVE` gate lets the runner
//! skip label formatting entirely, so the untraced path carries no
//! tracing overhead at all.

use pegtree_core::Location;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Rule calls/returns and loop safety breaks only.
    #[default]
    Default,
    /// Every matcher entry, success, and failure.
    Verbose,
    /// Everything, including action evaluations.
    VeryVerbose,
}

/// Execution instrumentation consumed by the runner.
///
/// Methods receive preformatted labels; the `ACTIVE` constant tells the
/// runner whether formatting them is worthwhile at all.
pub trait Tracer {
    /// Whether the runner should format labels for this tracer.
    const ACTIVE: bool = true;

    /// A matcher starts attempting at `location`.
    fn trace_enter(&mut self, label: &str, location: Location);

    /// The matcher succeeded over `[start, end)`.
    fn trace_success(&mut self, label: &str, start: Location, end: Location);

    /// The matcher failed; `location` is its entry position.
    fn trace_failure(&mut self, label: &str, location: Location);

    /// A rule is invoked through its proxy.
    fn trace_rule_call(&mut self, name: &str);

    /// A rule invocation returned.
    fn trace_rule_return(&mut self, name: &str);

    /// An action predicate was evaluated.
    fn trace_action(&mut self, path: &str, result: bool);

    /// An action was bypassed inside a lookahead.
    fn trace_action_skipped(&mut self, path: &str);

    /// A repetition terminated because its child matched zero-width.
    fn trace_zero_width_break(&mut self, label: &str, location: Location);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    const ACTIVE: bool = false;

    #[inline(always)]
    fn trace_enter(&mut self, _label: &str, _location: Location) {}

    #[inline(always)]
    fn trace_success(&mut self, _label: &str, _start: Location, _end: Location) {}

    #[inline(always)]
    fn trace_failure(&mut self, _label: &str, _location: Location) {}

    #[inline(always)]
    fn trace_rule_call(&mut self, _name: &str) {}

    #[inline(always)]
    fn trace_rule_return(&mut self, _name: &str) {}

    #[inline(always)]
    fn trace_action(&mut self, _path: &str, _result: bool) {}

    #[inline(always)]
    fn trace_action_skipped(&mut self, _path: &str) {}

    #[inline(always)]
    fn trace_zero_width_break(&mut self, _label: &str, _location: Location) {}
}

/// Tracer that collects an indented execution trace.
pub struct PrintTracer {
    verbosity: Verbosity,
    depth: usize,
    lines: Vec<String>,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            depth: 0,
            lines: Vec::new(),
        }
    }

    /// Collected trace lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The whole trace as one newline-joined string.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    /// Print all trace lines to stdout.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{line}");
        }
    }

    fn push(&mut self, content: String) {
        let mut line = "  ".repeat(self.depth);
        line.push_str(&content);
        self.lines.push(line);
    }
}

impl Tracer for PrintTracer {
    fn trace_enter(&mut self, label: &str, location: Location) {
        if self.verbosity >= Verbosity::Verbose {
            self.push(format!("? {label} @{}", location.index));
        }
        self.depth += 1;
    }

    fn trace_success(&mut self, label: &str, start: Location, end: Location) {
        self.depth -= 1;
        if self.verbosity >= Verbosity::Verbose {
            self.push(format!("= {label} [{}..{})", start.index, end.index));
        }
    }

    fn trace_failure(&mut self, label: &str, location: Location) {
        self.depth -= 1;
        if self.verbosity >= Verbosity::Verbose {
            self.push(format!("! {label} @{}", location.index));
        }
    }

    fn trace_rule_call(&mut self, name: &str) {
        self.push(format!("-> {name}"));
    }

    fn trace_rule_return(&mut self, name: &str) {
        self.push(format!("<- {name}"));
    }

    fn trace_action(&mut self, path: &str, result: bool) {
        if self.verbosity >= Verbosity::VeryVerbose {
            self.push(format!("act {path} -> {result}"));
        }
    }

    fn trace_action_skipped(&mut self, path: &str) {
        if self.verbosity >= Verbosity::VeryVerbose {
            self.push(format!("act {path} skipped"));
        }
    }

    fn trace_zero_width_break(&mut self, label: &str, location: Location) {
        self.push(format!("loop-break {label} @{}", location.index));
    }
}
