//! The matcher runtime: contexts, runner, driver, tracing, diagnostics.

mod context;
mod diagnostics;
mod error;
mod parser;
mod result;
mod runner;
mod trace;


pub use context::ActionContext;
pub use diagnostics::FailurePrinter;
pub use error::{ActionError, RuntimeError};
pub use parser::{Parser, RunLimits};
pub use result::{ParseFailure, ParsingResult};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
