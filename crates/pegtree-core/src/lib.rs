//! Core data structures for the pegtree PEG engine.
//!
//! This crate holds the leaf types the matcher runtime is built on: the
//! input buffer with its line/column mapping, immutable input locations,
//! finite/cofinite character sets, parse-tree nodes with path and label
//! addressing, and the shared value stack used by grammar actions.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod buffer;
pub mod chars;
pub mod charset;
pub mod location;
pub mod navigation;
pub mod stack;
pub mod tree;

#[cfg(test)]
mod charset_tests;
#[cfg(test)]
mod stack_tests;

pub use buffer::{InputBuffer, Position};
pub use charset::CharSet;
pub use location::Location;
pub use navigation::{collect_by_label, collect_by_path, find_by_path};
pub use stack::ValueStack;
pub use tree::{ParseNode, format_forest};
