//! regasm: compile a tiny regular-expression dialect into native matchers.
//!
//! A pattern is read into a Thompson NFA, pruned, converted to a DFA by
//! subset construction, and lowered to a fixed-signature function
//! `long match(const char* input, long length)` that returns the length of
//! the longest matching prefix, or `-1`.
//!
//! # Example
//!
//! ```
//! let pattern = regasm_lib::compile("(a).(b)").expect("valid pattern");
//! let c_source = pattern.to_c("match_ab");
//! assert!(c_source.starts_with("long match_ab(const char* input, long length)"));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod batch;
pub mod diagnostics;
pub mod parser;
pub mod pattern;

#[cfg(test)]
mod pattern_tests;
#[cfg(test)]
mod test_utils;

pub use batch::Batch;
pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use pattern::{CompiledPattern, PatternBuilder, PatternConfig, compile};
pub use regasm_codegen::Target;
pub use regasm_core::Automaton;

/// Errors that can occur while compiling a pattern.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("pattern parsing failed with {} errors", .0.error_count())]
    Parse(Diagnostics),

    /// The pruned NFA is too large for subset construction.
    #[error("pattern needs {states} NFA states, limit is {limit}")]
    TooManyStates { states: usize, limit: usize },

    /// Subset construction produced a state that fails the DFA check.
    #[error("subset construction did not produce a deterministic automaton")]
    NotDeterministic,
}

pub type Result<T> = std::result::Result<T, Error>;
