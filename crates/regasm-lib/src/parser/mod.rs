//! Recursive-descent reader for the pattern dialect.
//!
//! Grammar:
//!
//! ```text
//! E := '_'                 epsilon
//!    | '(' E ')' '.' '(' E ')'   concatenation
//!    | '(' E ')' '|' '(' E ')'   union
//!    | '(' E ')' '*'             Kleene star
//!    | <any other ASCII char>    literal symbol
//! ```
//!
//! Reading stops at the first error; the automaton is only produced for
//! well-formed input.

mod core;


pub use self::core::{ParseResult, Parser};

use regasm_core::Automaton;

use crate::diagnostics::DiagnosticMessage;

/// Parses `source`, handing every diagnostic to `report`.
///
/// Returns `None` when the pattern has errors. Warnings are reported but do
/// not prevent a result.
pub fn parse_with(source: &str, mut report: impl FnMut(&DiagnosticMessage)) -> Option<Automaton> {
    let result = Parser::new(source).parse();
    for diag in &result.diagnostics {
        report(diag);
    }
    result.automaton
}
