//! Test helpers: reference matchers over automata and pattern shortcuts.

use regasm_core::Automaton;

use crate::pattern::{CompiledPattern, PatternBuilder, compile};

#[path = "../tests/common/reference.rs"]
mod reference;

pub use reference::{all_inputs, simulate_nfa};

impl CompiledPattern {
    pub fn expect_valid(source: &str) -> CompiledPattern {
        compile(source).unwrap_or_else(|e| panic!("{source:?} failed to compile: {e}"))
    }
}

/// Rendered diagnostics for a pattern that must fail to parse.
pub fn expect_invalid(source: &str) -> String {
    match PatternBuilder::new(source).parse() {
        Ok(_) => panic!("{source:?} parsed without errors"),
        Err(crate::Error::Parse(diagnostics)) => diagnostics.printer().render(),
        Err(other) => panic!("{source:?} failed outside the parser: {other}"),
    }
}

/// Longest-prefix match by walking a DFA.
pub fn walk_dfa(dfa: &Automaton, input: &[u8]) -> i64 {
    let Some(mut state) = dfa.entry() else {
        return -1;
    };
    let mut longest = if dfa.state(state).is_accept() { 0 } else { -1 };
    for (i, &c) in input.iter().enumerate() {
        let next = dfa
            .state(state)
            .transitions()
            .iter()
            .find(|t| t.symbol == Some(c));
        let Some(t) = next else {
            break;
        };
        state = t.to;
        if dfa.state(state).is_accept() {
            longest = i as i64 + 1;
        }
    }
    longest
}
