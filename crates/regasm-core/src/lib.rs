#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Automaton data model and construction algorithms for regasm.
//!
//! One arena-backed [`Automaton`] type serves as both NFA and DFA:
//! - `build`: Thompson-construction primitives that combine fragments
//! - `prune`: epsilon-only state elimination and dead-state removal
//! - `subset`: powerset construction (NFA → DFA)
//! - `dot`: Graphviz export for inspection

mod automaton;
mod build;
mod dot;
mod prune;
mod subset;

#[cfg(test)]
mod subset_tests;

pub use automaton::{Automaton, State, StateId, Symbol, Transition};
pub use subset::MAX_SUBSET_STATES;
