//! DFA → instruction lowering.

use log::debug;
use regasm_core::Automaton;

use crate::matcher::{Block, CompiledMatcher};

/// Lowers a DFA into a [`CompiledMatcher`].
///
/// Each state becomes one block; the entry block is placed first and the rest
/// follow in state order. The input must satisfy [`Automaton::is_dfa`];
/// epsilon transitions are ignored.
pub fn generate(dfa: &Automaton) -> CompiledMatcher {
    let mut matcher = CompiledMatcher::new();
    let mut blocks: Vec<Block> = dfa.state_ids().map(|_| matcher.new_block()).collect();
    let markers: Vec<_> = blocks.iter().map(Block::marker).collect();

    for (id, block) in dfa.state_ids().zip(blocks.iter_mut()) {
        let state = dfa.state(id);
        if state.is_accept() {
            matcher.store_match(block);
        }
        for t in state.transitions() {
            debug_assert!(!t.is_epsilon(), "code generation requires a DFA");
            if let Some(symbol) = t.symbol {
                matcher.match_symbol(block, symbol, markers[t.to.index()]);
            }
        }
    }

    let entry = dfa.entry().map(|e| e.index());
    let mut rest = Vec::with_capacity(blocks.len());
    for (idx, block) in blocks.into_iter().enumerate() {
        if Some(idx) == entry {
            matcher.finish_block(block);
        } else {
            rest.push(block);
        }
    }
    for block in rest {
        matcher.finish_block(block);
    }

    debug!(
        "generated {} instructions for {} states",
        matcher.instructions().count(),
        dfa.len()
    );
    matcher
}
