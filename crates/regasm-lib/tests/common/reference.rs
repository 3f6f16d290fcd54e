//! Reference matcher shared by the unit and integration tests.

use std::collections::BTreeSet;

use regasm_core::{Automaton, StateId};

/// Longest-prefix match by simultaneous epsilon-closure simulation.
pub fn simulate_nfa(nfa: &Automaton, input: &[u8]) -> i64 {
    let Some(entry) = nfa.entry() else {
        return -1;
    };
    let accepting = |ids: &BTreeSet<StateId>| ids.iter().any(|&id| nfa.state(id).is_accept());

    let mut current = nfa.epsilon_closure(entry);
    let mut longest = if accepting(&current) { 0 } else { -1 };
    for (i, &c) in input.iter().enumerate() {
        current = current
            .iter()
            .flat_map(|&id| nfa.state(id).transitions())
            .filter(|t| t.symbol == Some(c))
            .flat_map(|t| nfa.epsilon_closure(t.to))
            .collect();
        if current.is_empty() {
            break;
        }
        if accepting(&current) {
            longest = i as i64 + 1;
        }
    }
    longest
}

/// Every string over `alphabet` up to `max_len` symbols, shortest first.
pub fn all_inputs(alphabet: &[u8], max_len: usize) -> Vec<Vec<u8>> {
    let mut out = vec![Vec::new()];
    let mut frontier: Vec<Vec<u8>> = vec![Vec::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for prefix in &frontier {
            for &c in alphabet {
                let mut word = prefix.clone();
                word.push(c);
                next.push(word);
            }
        }
        out.extend(next.iter().cloned());
        frontier = next;
    }
    out
}
