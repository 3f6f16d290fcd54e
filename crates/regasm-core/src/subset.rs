//! Powerset construction (NFA → DFA).
//!
//! Every subset of the NFA state set, the empty set included, becomes one DFA
//! state. The cost is `2^n` states for an `n`-state input, so callers must cap
//! the input size before calling [`Automaton::to_dfa`]; pruning the result
//! afterwards drops the unreachable subsets.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use log::debug;

use crate::automaton::{Automaton, State, StateId, Symbol};

/// Largest NFA accepted by [`Automaton::to_dfa`]. Subsets are 64-bit masks.
pub const MAX_SUBSET_STATES: usize = 63;

/// Set of NFA states as a bitmask over arena indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
struct Subset(u64);

impl Subset {
    fn singleton(id: StateId) -> Self {
        Self(1 << id.0)
    }

    fn contains(self, id: StateId) -> bool {
        self.0 & (1 << id.0) != 0
    }

    fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    fn is_subset_of(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    fn size(self) -> u32 {
        self.0.count_ones()
    }

    fn members(self, universe: usize) -> impl Iterator<Item = StateId> {
        (0..universe as u32)
            .map(StateId)
            .filter(move |&id| self.contains(id))
    }
}

impl Automaton {
    /// Builds the deterministic automaton equivalent to `self`.
    ///
    /// The entry is the largest subset whose members are all epsilon-reachable
    /// from the NFA entry. Ties go to the subset enumerated first, with masks
    /// visited in ascending order. A transition on `c` from subset `s` leads to
    /// the union of the epsilon closures of every `c`-target of `s`.
    ///
    /// # Panics
    ///
    /// Panics when `self` has more than [`MAX_SUBSET_STATES`] states.
    pub fn to_dfa(&self) -> Automaton {
        let n = self.len();
        assert!(
            n <= MAX_SUBSET_STATES,
            "subset construction supports at most {MAX_SUBSET_STATES} states, got {n}"
        );

        let closures: Vec<Subset> = self
            .state_ids()
            .map(|id| {
                self.epsilon_closure(id)
                    .into_iter()
                    .fold(Subset::default(), |acc, s| acc.union(Subset::singleton(s)))
            })
            .collect();
        let entry_closure = self.entry().map(|e| closures[e.index()]);

        let mut dfa = Automaton::new();
        let mut index: IndexMap<Subset, StateId> = IndexMap::new();
        let mut entry: Option<(Subset, StateId)> = None;

        for mask in 0..(1u64 << n) {
            let subset = Subset(mask);
            let id = dfa.add_state(self.subset_state(subset));
            index.insert(subset, id);

            if let Some(closure) = entry_closure
                && subset.is_subset_of(closure)
                && entry.is_none_or(|(best, _)| subset.size() > best.size())
            {
                entry = Some((subset, id));
            }
        }

        if let Some((_, id)) = entry {
            dfa.set_entry(id);
        }

        for (&subset, &from) in &index {
            for (symbol, target) in self.transfer_table(subset, &closures) {
                if let Some(&to) = index.get(&target) {
                    dfa.add_transition(from, to, Some(symbol));
                }
            }
        }

        debug!(
            "subset construction: {} NFA states -> {} DFA states, {} transitions",
            n,
            dfa.len(),
            dfa.transition_count()
        );
        dfa
    }

    fn subset_state(&self, subset: Subset) -> State {
        let names: Vec<&str> = subset
            .members(self.len())
            .filter_map(|id| self.state(id).name())
            .collect();
        let accept = subset.members(self.len()).any(|id| self.state(id).is_accept());
        State::named(names.join(","), accept)
    }

    fn transfer_table(&self, subset: Subset, closures: &[Subset]) -> BTreeMap<Symbol, Subset> {
        let mut table: BTreeMap<Symbol, Subset> = BTreeMap::new();
        for member in subset.members(self.len()) {
            for t in self.state(member).transitions() {
                let Some(symbol) = t.symbol else {
                    continue;
                };
                let slot = table.entry(symbol).or_default();
                *slot = slot.union(closures[t.to.index()]);
            }
        }
        table
    }
}
