//! Thompson-construction primitives.
//!
//! Every operation consumes its operand fragments by value, so a donor
//! fragment cannot be observed after its states were moved.

use crate::automaton::{Automaton, State, StateId, Symbol};

impl Automaton {
    /// Two states joined by a transition on `c`; the second one accepts.
    pub fn literal(c: Symbol) -> Self {
        Self::single_edge(Some(c))
    }

    /// Two states joined by an epsilon transition; the second one accepts.
    pub fn epsilon() -> Self {
        Self::single_edge(None)
    }

    fn single_edge(symbol: Option<Symbol>) -> Self {
        let mut fragment = Automaton::new();
        let entry = fragment.add_entry(State::new(false));
        let accept = fragment.add_state(State::new(true));
        fragment.add_transition(entry, accept, symbol);
        fragment
    }

    /// Sequences `other` after `self`.
    ///
    /// Each accept state of `self` loses its accept flag and gains one epsilon
    /// transition to the former entry of `other`.
    pub fn concat(&mut self, other: Automaton) {
        let entry = self.required_entry();
        let accepts: Vec<StateId> = self.accept_states().collect();
        let other_entry = self
            .absorb(other)
            .expect("concat operand must have an entry state");

        for id in accepts {
            self.add_transition(id, other_entry, None);
            self.state_mut(id).set_accept(false);
        }
        self.set_entry(entry);
    }

    /// Alternation: a fresh entry with epsilon transitions to both old entries.
    pub fn union(&mut self, other: Automaton) {
        let left = self.required_entry();
        let right = self
            .absorb(other)
            .expect("union operand must have an entry state");

        let entry = self.add_entry(State::new(false));
        self.add_transition(entry, left, None);
        self.add_transition(entry, right, None);
    }

    /// Kleene star.
    ///
    /// Accept states loop back to the old entry, and a fresh accepting entry
    /// admits the empty match.
    pub fn star(&mut self) {
        let old_entry = self.required_entry();
        let accepts: Vec<StateId> = self.accept_states().collect();
        for id in accepts {
            self.add_transition(id, old_entry, None);
        }

        let entry = self.add_entry(State::new(true));
        self.add_transition(entry, old_entry, None);
    }

    fn required_entry(&self) -> StateId {
        self.entry()
            .expect("fragment operations require a non-empty fragment")
    }
}
