//! Arena-owned automaton shared by the NFA and DFA stages.
//!
//! States live in a single `Vec` and refer to each other only through
//! [`StateId`] indices. Moving states between fragments re-bases their ids.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

/// Input symbol. Patterns are matched byte by byte.
pub type Symbol = u8;

/// Index of a state inside its owning [`Automaton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StateId(pub u32);

impl StateId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    fn offset(self, by: u32) -> Self {
        Self(self.0 + by)
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Directed edge between two states. `symbol: None` is an epsilon transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
    pub symbol: Option<Symbol>,
}

impl Transition {
    pub fn new(from: StateId, to: StateId, symbol: Option<Symbol>) -> Self {
        Self { from, to, symbol }
    }

    pub fn epsilon(from: StateId, to: StateId) -> Self {
        Self::new(from, to, None)
    }

    pub fn is_epsilon(&self) -> bool {
        self.symbol.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct State {
    name: Option<String>,
    accept: bool,
    transitions: Vec<Transition>,
}

impl State {
    pub fn new(accept: bool) -> Self {
        Self {
            name: None,
            accept,
            transitions: Vec::new(),
        }
    }

    pub fn named(name: impl Into<String>, accept: bool) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(accept)
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn is_accept(&self) -> bool {
        self.accept
    }

    pub fn set_accept(&mut self, accept: bool) {
        self.accept = accept;
    }

    /// Outgoing transitions in insertion order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub(crate) fn clear_transitions(&mut self) {
        self.transitions.clear();
    }

    /// A state is DFA-eligible when it has no epsilon transitions and no two
    /// of its transitions lead to the same target.
    pub fn is_dfa_eligible(&self) -> bool {
        let mut targets = HashSet::with_capacity(self.transitions.len());
        self.transitions
            .iter()
            .all(|t| !t.is_epsilon() && targets.insert(t.to))
    }
}

/// Automaton fragment: an arena of states with one designated entry.
///
/// When no entry was set explicitly, the first inserted state is the entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Automaton {
    states: Vec<State>,
    entry: Option<StateId>,
}

impl Automaton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state_ids(&self) -> impl Iterator<Item = StateId> + use<> {
        (0..self.states.len() as u32).map(StateId)
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.index()]
    }

    pub fn state_mut(&mut self, id: StateId) -> &mut State {
        &mut self.states[id.index()]
    }

    pub fn entry(&self) -> Option<StateId> {
        self.entry
            .or_else(|| (!self.states.is_empty()).then_some(StateId(0)))
    }

    pub fn set_entry(&mut self, id: StateId) {
        assert!(id.index() < self.states.len(), "entry {id} is not owned");
        self.entry = Some(id);
    }

    pub fn add_state(&mut self, state: State) -> StateId {
        let id = StateId(self.states.len() as u32);
        self.states.push(state);
        id
    }

    /// Adds a state and makes it the entry.
    pub fn add_entry(&mut self, state: State) -> StateId {
        let id = self.add_state(state);
        self.entry = Some(id);
        id
    }

    pub fn add_transition(&mut self, from: StateId, to: StateId, symbol: Option<Symbol>) {
        debug_assert!(to.index() < self.states.len());
        self.states[from.index()]
            .transitions
            .push(Transition::new(from, to, symbol));
    }

    /// Adds a transition unless a structurally equal one already exists.
    /// Returns whether the transition was added.
    pub fn insert_transition(&mut self, from: StateId, to: StateId, symbol: Option<Symbol>) -> bool {
        let t = Transition::new(from, to, symbol);
        let transitions = &mut self.states[from.index()].transitions;
        if transitions.contains(&t) {
            return false;
        }
        transitions.push(t);
        true
    }

    /// Removes the first transition structurally equal to `t`.
    pub fn remove_transition(&mut self, t: &Transition) -> bool {
        let transitions = &mut self.states[t.from.index()].transitions;
        match transitions.iter().position(|x| x == t) {
            Some(pos) => {
                transitions.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|s| s.transitions.len()).sum()
    }

    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.states.iter().flat_map(|s| s.transitions.iter())
    }

    pub fn accept_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.state_ids().filter(|&id| self.state(id).accept)
    }

    /// States reachable from `id` through epsilon transitions only, `id` included.
    pub fn epsilon_closure(&self, id: StateId) -> BTreeSet<StateId> {
        let mut closure = BTreeSet::from([id]);
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            for t in &self.state(current).transitions {
                if t.is_epsilon() && closure.insert(t.to) {
                    stack.push(t.to);
                }
            }
        }
        closure
    }

    /// True when every state is DFA-eligible and an entry exists.
    pub fn is_dfa(&self) -> bool {
        self.entry().is_some() && self.states.iter().all(State::is_dfa_eligible)
    }

    /// Names every unnamed state `q<index>`.
    pub fn assign_default_names(&mut self) {
        for (idx, state) in self.states.iter_mut().enumerate() {
            if state.name.is_none() {
                state.name = Some(StateId(idx as u32).to_string());
            }
        }
    }

    /// Moves every state of `other` into `self` and returns the re-based
    /// entry of `other`. The entry of `self` is untouched.
    pub fn absorb(&mut self, other: Automaton) -> Option<StateId> {
        let base = self.states.len() as u32;
        let other_entry = other.entry().map(|e| e.offset(base));
        self.states.extend(other.states.into_iter().map(|mut state| {
            for t in &mut state.transitions {
                t.from = t.from.offset(base);
                t.to = t.to.offset(base);
            }
            state
        }));
        other_entry
    }

    /// Keeps only the states whose `keep` flag is set, compacting ids.
    ///
    /// Transitions touching a dropped state are discarded. The entry is always
    /// kept and its explicit designation survives the renumbering.
    pub(crate) fn retain_states(&mut self, keep: &[bool]) -> usize {
        debug_assert_eq!(keep.len(), self.states.len());
        let entry = self.entry();

        let mut remap: Vec<Option<StateId>> = Vec::with_capacity(keep.len());
        let mut next = 0u32;
        for (idx, &k) in keep.iter().enumerate() {
            let k = k || entry.is_some_and(|e| e.index() == idx);
            if k {
                remap.push(Some(StateId(next)));
                next += 1;
            } else {
                remap.push(None);
            }
        }

        let removed = self.states.len() - next as usize;
        if removed == 0 {
            return 0;
        }

        let old = std::mem::take(&mut self.states);
        for (idx, mut state) in old.into_iter().enumerate() {
            if remap[idx].is_none() {
                continue;
            }
            state.transitions.retain_mut(|t| {
                match (remap[t.from.index()], remap[t.to.index()]) {
                    (Some(from), Some(to)) => {
                        t.from = from;
                        t.to = to;
                        true
                    }
                    _ => false,
                }
            });
            self.states.push(state);
        }
        self.entry = entry.and_then(|e| remap[e.index()]);
        removed
    }
}
