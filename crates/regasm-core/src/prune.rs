//! Epsilon-only state elimination and dead-state removal.
//!
//! Both passes are pure rewrites of the automaton: no I/O, only `debug!`
//! logging of how many states were dropped.

use std::collections::VecDeque;

use indexmap::IndexSet;
use log::debug;

use crate::automaton::{Automaton, StateId, Transition};

impl Automaton {
    /// Eliminates epsilon-only states, then removes states unreachable from
    /// the entry. Returns the total number of states removed.
    pub fn prune(&mut self) -> usize {
        let collapsed = self.eliminate_epsilon_only_states();
        let dead = self.remove_dead_states();
        debug!(
            "pruned {} epsilon-only and {} dead states, {} remain",
            collapsed,
            dead,
            self.len()
        );
        collapsed + dead
    }

    /// Bypasses and deletes every state that is neither the entry nor
    /// accepting and whose outgoing transitions are all epsilon.
    ///
    /// Each transition entering such a state is replaced by one transition per
    /// outgoing target, carrying the entering transition's symbol.
    pub fn eliminate_epsilon_only_states(&mut self) -> usize {
        let mut total = 0;
        loop {
            let removed = self.eliminate_pass();
            if removed == 0 {
                break;
            }
            total += removed;
        }
        total
    }

    fn eliminate_pass(&mut self) -> usize {
        let Some(entry) = self.entry() else {
            return 0;
        };

        let mut predecessors = build_predecessor_map(self);
        let mut removed = vec![false; self.len()];
        let mut count = 0;

        for victim in self.state_ids() {
            if victim == entry || !is_epsilon_only(self, victim) {
                continue;
            }
            self.bypass(victim, &mut predecessors);
            removed[victim.index()] = true;
            count += 1;
        }

        if count > 0 {
            let keep: Vec<bool> = removed.iter().map(|r| !r).collect();
            self.retain_states(&keep);
        }
        count
    }

    /// Rewires every transition entering `victim` around it.
    fn bypass(&mut self, victim: StateId, predecessors: &mut [IndexSet<StateId>]) {
        let targets: Vec<StateId> = self
            .state(victim)
            .transitions()
            .iter()
            .map(|t| t.to)
            .filter(|&to| to != victim)
            .collect();

        let sources = std::mem::take(&mut predecessors[victim.index()]);
        for source in sources {
            if source == victim {
                continue;
            }
            let entering: Vec<Transition> = self
                .state(source)
                .transitions()
                .iter()
                .filter(|t| t.to == victim)
                .copied()
                .collect();

            for t in entering {
                self.remove_transition(&t);
                for &target in &targets {
                    if self.insert_transition(source, target, t.symbol) {
                        predecessors[target.index()].insert(source);
                    }
                }
            }
        }

        self.state_mut(victim).clear_transitions();
        for &target in &targets {
            predecessors[target.index()].shift_remove(&victim);
        }
    }

    /// Removes every state not forward-reachable from the entry.
    pub fn remove_dead_states(&mut self) -> usize {
        let Some(entry) = self.entry() else {
            return 0;
        };

        let mut reachable = vec![false; self.len()];
        reachable[entry.index()] = true;
        let mut queue = VecDeque::from([entry]);
        while let Some(id) = queue.pop_front() {
            for t in self.state(id).transitions() {
                if !reachable[t.to.index()] {
                    reachable[t.to.index()] = true;
                    queue.push_back(t.to);
                }
            }
        }

        self.retain_states(&reachable)
    }
}

fn is_epsilon_only(automaton: &Automaton, id: StateId) -> bool {
    let state = automaton.state(id);
    !state.is_accept() && state.transitions().iter().all(Transition::is_epsilon)
}

fn build_predecessor_map(automaton: &Automaton) -> Vec<IndexSet<StateId>> {
    let mut map = vec![IndexSet::new(); automaton.len()];
    for t in automaton.transitions() {
        map[t.to.index()].insert(t.from);
    }
    map
}
