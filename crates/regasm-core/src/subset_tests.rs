use crate::{Automaton, MAX_SUBSET_STATES, State, StateId};

/// s0 -a-> s1, s0 -a-> s2, with both targets accepting.
fn forked() -> Automaton {
    let mut nfa = Automaton::new();
    let s0 = nfa.add_state(State::named("s0", false));
    let s1 = nfa.add_state(State::named("s1", true));
    let s2 = nfa.add_state(State::named("s2", true));
    nfa.add_transition(s0, s1, Some(b'a'));
    nfa.add_transition(s0, s2, Some(b'a'));
    nfa
}

#[test]
fn enumerates_full_powerset() {
    let dfa = forked().to_dfa();

    assert_eq!(dfa.len(), 8);
    let labels: Vec<_> = dfa.states().iter().map(|s| s.name().unwrap()).collect();
    assert_eq!(
        labels,
        vec!["", "s0", "s1", "s0,s1", "s2", "s0,s2", "s1,s2", "s0,s1,s2"]
    );
    let accepting: Vec<bool> = dfa.states().iter().map(State::is_accept).collect();
    assert_eq!(
        accepting,
        vec![false, false, true, true, true, true, true, true]
    );
}

#[test]
fn shared_symbol_targets_union_state() {
    let mut dfa = forked().to_dfa();
    dfa.prune();

    let entry = dfa.entry().unwrap();
    assert_eq!(dfa.state(entry).name(), Some("s0"));

    let transitions = dfa.state(entry).transitions();
    assert_eq!(transitions.len(), 1);
    assert_eq!(transitions[0].symbol, Some(b'a'));
    let target = dfa.state(transitions[0].to);
    assert_eq!(target.name(), Some("s1,s2"));
    assert!(target.is_accept());

    assert_eq!(dfa.len(), 2);
    assert!(dfa.is_dfa());
}

#[test]
fn entry_is_epsilon_closure_of_nfa_entry() {
    // q0 -a-> q1, q1 -ε-> q0, q2 -ε-> q0 with q2 the entry
    let mut nfa = Automaton::literal(b'a');
    nfa.star();
    nfa.assign_default_names();

    let dfa = nfa.to_dfa();

    let entry = dfa.entry().unwrap();
    assert_eq!(entry, StateId(0b101));
    assert_eq!(dfa.state(entry).name(), Some("q0,q2"));
    assert!(dfa.state(entry).is_accept());
}

#[test]
fn transitions_follow_closures_of_targets() {
    let mut nfa = Automaton::literal(b'a');
    nfa.star();
    nfa.assign_default_names();

    let mut dfa = nfa.to_dfa();
    dfa.prune();

    assert!(dfa.is_dfa());
    let entry = dfa.entry().unwrap();
    let step = dfa.state(entry).transitions()[0];
    let after_a = dfa.state(step.to);
    assert_eq!(after_a.name(), Some("q0,q1"));
    assert!(after_a.is_accept());
    assert_eq!(after_a.transitions()[0].to, step.to);
}

#[test]
fn unnamed_members_give_empty_labels() {
    let dfa = Automaton::literal(b'x').to_dfa();

    assert!(dfa.states().iter().all(|s| s.name() == Some("")));
    assert!(dfa.is_dfa());
}

#[test]
fn empty_nfa_yields_single_empty_state() {
    let dfa = Automaton::new().to_dfa();

    assert_eq!(dfa.len(), 1);
    assert!(!dfa.state(StateId(0)).is_accept());
    assert_eq!(dfa.transition_count(), 0);
}

#[test]
#[should_panic(expected = "subset construction supports at most")]
fn rejects_oversized_input() {
    let mut nfa = Automaton::new();
    for _ in 0..=MAX_SUBSET_STATES {
        nfa.add_state(State::new(false));
    }
    nfa.to_dfa();
}
