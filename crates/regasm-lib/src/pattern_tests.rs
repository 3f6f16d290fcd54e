use crate::pattern::{CompiledPattern, DEFAULT_MAX_NFA_STATES, PatternBuilder, PatternConfig};
use crate::test_utils::{all_inputs, expect_invalid, simulate_nfa, walk_dfa};
use crate::{Error, Target, compile};
use regasm_core::MAX_SUBSET_STATES;

const PATTERNS: &[&str] = &[
    "a",
    "_",
    "(a).(b)",
    "(a)*",
    "(((a).(b))|(a))*",
    "((a)*).(b)",
    "((a).(b))*",
    "((a)|(b))*",
    "((_)|(a)).(b)",
];

#[test]
fn literal_examples() {
    let dfa = CompiledPattern::expect_valid("a").dfa().clone();
    assert_eq!(walk_dfa(&dfa, b"a"), 1);
    assert_eq!(walk_dfa(&dfa, b"b"), -1);
}

#[test]
fn concatenation_examples() {
    let dfa = CompiledPattern::expect_valid("(a).(b)").dfa().clone();
    assert_eq!(walk_dfa(&dfa, b"ab"), 2);
    assert_eq!(walk_dfa(&dfa, b"a"), -1);
    assert_eq!(walk_dfa(&dfa, b"ac"), -1);
}

#[test]
fn star_examples() {
    let dfa = CompiledPattern::expect_valid("(a)*").dfa().clone();
    assert_eq!(walk_dfa(&dfa, b"aaab"), 3);
}

#[test]
fn alternation_under_star_examples() {
    let dfa = CompiledPattern::expect_valid("(((a).(b))|(a))*").dfa().clone();
    assert_eq!(walk_dfa(&dfa, b"abab"), 4);
    assert_eq!(walk_dfa(&dfa, b"aba"), 3);
    assert_eq!(walk_dfa(&dfa, b""), 0);
}

#[test]
fn nfa_simulation_examples() {
    let parsed = PatternBuilder::new("(((a).(b))|(a))*").parse().unwrap();
    assert_eq!(simulate_nfa(parsed.nfa(), b"abaab"), 5);
    assert_eq!(simulate_nfa(parsed.nfa(), b"abb"), 2);
    assert_eq!(simulate_nfa(parsed.nfa(), b"b"), 0);

    let parsed = PatternBuilder::new("(a).(b)").parse().unwrap();
    assert_eq!(simulate_nfa(parsed.nfa(), b"ac"), -1);
}

#[test]
fn inputs_are_enumerated_shortest_first() {
    let words = all_inputs(b"ab", 2);
    let expected: Vec<Vec<u8>> = ["", "a", "b", "aa", "ab", "ba", "bb"]
        .iter()
        .map(|w| w.as_bytes().to_vec())
        .collect();
    assert_eq!(words, expected);
}

#[test]
fn dfa_agrees_with_nfa_simulation() {
    let inputs = all_inputs(b"abc", 5);
    for &source in PATTERNS {
        let parsed = PatternBuilder::new(source).parse().unwrap();
        let nfa = parsed.nfa().clone();
        let compiled = parsed.determinize().unwrap().compile();

        for input in &inputs {
            assert_eq!(
                walk_dfa(compiled.dfa(), input),
                simulate_nfa(&nfa, input),
                "{source:?} on {:?}",
                String::from_utf8_lossy(input)
            );
        }
    }
}

#[test]
fn pruning_does_not_change_matches() {
    let inputs = all_inputs(b"ab", 4);
    for &source in PATTERNS {
        let unpruned = PatternBuilder::new(source)
            .with_pruning(false)
            .parse()
            .and_then(|p| p.determinize());
        let pruned = PatternBuilder::new(source).parse().unwrap().determinize().unwrap();

        // Without pruning the full powerset survives and may share targets.
        let Ok(unpruned) = unpruned else {
            continue;
        };
        assert!(unpruned.dfa().len() >= pruned.dfa().len());
        for input in &inputs {
            assert_eq!(walk_dfa(unpruned.dfa(), input), walk_dfa(pruned.dfa(), input));
        }
    }
}

#[test]
fn determinized_automata_are_dfas() {
    for &source in PATTERNS {
        let det = PatternBuilder::new(source).parse().unwrap().determinize().unwrap();
        assert!(det.dfa().is_dfa(), "{source:?}");
    }
}

#[test]
fn shared_successor_is_not_deterministic() {
    // Both branches continue into the same `c` state after pruning.
    let result = PatternBuilder::new("((a)|(b)).(c)")
        .parse()
        .unwrap()
        .determinize();

    assert!(matches!(result, Err(Error::NotDeterministic)));
}

#[test]
fn raw_dfa_keeps_every_subset() {
    let parsed = PatternBuilder::new("a").parse().unwrap();
    let raw = parsed.raw_dfa().unwrap();
    let det = parsed.determinize().unwrap();

    assert_eq!(raw.len(), 1 << det.nfa().len());
    assert!(raw.len() > det.dfa().len());
    assert!(raw.states().iter().any(|s| s.name() == Some("")));
}

#[test]
fn raw_dfa_skips_eligibility_check() {
    let parsed = PatternBuilder::new("((a)|(b)).(c)").parse().unwrap();
    assert!(parsed.raw_dfa().is_ok());
    assert!(matches!(parsed.determinize(), Err(Error::NotDeterministic)));
}

#[test]
fn state_cap_is_enforced() {
    let err = PatternBuilder::new("((a).(b)).(c)")
        .with_max_nfa_states(2)
        .parse()
        .unwrap()
        .determinize()
        .unwrap_err();

    insta::assert_snapshot!(err.to_string(), @"pattern needs 4 NFA states, limit is 2");
}

#[test]
fn state_cap_is_clamped() {
    let config = PatternConfig::default().with_max_nfa_states(1000);
    assert_eq!(config.max_nfa_states, MAX_SUBSET_STATES);
    assert_eq!(PatternConfig::default().max_nfa_states, DEFAULT_MAX_NFA_STATES);
}

#[test]
fn parse_errors_carry_diagnostics() {
    let Err(Error::Parse(diagnostics)) = compile("(a).b") else {
        panic!("expected a parse error");
    };
    assert_eq!(diagnostics.error_count(), 1);
    insta::assert_snapshot!(Error::Parse(diagnostics).to_string(), @"pattern parsing failed with 1 errors");
}

#[test]
fn invalid_patterns() {
    insta::assert_snapshot!(expect_invalid("((a).(b)"), @"error at 8..8: missing closing `)` (related: group opened here at 0..1)");
    insta::assert_snapshot!(expect_invalid("(a)|b"), @"error at 4..5: expected `(` (hint: operands of `.` and `|` must be parenthesized)");
}

#[test]
fn nesting_limit_comes_from_config() {
    let result = PatternBuilder::new("(((a)*)*)*").with_max_nesting(2).parse();
    assert!(matches!(result, Err(Error::Parse(_))));

    let result = PatternBuilder::new("(((a)*)*)*").with_max_nesting(3).parse();
    assert!(result.is_ok());
}

#[test]
fn warnings_survive_to_compiled_pattern() {
    let compiled = CompiledPattern::expect_valid("((_)*).(a)");
    assert_eq!(compiled.diagnostics().warning_count(), 1);
}

#[test]
fn dfa_labels_name_nfa_states() {
    let det = PatternBuilder::new("(a)*").parse().unwrap().determinize().unwrap();

    let entry = det.dfa().entry().unwrap();
    assert_eq!(det.dfa().state(entry).name(), Some("q0,q2"));
    assert_eq!(det.nfa().len(), 3);
}

#[test]
fn renders_every_target() {
    let compiled = compile("(a).(b)").unwrap();

    assert!(compiled.to_c("m").starts_with("long m(const char* input, long length) {\n"));
    assert!(compiled.to_nasm("m").starts_with("bits 64\nsection .text\n\nglobal m\nm:\n"));
    assert_eq!(compiled.to_header("m"), "long m(const char* input, long length);\n");
    assert_eq!(compiled.render(Target::C, "m"), compiled.to_c("m"));
    assert_eq!(compiled.render(Target::Nasm, "m"), compiled.to_nasm("m"));
}

#[test]
fn literal_c_output() {
    let compiled = compile("a").unwrap();

    insta::assert_snapshot!(compiled.to_c("match"), @r"
    long match(const char* input, long length) {
      long counter = 0;
      long longestMatch = -1;
      unsigned char nextChar;
    L1:
      if (counter >= length) goto L0;
      nextChar = input[counter];
      counter += 1;
      if (nextChar == 'a') goto L5;
      goto L0;
    L5:
      longestMatch = counter;
      if (counter >= length) goto L0;
      nextChar = input[counter];
      counter += 1;
      goto L0;
    L0:
      return longestMatch;
    }
    ");
}
