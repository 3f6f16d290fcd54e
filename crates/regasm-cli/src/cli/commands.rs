//! Command builders for the CLI.
//!
//! Each command is built from the shared arg builders in `args.rs`.

use clap::Command;

use super::args::*;

/// Options every command accepts.
fn with_pipeline_args(cmd: Command) -> Command {
    cmd.arg(max_states_arg())
        .arg(no_prune_arg())
        .arg(color_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("regasm")
        .about("Compile tiny regular expressions into C and NASM matchers")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(emit_command())
        .subcommand(graph_command())
        .subcommand(build_command())
}

/// Run the pipeline and report problems.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Check that patterns compile")
        .override_usage(
            "\
  regasm check <PATTERN>...
  regasm check -f <FILE>",
        )
        .after_help(
            r#"EXAMPLES:
  regasm check '(a).(b)'              # one pattern
  regasm check 'a' '((a)|(b))*'       # several patterns
  regasm check -f patterns.txt        # one pattern per line
  regasm check '(_)*' --strict        # fail on warnings"#,
        )
        .arg(patterns_arg())
        .arg(pattern_file_arg())
        .arg(strict_arg());

    with_pipeline_args(cmd)
}

/// Print the generated code for one pattern.
pub fn emit_command() -> Command {
    let cmd = Command::new("emit")
        .about("Print the matcher generated for a pattern")
        .override_usage(
            "\
  regasm emit <PATTERN> [-t c|asm|header] [-n NAME]",
        )
        .after_help(
            r#"EXAMPLES:
  regasm emit '(a).(b)'               # C function named `match`
  regasm emit '(a)*' -t asm           # NASM, x86-64 System V
  regasm emit 'a' -t header -n is_a   # prototype only"#,
        )
        .arg(pattern_arg().required(true))
        .arg(target_arg())
        .arg(name_arg());

    with_pipeline_args(cmd)
}

/// Draw an automaton from one pipeline stage.
pub fn graph_command() -> Command {
    let cmd = Command::new("graph")
        .about("Print the automaton of a pattern as Graphviz or JSON")
        .override_usage(
            "\
  regasm graph <PATTERN> [--stage nfa|pruned|dfa-raw|dfa] [--format dot|json]",
        )
        .after_help(
            r#"EXAMPLES:
  regasm graph '(a).(b)'              # final DFA
  regasm graph '(a)*' --stage nfa     # Thompson NFA as built
  regasm graph 'a' --stage dfa-raw    # every subset, before pruning
  regasm graph 'a' --format json      # states and transitions as JSON
  regasm graph '(a).(b)' | dot -Tsvg > ab.svg"#,
        )
        .arg(pattern_arg().required(true))
        .arg(stage_arg())
        .arg(format_arg())
        .arg(name_arg().default_value("g").help("Graph name"));

    with_pipeline_args(cmd)
}

/// Write linkable artifacts for a set of patterns.
pub fn build_command() -> Command {
    let cmd = Command::new("build")
        .about("Write matchers.asm, matchers.c and defs.c for a set of patterns")
        .override_usage(
            "\
  regasm build <PATTERN>... [-o DIR]
  regasm build -f <FILE> [-o DIR]",
        )
        .after_help(
            r#"EXAMPLES:
  regasm build 'a' '(a).(b)'          # writes into ./bin
  regasm build -f patterns.txt -o out

Patterns that fail to compile are reported and skipped. The functions are
named match0, match1, ... in the order the patterns were given."#,
        )
        .arg(patterns_arg())
        .arg(pattern_file_arg())
        .arg(output_dir_arg());

    with_pipeline_args(cmd)
}
