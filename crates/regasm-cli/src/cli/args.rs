//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so the same definition can be
//! composed into several commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// One or more patterns (positional).
pub fn patterns_arg() -> Arg {
    Arg::new("patterns")
        .value_name("PATTERN")
        .num_args(1..)
        .help("Patterns to compile")
}

/// A single pattern (positional).
pub fn pattern_arg() -> Arg {
    Arg::new("patterns")
        .value_name("PATTERN")
        .help("Pattern to compile")
}

/// File with one pattern per line (-f/--file).
pub fn pattern_file_arg() -> Arg {
    Arg::new("pattern_file")
        .short('f')
        .long("file")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Read patterns from a file, one per line ('-' for stdin)")
}

/// Output rendering (--target).
pub fn target_arg() -> Arg {
    Arg::new("target")
        .short('t')
        .long("target")
        .value_name("TARGET")
        .default_value("c")
        .value_parser(["c", "asm", "header"])
        .help("Output rendering")
}

/// Generated function name (--name).
pub fn name_arg() -> Arg {
    Arg::new("name")
        .short('n')
        .long("name")
        .value_name("NAME")
        .default_value("match")
        .help("Name of the generated function")
}

/// Pipeline stage to draw (--stage).
pub fn stage_arg() -> Arg {
    Arg::new("stage")
        .long("stage")
        .value_name("STAGE")
        .default_value("dfa")
        .value_parser(["nfa", "pruned", "dfa-raw", "dfa"])
        .help("Automaton to draw")
}

/// Graph format (--format).
pub fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .default_value("dot")
        .value_parser(["dot", "json"])
        .help("Output format")
}

/// Output directory (-o/--output).
pub fn output_dir_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("DIR")
        .default_value("bin")
        .value_parser(value_parser!(PathBuf))
        .help("Directory for generated files")
}

/// NFA state cap (--max-states).
pub fn max_states_arg() -> Arg {
    Arg::new("max_states")
        .long("max-states")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Largest pruned NFA accepted for subset construction (at most 63)")
}

/// Skip pruning (--no-prune).
pub fn no_prune_arg() -> Arg {
    Arg::new("no_prune")
        .long("no-prune")
        .action(ArgAction::SetTrue)
        .help("Keep epsilon-only and dead states")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}
