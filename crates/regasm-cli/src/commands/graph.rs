use regasm_lib::pattern::{PatternBuilder, PatternParsed};
use regasm_lib::{Automaton, PatternConfig};

use super::run_common::{report_failure, report_warnings};

/// Pipeline stage whose automaton is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Thompson NFA straight from the parser.
    Nfa,
    /// NFA after epsilon-only and dead states are removed.
    Pruned,
    /// Subset construction output before the DFA is pruned.
    RawDfa,
    Dfa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    Dot,
    Json,
}

pub struct GraphArgs {
    pub pattern: String,
    pub stage: Stage,
    pub format: GraphFormat,
    pub name: String,
    pub config: PatternConfig,
    pub color: bool,
}

pub fn run(args: GraphArgs) {
    let automaton = PatternBuilder::new(&args.pattern)
        .with_config(args.config)
        .parse()
        .and_then(|parsed| {
            report_warnings(&args.pattern, parsed.diagnostics(), args.color);
            stage_automaton(parsed, args.stage)
        });

    let automaton = match automaton {
        Ok(automaton) => automaton,
        Err(e) => {
            report_failure(&args.pattern, &e, args.color);
            std::process::exit(1);
        }
    };

    match render(&automaton, args.format, &args.name) {
        Ok(text) => print!("{}", text),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Runs the pipeline up to `stage`. States carry their default names so the
/// drawing matches the labels subset construction produces.
pub fn stage_automaton(parsed: PatternParsed, stage: Stage) -> regasm_lib::Result<Automaton> {
    match stage {
        Stage::Nfa => {
            let mut nfa = parsed.nfa().clone();
            nfa.assign_default_names();
            Ok(nfa)
        }
        Stage::Pruned => {
            let mut nfa = parsed.nfa().clone();
            nfa.prune();
            nfa.assign_default_names();
            Ok(nfa)
        }
        Stage::RawDfa => parsed.raw_dfa(),
        Stage::Dfa => Ok(parsed.determinize()?.dfa().clone()),
    }
}

pub fn render(automaton: &Automaton, format: GraphFormat, name: &str) -> serde_json::Result<String> {
    match format {
        GraphFormat::Dot => Ok(automaton.to_dot(name)),
        GraphFormat::Json => {
            let mut json = serde_json::to_string_pretty(automaton)?;
            json.push('\n');
            Ok(json)
        }
    }
}
