//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;
use regasm_lib::{PatternConfig, Target};

use super::ColorChoice;
use crate::commands::build::BuildArgs;
use crate::commands::check::CheckArgs;
use crate::commands::emit::EmitArgs;
use crate::commands::graph::{GraphArgs, GraphFormat, Stage};

pub struct CheckParams {
    pub patterns: Vec<String>,
    pub pattern_file: Option<PathBuf>,
    pub strict: bool,
    pub config: PatternConfig,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            patterns: parse_patterns(m),
            pattern_file: m.get_one::<PathBuf>("pattern_file").cloned(),
            strict: m.get_flag("strict"),
            config: parse_config(m),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            patterns: p.patterns,
            pattern_file: p.pattern_file,
            strict: p.strict,
            config: p.config,
            color: p.color.should_colorize(),
        }
    }
}

pub struct EmitParams {
    pub pattern: String,
    pub target: Target,
    pub name: String,
    pub config: PatternConfig,
    pub color: ColorChoice,
}

impl EmitParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            pattern: parse_patterns(m).into_iter().next().unwrap_or_default(),
            target: parse_target(m),
            name: parse_name(m),
            config: parse_config(m),
            color: parse_color(m),
        }
    }
}

impl From<EmitParams> for EmitArgs {
    fn from(p: EmitParams) -> Self {
        Self {
            pattern: p.pattern,
            target: p.target,
            name: p.name,
            config: p.config,
            color: p.color.should_colorize(),
        }
    }
}

pub struct GraphParams {
    pub pattern: String,
    pub stage: Stage,
    pub format: GraphFormat,
    pub name: String,
    pub config: PatternConfig,
    pub color: ColorChoice,
}

impl GraphParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            pattern: parse_patterns(m).into_iter().next().unwrap_or_default(),
            stage: parse_stage(m),
            format: parse_format(m),
            name: parse_name(m),
            config: parse_config(m),
            color: parse_color(m),
        }
    }
}

impl From<GraphParams> for GraphArgs {
    fn from(p: GraphParams) -> Self {
        Self {
            pattern: p.pattern,
            stage: p.stage,
            format: p.format,
            name: p.name,
            config: p.config,
            color: p.color.should_colorize(),
        }
    }
}

pub struct BuildParams {
    pub patterns: Vec<String>,
    pub pattern_file: Option<PathBuf>,
    pub output: PathBuf,
    pub config: PatternConfig,
    pub color: ColorChoice,
}

impl BuildParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            patterns: parse_patterns(m),
            pattern_file: m.get_one::<PathBuf>("pattern_file").cloned(),
            output: m
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("bin")),
            config: parse_config(m),
            color: parse_color(m),
        }
    }
}

impl From<BuildParams> for BuildArgs {
    fn from(p: BuildParams) -> Self {
        Self {
            patterns: p.patterns,
            pattern_file: p.pattern_file,
            output: p.output,
            config: p.config,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_patterns(m: &ArgMatches) -> Vec<String> {
    m.get_many::<String>("patterns")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn parse_config(m: &ArgMatches) -> PatternConfig {
    let mut config = PatternConfig::default().with_pruning(!m.get_flag("no_prune"));
    if let Some(&limit) = m.get_one::<usize>("max_states") {
        config = config.with_max_nfa_states(limit);
    }
    config
}

fn parse_name(m: &ArgMatches) -> String {
    m.get_one::<String>("name")
        .cloned()
        .unwrap_or_else(|| "match".to_string())
}

fn parse_target(m: &ArgMatches) -> Target {
    match m.get_one::<String>("target").map(|s| s.as_str()) {
        Some("asm") => Target::Nasm,
        Some("header") => Target::Header,
        _ => Target::C,
    }
}

fn parse_stage(m: &ArgMatches) -> Stage {
    match m.get_one::<String>("stage").map(|s| s.as_str()) {
        Some("nfa") => Stage::Nfa,
        Some("pruned") => Stage::Pruned,
        Some("dfa-raw") => Stage::RawDfa,
        _ => Stage::Dfa,
    }
}

fn parse_format(m: &ArgMatches) -> GraphFormat {
    match m.get_one::<String>("format").map(|s| s.as_str()) {
        Some("json") => GraphFormat::Json,
        _ => GraphFormat::Dot,
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
