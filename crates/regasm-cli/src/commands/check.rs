use std::path::PathBuf;

use regasm_lib::PatternConfig;
use regasm_lib::pattern::PatternBuilder;

use super::pattern_loader::load_patterns;
use super::run_common::{report_failure, report_warnings};

pub struct CheckArgs {
    pub patterns: Vec<String>,
    pub pattern_file: Option<PathBuf>,
    pub strict: bool,
    pub config: PatternConfig,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let patterns = match load_patterns(&args.patterns, args.pattern_file.as_deref()) {
        Ok(patterns) => patterns,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let failed = patterns
        .iter()
        .filter(|pattern| !check_one(pattern, &args))
        .count();

    if failed > 0 {
        eprintln!("error: {} of {} patterns failed", failed, patterns.len());
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}

fn check_one(pattern: &str, args: &CheckArgs) -> bool {
    let parsed = match PatternBuilder::new(pattern).with_config(args.config).parse() {
        Ok(parsed) => parsed,
        Err(e) => {
            report_failure(pattern, &e, args.color);
            return false;
        }
    };

    report_warnings(pattern, parsed.diagnostics(), args.color);
    let warned = parsed.diagnostics().has_warnings();

    if let Err(e) = parsed.determinize() {
        report_failure(pattern, &e, args.color);
        return false;
    }

    !(args.strict && warned)
}
