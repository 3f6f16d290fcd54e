//! Helpers shared by commands that compile patterns.

use regasm_lib::pattern::{PatternBuilder, PatternDeterministic};
use regasm_lib::{Diagnostics, Error, PatternConfig};

/// Parses and determinizes `pattern`, printing warnings as they come.
pub fn determinize(
    pattern: &str,
    config: PatternConfig,
    color: bool,
) -> regasm_lib::Result<PatternDeterministic> {
    let parsed = PatternBuilder::new(pattern).with_config(config).parse()?;
    report_warnings(pattern, parsed.diagnostics(), color);
    parsed.determinize()
}

pub fn report_warnings(pattern: &str, diagnostics: &Diagnostics, color: bool) {
    if diagnostics.is_empty() {
        return;
    }
    eprintln!("{}", diagnostics.render_colored(pattern, color));
}

/// Parse errors are rendered against the pattern; other failures get one line.
pub fn report_failure(pattern: &str, error: &Error, color: bool) {
    match error {
        Error::Parse(diagnostics) => eprintln!("{}", diagnostics.render_colored(pattern, color)),
        other => eprintln!("error: {pattern:?}: {other}"),
    }
}

/// Runs [`determinize`] and exits on failure.
pub fn determinize_or_exit(pattern: &str, config: PatternConfig, color: bool) -> PatternDeterministic {
    match determinize(pattern, config, color) {
        Ok(det) => det,
        Err(e) => {
            report_failure(pattern, &e, color);
            std::process::exit(1);
        }
    }
}
