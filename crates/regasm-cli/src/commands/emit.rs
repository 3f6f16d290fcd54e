use regasm_lib::{PatternConfig, Target};

use super::run_common::determinize_or_exit;

pub struct EmitArgs {
    pub pattern: String,
    pub target: Target,
    pub name: String,
    pub config: PatternConfig,
    pub color: bool,
}

pub fn run(args: EmitArgs) {
    let compiled = determinize_or_exit(&args.pattern, args.config, args.color).compile();
    print!("{}", compiled.render(args.target, &args.name));
}
