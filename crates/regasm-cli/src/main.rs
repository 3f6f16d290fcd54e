mod cli;
mod commands;

use cli::{BuildParams, CheckParams, EmitParams, GraphParams, build_cli};

fn main() {
    env_logger::init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("emit", m)) => {
            let params = EmitParams::from_matches(m);
            commands::emit::run(params.into());
        }
        Some(("graph", m)) => {
            let params = GraphParams::from_matches(m);
            commands::graph::run(params.into());
        }
        Some(("build", m)) => {
            let params = BuildParams::from_matches(m);
            commands::build::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
