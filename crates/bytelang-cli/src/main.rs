//! Command line interface for ByteLang.
//!
//! Compiles `.bls` programs into `.blc` bytecode against a content root
//! and inspects the environments it describes.

mod cli;
mod commands;

use clap::ArgMatches;
use cli::{CheckParams, CompileParams, DumpParams, EnvParams, build_cli, level_filter, verbosity};

fn init_logging(m: &ArgMatches) {
    colog::default_builder()
        .filter_level(level_filter(verbosity(m)))
        .init();
}

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("compile", m)) => {
            init_logging(m);
            let params = CompileParams::from_matches(m);
            commands::compile::run(params.into());
        }
        Some(("check", m)) => {
            init_logging(m);
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("dump", m)) => {
            init_logging(m);
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        Some(("env", m)) => {
            init_logging(m);
            let params = EnvParams::from_matches(m);
            commands::env::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
