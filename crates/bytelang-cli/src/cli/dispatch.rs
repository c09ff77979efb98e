//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs populated from clap matches
//! - `Into<*Args>` impls bridging dispatch to the command handlers
//! - `verbosity()` and `level_filter()` for the logger, read before any command runs

use std::path::PathBuf;

use bytelang_compiler::LogFlags;
use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::compile::CompileArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::env::EnvArgs;

pub struct CompileParams {
    pub source_path: PathBuf,
    pub output: Option<PathBuf>,
    pub log: LogFlags,
    pub content: PathBuf,
    pub color: ColorChoice,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: source_path(m),
            output: m.get_one::<PathBuf>("output").cloned(),
            log: m.get_one::<LogFlags>("log").copied().unwrap_or_default(),
            content: content(m),
            color: parse_color(m),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        Self {
            source_path: p.source_path,
            output: p.output,
            log: p.log,
            content: p.content,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub source_path: PathBuf,
    pub content: PathBuf,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: source_path(m),
            content: content(m),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            source_path: p.source_path,
            content: p.content,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub source_path: PathBuf,
    pub content: PathBuf,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: source_path(m),
            content: content(m),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            source_path: p.source_path,
            content: p.content,
            color: p.color.should_colorize(),
        }
    }
}

pub struct EnvParams {
    pub name: String,
    pub json: bool,
    pub content: PathBuf,
}

impl EnvParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            name: m.get_one::<String>("env_name").cloned().unwrap_or_default(),
            json: m.get_flag("json"),
            content: content(m),
        }
    }
}

impl From<EnvParams> for EnvArgs {
    fn from(p: EnvParams) -> Self {
        Self {
            name: p.name,
            json: p.json,
            content: p.content,
        }
    }
}

/// Number of `-v` flags given to the subcommand.
pub fn verbosity(m: &ArgMatches) -> u8 {
    m.get_one::<u8>("verbose").copied().unwrap_or(0)
}

/// Log level for a given `-v` count: warnings only, then info, debug and trace.
pub fn level_filter(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn source_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("source_path")
        .cloned()
        .unwrap_or_default()
}

fn content(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("content")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("content"))
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
