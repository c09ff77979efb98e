//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so the same definition can be
//! composed into several commands.

use std::path::PathBuf;

use bytelang_compiler::LogFlags;
use clap::{Arg, ArgAction, value_parser};

/// Program source file (positional, "-" for stdin).
pub fn source_path_arg() -> Arg {
    Arg::new("source_path")
        .value_name("SOURCE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("ByteLang source file (use \"-\" for stdin)")
}

/// Bytecode destination (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Bytecode file (defaults to the source path with a .blc extension)")
}

/// Report sections (--log).
pub fn log_arg() -> Arg {
    Arg::new("log")
        .long("log")
        .value_name("FLAGS")
        .default_value("none")
        .value_parser(|s: &str| s.parse::<LogFlags>())
        .help("Report sections, comma separated (e.g. statements,bytecode or all)")
}

/// Content root (--content).
pub fn content_arg() -> Arg {
    Arg::new("content")
        .long("content")
        .value_name("DIR")
        .default_value("content")
        .value_parser(value_parser!(PathBuf))
        .help("Directory with std.json, profiles/, packages/ and env/")
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

/// Log verbosity (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .help("Verbosity level (-v info, -vv debug, -vvv trace)")
}

/// Environment name (positional).
pub fn env_name_arg() -> Arg {
    Arg::new("env_name")
        .value_name("NAME")
        .required(true)
        .help("Environment name (a file in <content>/env/)")
}

/// JSON output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print as JSON")
}
