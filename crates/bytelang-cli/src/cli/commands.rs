//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Content root, color and verbosity, accepted by every command.
fn with_common_args(cmd: Command) -> Command {
    cmd.arg(content_arg()).arg(color_arg()).arg(verbose_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("bytelang")
        .about("Compile ByteLang programs into bytecode for small virtual machines")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(compile_command())
        .subcommand(check_command())
        .subcommand(dump_command())
        .subcommand(env_command())
}

pub fn compile_command() -> Command {
    let cmd = Command::new("compile")
        .about("Compile a program into a bytecode file")
        .after_help(
            r#"EXAMPLES:
  bytelang compile draw.bls                     # writes draw.blc
  bytelang compile draw.bls -o out/draw.blc
  bytelang compile draw.bls --log statements,bytecode
  bytelang compile draw.bls --content ./targets"#,
        )
        .arg(source_path_arg())
        .arg(output_arg())
        .arg(log_arg());

    with_common_args(cmd)
}

pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a program without writing bytecode")
        .after_help(
            r#"EXAMPLES:
  bytelang check draw.bls
  cat draw.bls | bytelang check -"#,
        )
        .arg(source_path_arg());

    with_common_args(cmd)
}

pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show the annotated bytecode of a program")
        .after_help(
            r#"EXAMPLES:
  bytelang dump draw.bls
  bytelang dump draw.bls --color never"#,
        )
        .arg(source_path_arg());

    with_common_args(cmd)
}

pub fn env_command() -> Command {
    let cmd = Command::new("env")
        .about("Show the profile and instruction table of an environment")
        .after_help(
            r#"EXAMPLES:
  bytelang env vart_esp32
  bytelang env vart_esp32 --json"#,
        )
        .arg(env_name_arg())
        .arg(json_arg());

    with_common_args(cmd)
}
