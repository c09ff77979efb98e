use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bytelang_compiler::LogFlags;
use bytelang_core::BYTECODE_EXTENSION;

use super::run_common::{compile_or_exit, load_or_exit, open_compiler};

pub struct CompileArgs {
    pub source_path: PathBuf,
    pub output: Option<PathBuf>,
    pub log: LogFlags,
    pub content: PathBuf,
    pub color: bool,
}

pub fn run(args: CompileArgs) {
    let source = load_or_exit(&args.source_path);
    let compiler = open_compiler(&args.content);

    let mut bytes = Vec::new();
    let success = compile_or_exit(&compiler, &source, &mut bytes, args.log, args.color);

    let report = success.message();
    let written = match output_path(&args.source_path, args.output.as_deref()) {
        Some(path) => {
            if !report.is_empty() {
                println!("{}", report);
            }
            fs::write(&path, &bytes).map_err(|e| (path.display().to_string(), e))
        }
        None => write_streamed(
            &report,
            &bytes,
            &mut io::stdout().lock(),
            &mut io::stderr().lock(),
        )
        .map_err(|e| ("<stdout>".to_string(), e)),
    };
    if let Err((target, e)) = written {
        eprintln!("error: failed to write '{}': {}", target, e);
        std::process::exit(1);
    }

    log::info!("{} bytes written", bytes.len());
}

/// Bytecode for a program read from stdin. Stdout carries only the bytes,
/// the report goes to stderr.
pub fn write_streamed<O: Write, E: Write>(
    report: &str,
    bytes: &[u8],
    stdout: &mut O,
    stderr: &mut E,
) -> io::Result<()> {
    if !report.is_empty() {
        writeln!(stderr, "{}", report)?;
    }
    stdout.write_all(bytes)?;
    stdout.flush()
}

/// `-o` if given, otherwise the source path with the bytecode extension.
pub fn output_path(source: &Path, output: Option<&Path>) -> Option<PathBuf> {
    if let Some(output) = output {
        return Some(output.to_path_buf());
    }
    if source.as_os_str() == "-" {
        return None;
    }
    Some(source.with_extension(BYTECODE_EXTENSION))
}
