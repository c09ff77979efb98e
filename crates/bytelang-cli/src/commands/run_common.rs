//! Steps shared by the commands that compile a program.

use std::io::Write;
use std::path::Path;

use bytelang_compiler::{ByteLangCompiler, CompileResult, CompileSuccess, LogFlags};

use super::source_loader::{LoadedSource, load_source};

pub fn open_compiler(content: &Path) -> ByteLangCompiler {
    match ByteLangCompiler::open(content) {
        Ok(compiler) => compiler,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

pub fn load_or_exit(path: &Path) -> LoadedSource {
    load_source(path).unwrap_or_else(|msg| {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    })
}

/// Compile `source` into `destination`, or print the diagnostics and exit.
pub fn compile_or_exit<W: Write>(
    compiler: &ByteLangCompiler,
    source: &LoadedSource,
    destination: W,
    flags: LogFlags,
    color: bool,
) -> CompileSuccess {
    let result = match compiler.compile(&source.text, destination, flags) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    match result {
        CompileResult::Success(success) => success,
        CompileResult::Failure(failure) => {
            let rendered = failure
                .diagnostics
                .printer()
                .source(&source.text)
                .path(&source.name)
                .colored(color)
                .render();
            eprint!("{}", rendered);
            let count = failure.diagnostics.len();
            eprintln!(
                "error: could not compile `{}` due to {} previous error{}",
                source.name,
                count,
                if count == 1 { "" } else { "s" }
            );
            std::process::exit(1);
        }
    }
}
