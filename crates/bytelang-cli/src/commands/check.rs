use std::io;
use std::path::PathBuf;

use bytelang_compiler::LogFlags;

use super::run_common::{compile_or_exit, load_or_exit, open_compiler};

pub struct CheckArgs {
    pub source_path: PathBuf,
    pub content: PathBuf,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let source = load_or_exit(&args.source_path);
    let compiler = open_compiler(&args.content);
    compile_or_exit(&compiler, &source, io::sink(), LogFlags::NONE, args.color);

    // Silent on success (like cargo check)
}
