use std::io;
use std::path::PathBuf;

use bytelang_compiler::LogFlags;
use bytelang_compiler::bytecode::dump;
use bytelang_core::Colors;

use super::run_common::{compile_or_exit, load_or_exit, open_compiler};

pub struct DumpArgs {
    pub source_path: PathBuf,
    pub content: PathBuf,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let source = load_or_exit(&args.source_path);
    let compiler = open_compiler(&args.content);
    let success = compile_or_exit(&compiler, &source, io::sink(), LogFlags::NONE, args.color);

    let colors = Colors::new(args.color);
    print!("{}", dump(&success.compiled, colors));
}
