//! ByteLang compiler: text programs to compact bytecode for small virtual machines.
//!
//! This crate provides the compilation pipeline:
//! - `parser` - line classification into directives, marks and instruction calls
//! - `codegen` - symbol resolution, address assignment and argument packing
//! - `emit` - bytecode serialization
//! - `bytecode` - compiled program, layout and annotated dump
//! - `diagnostics` - source error reporting
//! - `compiler` - the `ByteLangCompiler` facade

pub mod bytecode;
pub mod codegen;
pub mod compiler;
pub mod diagnostics;
pub mod emit;
pub mod parser;

#[cfg(test)]
pub mod test_utils;

pub use bytecode::CompiledProgram;
pub use compiler::{ByteLangCompiler, CompileFailure, CompileResult, CompileSuccess, LogFlags};
pub use diagnostics::{Diagnostics, DiagnosticsPrinter};

/// Faults that are not problems of the compiled source.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The content root is broken: unreadable file, malformed JSON, bad package line.
    #[error(transparent)]
    Content(#[from] bytelang_core::ContentError),

    /// Reading the source or writing the bytecode failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
