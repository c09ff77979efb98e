//! Compiler facade: parser, generator and writer behind one call.
//!
//! Each stage runs only if every earlier stage finished without
//! diagnostics. Bytes reach the destination only after the whole
//! program has been written and validated.

mod log_flags;
mod report;
mod result;

#[cfg(test)]
mod compiler_tests;

use std::io::{Read, Write};
use std::path::Path;
use std::time::Instant;

use bytelang_core::Content;

pub use log_flags::{LogFlags, UnknownLogFlag};
pub use report::{column, section, table, title};
pub use result::{CompileFailure, CompileResult, CompileSuccess};

use crate::Result;
use crate::bytecode::CompiledProgram;
use crate::codegen::CodeGenerator;
use crate::diagnostics::Diagnostics;
use crate::emit::BytecodeWriter;
use crate::parser::StatementParser;

pub struct ByteLangCompiler {
    content: Content,
}

impl ByteLangCompiler {
    pub fn new(content: Content) -> Self {
        Self { content }
    }

    /// Open the content root at `root` and build a compiler for it.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Content::open(root)?))
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Compile `source` into `destination`.
    ///
    /// Source problems yield `Ok` with a failure result and leave the
    /// destination untouched. `Err` is reserved for broken content and
    /// I/O failures.
    pub fn compile<W: Write>(
        &self,
        source: &str,
        mut destination: W,
        flags: LogFlags,
    ) -> Result<CompileResult> {
        let started = Instant::now();
        let mut diagnostics = Diagnostics::new();
        let failure = |diagnostics: Diagnostics| -> Result<CompileResult> {
            Ok(CompileResult::Failure(CompileFailure {
                diagnostics,
                elapsed: started.elapsed(),
            }))
        };

        let statements = StatementParser::new(diagnostics.stage(StatementParser::OWNER)).run(source);
        if !diagnostics.is_success() {
            return failure(diagnostics);
        }

        let generated = CodeGenerator::new(&self.content, diagnostics.stage(CodeGenerator::OWNER))
            .run(&statements)?;
        let Some(program) = generated.program else {
            return failure(diagnostics);
        };
        if !diagnostics.is_success() {
            return failure(diagnostics);
        }

        let mut bytes = Vec::new();
        BytecodeWriter::new(diagnostics.stage(BytecodeWriter::OWNER)).run(
            &generated.instructions,
            &program,
            &mut bytes,
        )?;
        if !diagnostics.is_success() {
            return failure(diagnostics);
        }

        destination.write_all(&bytes)?;
        destination.flush()?;

        let elapsed = started.elapsed();
        log::debug!(
            "compiled {} statements into {} bytes in {elapsed:.2?}",
            statements.len(),
            bytes.len()
        );
        Ok(CompileResult::Success(CompileSuccess {
            flags,
            primitives: self.content.primitives().iter().cloned().collect(),
            statements,
            compiled: CompiledProgram {
                bytes,
                instructions: generated.instructions,
                program,
            },
            elapsed,
        }))
    }

    /// Like [`compile`](Self::compile), reading the whole source from `source` first.
    pub fn compile_reader<R: Read, W: Write>(
        &self,
        mut source: R,
        destination: W,
        flags: LogFlags,
    ) -> Result<CompileResult> {
        let mut text = String::new();
        source.read_to_string(&mut text)?;
        self.compile(&text, destination, flags)
    }
}
