use std::io::{self, Write};

use bytelang_core::PackError;

use super::counting::CountingWriter;
use crate::codegen::{CodeInstruction, ProgramData};
use crate::diagnostics::{DiagnosticKind, StageDiagnostics};

pub struct BytecodeWriter<'d> {
    diagnostics: StageDiagnostics<'d>,
}

impl<'d> BytecodeWriter<'d> {
    pub const OWNER: &'static str = "BytecodeWriter";

    pub fn new(diagnostics: StageDiagnostics<'d>) -> Self {
        Self { diagnostics }
    }

    /// Write the program into `out`, returning the byte count.
    ///
    /// Values that do not fit their primitive and a program that reaches the
    /// profile limit are reported, not returned; sink failures are `Err`.
    pub fn run<W: Write>(
        mut self,
        instructions: &[CodeInstruction],
        program: &ProgramData,
        out: W,
    ) -> io::Result<usize> {
        self.diagnostics.begin();
        let mut out = CountingWriter::new(out);

        let start = program
            .heap_pointer()
            .pack_integer(program.start_address as i128);
        self.write_packed(&mut out, start, "start address")?;

        for variable in &program.variables {
            out.write_all(&variable.value)?;
        }

        let index = program.instruction_index();
        for instruction in instructions {
            let encoded = instruction.encode(index);
            self.write_packed(&mut out, encoded, &instruction.instruction.name)?;
        }
        out.flush()?;

        let written = out.written();
        if let Some(limit) = program.environment.profile.max_program_length
            && written >= limit
        {
            self.diagnostics
                .report(DiagnosticKind::ProgramTooLarge)
                .message(format!("{written} bytes, limit {limit}"))
                .hint(format!(
                    "profile `{}` accepts programs below {limit} bytes",
                    program.environment.profile.name
                ))
                .emit();
        }

        log::debug!("wrote {written} bytes");
        Ok(written)
    }

    fn write_packed<W: Write>(
        &mut self,
        out: &mut W,
        packed: Result<Vec<u8>, PackError>,
        what: &str,
    ) -> io::Result<()> {
        match packed {
            Ok(bytes) => out.write_all(&bytes),
            Err(err) => {
                self.diagnostics
                    .report(DiagnosticKind::ValueOutOfRange)
                    .message(format!("{what}: {err}"))
                    .emit();
                Ok(())
            }
        }
    }
}
