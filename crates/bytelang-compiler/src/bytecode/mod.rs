//! Compiled programs and their human-readable views.

mod dump;
mod layout;


pub use dump::dump;
pub use layout::{Region, RegionKind, layout};

use crate::codegen::{CodeInstruction, ProgramData};

/// Bytecode together with the data it was generated from.
#[derive(Debug, Clone)]
pub struct CompiledProgram {
    pub bytes: Vec<u8>,
    pub instructions: Vec<CodeInstruction>,
    pub program: ProgramData,
}

impl CompiledProgram {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}
