//! Resolved program: variables, constants, marks and code instructions.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use bytelang_core::{Environment, EnvironmentInstruction, PackError, PrimitiveType};
use indexmap::IndexMap;

use crate::parser::UniversalArgument;

/// Hex dump grouped in pairs from the right: `01_0203`.
pub fn pretty_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 2 == 0 {
            out.push('_');
        }
        out.push_str(&format!("{byte:02X}"));
    }
    out
}

/// A heap cell declared with `.ptr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub address: usize,
    pub identifier: String,
    pub primitive: Rc<PrimitiveType>,
    /// Initial value, already packed by `primitive`.
    pub value: Vec<u8>,
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}@{} = {}",
            self.primitive,
            self.identifier,
            self.address,
            pretty_bytes(&self.value)
        )
    }
}

/// One emitted instruction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeInstruction {
    pub instruction: Rc<EnvironmentInstruction>,
    /// Packed bytes per argument, in call order.
    pub arguments: Vec<Vec<u8>>,
    pub address: usize,
}

impl CodeInstruction {
    pub fn size(&self) -> usize {
        self.instruction.size
    }

    /// Opcode packed by `index` followed by the argument bytes.
    pub fn encode(&self, index: &PrimitiveType) -> Result<Vec<u8>, PackError> {
        let mut bytes = index.pack_integer(self.instruction.index as i128)?;
        for argument in &self.arguments {
            bytes.extend_from_slice(argument);
        }
        Ok(bytes)
    }
}

impl fmt::Display for CodeInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.instruction.general_info())?;
        let pairs = self.instruction.arguments.iter().zip(&self.arguments);
        for (i, (declared, bytes)) in pairs.enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " ({}){}", declared.primitive, pretty_bytes(bytes))?;
        }
        if !self.arguments.is_empty() {
            write!(f, " ")?;
        }
        write!(f, "}}")
    }
}

/// Everything the writer needs beyond the instruction stream.
#[derive(Debug, Clone)]
pub struct ProgramData {
    pub environment: Rc<Environment>,
    /// First instruction byte; equals the end of the variable block.
    pub start_address: usize,
    pub variables: Vec<Variable>,
    pub constants: IndexMap<String, UniversalArgument>,
    /// Mark names by address, in declaration order.
    pub marks: BTreeMap<usize, Vec<String>>,
}

impl ProgramData {
    pub fn heap_pointer(&self) -> &Rc<PrimitiveType> {
        &self.environment.profile.pointer_heap
    }

    pub fn instruction_index(&self) -> &Rc<PrimitiveType> {
        &self.environment.profile.instruction_index
    }
}
