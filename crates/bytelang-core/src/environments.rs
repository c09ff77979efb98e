//! Environments: a profile plus the merged instruction table of its packages.

use std::fmt;
use std::path::Path;
use std::rc::Rc;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Deserialize;

use crate::error::{ContentError, Result};
use crate::packages::{POINTER_CHAR, Package};
use crate::primitives::PrimitiveType;
use crate::profiles::Profile;
use crate::registry::parent_name;

const SNAKE_CASE_POINTER_SUFFIX: &str = "_ptr";

/// Instruction argument resolved against a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentArgument {
    /// Storage type of the argument in the instruction stream.
    pub primitive: Rc<PrimitiveType>,
    /// For pointer arguments, the type the VM reads through the address.
    pub pointing: Option<Rc<PrimitiveType>>,
}

impl EnvironmentArgument {
    pub fn is_pointer(&self) -> bool {
        self.pointing.is_some()
    }

    fn snake_case(&self) -> String {
        match &self.pointing {
            Some(pointing) => format!("{}{SNAKE_CASE_POINTER_SUFFIX}", pointing.name),
            None => self.primitive.name.clone(),
        }
    }
}

impl fmt::Display for EnvironmentArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pointing {
            Some(pointing) => write!(f, "{}{POINTER_CHAR}({})", self.primitive, pointing),
            None => write!(f, "{}", self.primitive),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentInstruction {
    /// Name of the profile this instruction was resolved against.
    pub profile: String,
    pub package: String,
    pub name: String,
    /// Opcode, dense and zero-based within the environment.
    pub index: usize,
    pub arguments: Vec<EnvironmentArgument>,
    /// Encoded size in bytes: opcode plus every argument.
    pub size: usize,
}

impl EnvironmentInstruction {
    /// Short header: `[3B] vart::delay_ms@1`.
    pub fn general_info(&self) -> String {
        format!("[{}B] {}::{}@{}", self.size, self.package, self.name, self.index)
    }

    /// Source-level call shape: `vart::set_position(i16, i16)`, `mem::speed_from(u8*)`.
    pub fn signature(&self) -> String {
        let args: Vec<String> = self
            .arguments
            .iter()
            .map(|a| match &a.pointing {
                Some(pointing) => format!("{}{POINTER_CHAR}", pointing.name),
                None => a.primitive.name.clone(),
            })
            .collect();
        format!("{}::{}({})", self.package, self.name, args.join(", "))
    }

    /// Mangled name for generated host-side bindings.
    pub fn snake_case(&self) -> String {
        let args: Vec<String> = self.arguments.iter().map(|a| a.snake_case()).collect();
        format!(
            "__{}_{}_{}__{}",
            self.profile,
            self.package,
            self.name,
            args.join("__")
        )
    }
}

impl fmt::Display for EnvironmentInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.general_info())?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub name: String,
    pub parent: String,
    pub profile: Rc<Profile>,
    /// Instruction table in opcode order.
    pub instructions: IndexMap<String, Rc<EnvironmentInstruction>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawEnvironment {
    pub(crate) profile: String,
    #[serde(default)]
    pub(crate) packages: Vec<String>,
}

impl Environment {
    /// Merge `packages` in order, assigning opcodes from 0.
    ///
    /// An instruction name defined by two packages is an error: there is no overloading.
    pub fn build(
        name: &str,
        path: &Path,
        profile: Rc<Profile>,
        packages: &[Rc<Package>],
    ) -> Result<Self> {
        let mut instructions: IndexMap<String, Rc<EnvironmentInstruction>> = IndexMap::new();

        for package in packages {
            for instruction in &package.instructions {
                let index = instructions.len();
                match instructions.entry(instruction.name.clone()) {
                    Entry::Occupied(existing) => {
                        return Err(ContentError::InstructionOverload {
                            environment: name.to_string(),
                            instruction: instruction.name.clone(),
                            package: package.name.clone(),
                            existing: existing.get().package.clone(),
                        });
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(Rc::new(instruction.transform(index, &profile)));
                    }
                }
            }
        }

        let capacity_bits = profile.instruction_index.size * 8;
        if capacity_bits < usize::BITS as usize && instructions.len() > 1usize << capacity_bits {
            return Err(ContentError::TooManyInstructions {
                environment: name.to_string(),
                count: instructions.len(),
                size: profile.instruction_index.size,
            });
        }

        log::debug!(
            "loaded environment `{name}` ({} instructions, profile `{}`)",
            instructions.len(),
            profile.name
        );
        Ok(Self {
            name: name.to_string(),
            parent: parent_name(path),
            profile,
            instructions,
        })
    }

    pub fn instruction(&self, name: &str) -> Option<&Rc<EnvironmentInstruction>> {
        self.instructions.get(name)
    }
}
