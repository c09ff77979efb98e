//! Instruction packages.
//!
//! A package is a profile-independent list of instruction templates, one per
//! line:
//!
//! ```text
//! # comment
//! delay_ms u16
//! move_to i16 i16
//! set_speed_from u8*
//! ```
//!
//! A trailing `*` marks a pointer argument: the instruction receives a heap
//! address and the VM reads a value of the named primitive through it.

use std::fmt;
use std::path::Path;
use std::rc::Rc;

use indexmap::IndexSet;

use crate::environments::{EnvironmentArgument, EnvironmentInstruction};
use crate::error::{ContentError, Result};
use crate::primitives::{PrimitiveType, Primitives};
use crate::profiles::Profile;
use crate::registry::parent_name;

pub const POINTER_CHAR: char = '*';
pub const COMMENT_CHAR: char = '#';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageArgument {
    pub primitive: Rc<PrimitiveType>,
    pub is_pointer: bool,
}

impl PackageArgument {
    /// Resolve against a profile: pointers are stored as heap addresses.
    pub fn transform(&self, profile: &Profile) -> EnvironmentArgument {
        if !self.is_pointer {
            return EnvironmentArgument {
                primitive: Rc::clone(&self.primitive),
                pointing: None,
            };
        }
        EnvironmentArgument {
            primitive: Rc::clone(&profile.pointer_heap),
            pointing: Some(Rc::clone(&self.primitive)),
        }
    }
}

impl fmt::Display for PackageArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primitive)?;
        if self.is_pointer {
            write!(f, "{POINTER_CHAR}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInstruction {
    pub package: String,
    pub name: String,
    pub arguments: Vec<PackageArgument>,
}

impl PackageInstruction {
    pub fn transform(&self, index: usize, profile: &Profile) -> EnvironmentInstruction {
        let arguments: Vec<EnvironmentArgument> = self
            .arguments
            .iter()
            .map(|arg| arg.transform(profile))
            .collect();
        let size = profile.instruction_index.size
            + arguments.iter().map(|a| a.primitive.size).sum::<usize>();

        EnvironmentInstruction {
            profile: profile.name.clone(),
            package: self.package.clone(),
            name: self.name.clone(),
            index,
            arguments,
            size,
        }
    }
}

impl fmt::Display for PackageInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}(", self.package, self.name)?;
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
pub struct Package {
    pub name: String,
    pub parent: String,
    pub instructions: Vec<PackageInstruction>,
}

impl Package {
    pub fn parse(name: &str, path: &Path, text: &str, primitives: &Primitives) -> Result<Self> {
        let mut used = IndexSet::new();
        let mut instructions = Vec::new();

        for (line_index, line) in text.lines().enumerate() {
            let line = strip_comment(line);
            if line.is_empty() {
                continue;
            }
            let instruction = parse_line(name, line_index + 1, line, primitives)?;
            if !used.insert(instruction.name.clone()) {
                return Err(ContentError::DuplicateInstruction {
                    package: name.to_string(),
                    instruction: instruction.name,
                    line: line_index + 1,
                });
            }
            instructions.push(instruction);
        }

        log::debug!(
            "loaded package `{name}` with {} instructions",
            instructions.len()
        );
        Ok(Self {
            name: name.to_string(),
            parent: parent_name(path),
            instructions,
        })
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT_CHAR) {
        Some(at) => line[..at].trim(),
        None => line.trim(),
    }
}

fn parse_line(
    package: &str,
    line: usize,
    text: &str,
    primitives: &Primitives,
) -> Result<PackageInstruction> {
    let mut tokens = text.split_whitespace();
    // Caller guarantees a non-empty line.
    let name = tokens.next().unwrap_or_default().to_string();

    let arguments = tokens
        .enumerate()
        .map(|(index, token)| {
            let is_pointer = token.ends_with(POINTER_CHAR);
            let type_name = token.trim_end_matches(POINTER_CHAR);
            let primitive = primitives.get(type_name).cloned().ok_or_else(|| {
                ContentError::UnknownPrimitive {
                    package: package.to_string(),
                    instruction: name.clone(),
                    index,
                    token: token.to_string(),
                    line,
                }
            })?;
            Ok(PackageArgument {
                primitive,
                is_pointer,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PackageInstruction {
        package: package.to_string(),
        name,
        arguments,
    })
}
