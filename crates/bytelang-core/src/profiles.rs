//! Virtual machine profiles: pointer widths and program limits.

use std::fmt;
use std::path::Path;
use std::rc::Rc;

use serde::Deserialize;

use crate::error::{ContentError, Result};
use crate::primitives::{PrimitiveType, Primitives, WriteKind};
use crate::registry::{parent_name, parse_json};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    /// Stem of the file the profile was read from.
    pub parent: String,
    /// Programs must stay strictly below this many bytes. `None` means unlimited.
    pub max_program_length: Option<usize>,
    /// Program pointer type (bounds instruction addresses).
    pub pointer_program: Rc<PrimitiveType>,
    /// Heap pointer type (bounds variable addresses, encodes the start address).
    pub pointer_heap: Rc<PrimitiveType>,
    /// Opcode type (bounds the instruction count of an environment).
    pub instruction_index: Rc<PrimitiveType>,
}

#[derive(Debug, Deserialize)]
struct RawProfile {
    #[serde(default)]
    prog_len: Option<usize>,
    ptr_prog: usize,
    ptr_heap: usize,
    ptr_inst: usize,
}

impl Profile {
    pub fn parse(name: &str, path: &Path, text: &str, primitives: &Primitives) -> Result<Self> {
        let raw: RawProfile = parse_json(path, text)?;

        let pointer = |field: &'static str, size: usize| {
            primitives
                .by_size(size, WriteKind::Unsigned)
                .cloned()
                .ok_or_else(|| ContentError::UnknownPointerSize {
                    profile: name.to_string(),
                    field,
                    size,
                })
        };

        let profile = Self {
            name: name.to_string(),
            parent: parent_name(path),
            max_program_length: raw.prog_len,
            pointer_program: pointer("ptr_prog", raw.ptr_prog)?,
            pointer_heap: pointer("ptr_heap", raw.ptr_heap)?,
            instruction_index: pointer("ptr_inst", raw.ptr_inst)?,
        };
        log::debug!("loaded profile `{name}`: {profile}");
        Ok(profile)
    }

    /// Field listing used by the compile report.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let max = match self.max_program_length {
            Some(len) => len.to_string(),
            None => "unlimited".to_string(),
        };
        vec![
            ("name", self.name.clone()),
            ("max_program_length", max),
            ("pointer_program", self.pointer_program.describe()),
            ("pointer_heap", self.pointer_heap.describe()),
            ("instruction_index", self.instruction_index.describe()),
        ]
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "prog={} heap={} inst={}",
            self.pointer_program, self.pointer_heap, self.instruction_index
        )?;
        if let Some(len) = self.max_program_length {
            write!(f, " max={len}B")?;
        }
        Ok(())
    }
}
