//! Primitive scalar types and their binary encodings.
//!
//! Every packed value in a program (variables, instruction arguments, the
//! start address, opcodes) goes through a [`PrimitiveType`]. All encodings
//! are little-endian, matching the firmware reader which copies raw bytes.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::error::{ContentError, Result};
use crate::registry::{parent_name, parse_json};

const INTEGER_SIZES: &[usize] = &[1, 2, 4, 8];
const EXPONENT_SIZES: &[usize] = &[4, 8];

/// How a primitive stores its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteKind {
    Signed,
    Unsigned,
    Exponent,
}

impl WriteKind {
    fn allowed_sizes(self) -> &'static [usize] {
        match self {
            WriteKind::Exponent => EXPONENT_SIZES,
            WriteKind::Signed | WriteKind::Unsigned => INTEGER_SIZES,
        }
    }
}

impl fmt::Display for WriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteKind::Signed => write!(f, "signed"),
            WriteKind::Unsigned => write!(f, "unsigned"),
            WriteKind::Exponent => write!(f, "exponent"),
        }
    }
}

/// A numeric value ready to be packed.
///
/// Integer primitives floor exponent values; exponent primitives widen integers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar {
    Integer(i128),
    Exponent(f64),
}

impl Scalar {
    pub fn integer(self) -> i128 {
        match self {
            Scalar::Integer(v) => v,
            Scalar::Exponent(v) => v.floor() as i128,
        }
    }

    pub fn exponent(self) -> f64 {
        match self {
            Scalar::Integer(v) => v as f64,
            Scalar::Exponent(v) => v,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(v) => write!(f, "{v}"),
            Scalar::Exponent(v) => write!(f, "{v:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("{value} is out of range for {primitive}")]
    OutOfRange { value: String, primitive: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveType {
    pub name: String,
    /// Registry the primitive was declared in (file stem, e.g. `std`).
    pub parent: String,
    pub size: usize,
    pub kind: WriteKind,
}

impl PrimitiveType {
    pub fn pack(&self, value: Scalar) -> std::result::Result<Vec<u8>, PackError> {
        match self.kind {
            WriteKind::Exponent => self.pack_exponent(value.exponent()),
            WriteKind::Signed | WriteKind::Unsigned => self.pack_integer(value.integer()),
        }
    }

    pub fn pack_integer(&self, value: i128) -> std::result::Result<Vec<u8>, PackError> {
        let bits = (self.size * 8) as u32;
        let (min, max) = match self.kind {
            WriteKind::Exponent => return self.pack_exponent(value as f64),
            WriteKind::Unsigned => (0i128, (1i128 << bits) - 1),
            WriteKind::Signed => (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1),
        };
        if value < min || value > max {
            return Err(self.out_of_range(value));
        }
        // Two's complement truncation is correct for both signed and unsigned in range.
        Ok(value.to_le_bytes()[..self.size].to_vec())
    }

    pub fn pack_exponent(&self, value: f64) -> std::result::Result<Vec<u8>, PackError> {
        match self.size {
            4 => {
                if value.is_finite() && value.abs() > f32::MAX as f64 {
                    return Err(self.out_of_range(value));
                }
                Ok((value as f32).to_le_bytes().to_vec())
            }
            _ => Ok(value.to_le_bytes().to_vec()),
        }
    }

    /// Decode a little-endian unsigned value of this primitive's size.
    pub fn read_unsigned(&self, bytes: &[u8]) -> Option<u64> {
        let raw = bytes.get(..self.size)?;
        let mut buf = [0u8; 8];
        buf[..self.size].copy_from_slice(raw);
        Some(u64::from_le_bytes(buf))
    }

    /// Long form used in registry listings: `[signed 16-bit] std::i16`.
    pub fn describe(&self) -> String {
        format!("[{} {}-bit] {}", self.kind, self.size * 8, self)
    }

    fn out_of_range(&self, value: impl fmt::Display) -> PackError {
        PackError::OutOfRange {
            value: value.to_string(),
            primitive: self.to_string(),
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.parent, self.name)
    }
}

#[derive(Debug, Deserialize)]
struct RawPrimitive {
    size: usize,
    #[serde(rename = "type")]
    kind: WriteKind,
}

/// Registry of primitive types, loaded eagerly from a single JSON map.
#[derive(Debug, Default)]
pub struct Primitives {
    by_name: IndexMap<String, Rc<PrimitiveType>>,
    by_size: HashMap<(usize, WriteKind), Rc<PrimitiveType>>,
}

impl Primitives {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parent = parent_name(path);
        let raw: IndexMap<String, RawPrimitive> = parse_json(path, &text)?;

        let primitives = Self::from_raw(&parent, raw)?;
        log::debug!(
            "loaded {} primitives from {}",
            primitives.len(),
            path.display()
        );
        Ok(primitives)
    }

    /// Parse primitives from JSON text. `parent` names the registry.
    pub fn from_json(parent: &str, json: &str) -> Result<Self> {
        let raw: IndexMap<String, RawPrimitive> = parse_json(Path::new(parent), json)?;
        Self::from_raw(parent, raw)
    }

    fn from_raw(parent: &str, raw: IndexMap<String, RawPrimitive>) -> Result<Self> {
        let mut primitives = Self::default();
        for (name, raw) in raw {
            primitives.insert(parent, name, raw)?;
        }
        Ok(primitives)
    }

    fn insert(&mut self, parent: &str, name: String, raw: RawPrimitive) -> Result<()> {
        let key = (raw.size, raw.kind);
        if let Some(existing) = self.by_size.get(&key) {
            return Err(ContentError::PrimitiveAlias {
                name,
                existing: existing.name.clone(),
                kind: raw.kind.to_string(),
                size: raw.size,
            });
        }

        let allowed = raw.kind.allowed_sizes();
        if !allowed.contains(&raw.size) {
            return Err(ContentError::InvalidPrimitiveSize {
                name,
                size: raw.size,
                allowed,
            });
        }

        let primitive = Rc::new(PrimitiveType {
            name: name.clone(),
            parent: parent.to_string(),
            size: raw.size,
            kind: raw.kind,
        });
        self.by_size.insert(key, Rc::clone(&primitive));
        self.by_name.insert(name, primitive);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Rc<PrimitiveType>> {
        self.by_name.get(name)
    }

    pub fn by_size(&self, size: usize, kind: WriteKind) -> Option<&Rc<PrimitiveType>> {
        self.by_size.get(&(size, kind))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<PrimitiveType>> {
        self.by_name.values()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
