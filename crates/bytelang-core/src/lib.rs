//! Target machine description for ByteLang.
//!
//! This crate loads the static configuration the compiler resolves programs
//! against:
//! - `primitives` - sized integer/float encodings
//! - `profiles` - pointer widths and program size limits
//! - `packages` - profile-independent instruction templates
//! - `environments` - a profile plus a merged, indexed instruction table
//! - `content` - the root bundling all registries

pub mod colors;
pub mod content;
pub mod environments;
pub mod error;
pub mod packages;
pub mod primitives;
pub mod profiles;
pub mod registry;

#[cfg(test)]
mod primitives_tests;

pub use colors::Colors;
pub use content::Content;
pub use environments::{Environment, EnvironmentArgument, EnvironmentInstruction};
pub use error::{ContentError, Result};
pub use packages::{Package, PackageArgument, PackageInstruction};
pub use primitives::{PackError, PrimitiveType, Primitives, Scalar, WriteKind};
pub use profiles::Profile;
pub use registry::Catalog;

pub const BYTELANG_VERSION: &str = "v6";

pub const SOURCE_EXTENSION: &str = "bls";
pub const PACKAGE_EXTENSION: &str = "blp";
pub const BYTECODE_EXTENSION: &str = "blc";
pub const JSON_EXTENSION: &str = "json";
