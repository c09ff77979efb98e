//! Errors raised while loading target machine content.
//!
//! Content is static configuration shipped next to the compiler, so every
//! fault here is fatal for the caller. Source-level problems are reported as
//! diagnostics by the compiler instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("not a content folder: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("primitive `{name}`: invalid size {size}, must be one of {allowed:?}")]
    InvalidPrimitiveSize {
        name: String,
        size: usize,
        allowed: &'static [usize],
    },

    #[error("primitive `{name}` aliases `{existing}` ({kind} {size}B); type aliases are not supported")]
    PrimitiveAlias {
        name: String,
        existing: String,
        kind: String,
        size: usize,
    },

    #[error("profile `{profile}`: no unsigned primitive of size {size} for `{field}`")]
    UnknownPointerSize {
        profile: String,
        field: &'static str,
        size: usize,
    },

    #[error("package `{package}` line {line}: unknown primitive `{token}` at argument {index} of `{instruction}`")]
    UnknownPrimitive {
        package: String,
        instruction: String,
        index: usize,
        token: String,
        line: usize,
    },

    #[error("package `{package}` line {line}: redefinition of `{instruction}`")]
    DuplicateInstruction {
        package: String,
        instruction: String,
        line: usize,
    },

    #[error("environment `{environment}`: `{instruction}` from `{package}` is already defined by `{existing}`; overloading is not allowed")]
    InstructionOverload {
        environment: String,
        instruction: String,
        package: String,
        existing: String,
    },

    #[error("environment `{environment}`: {count} instructions do not fit the {size}B instruction index")]
    TooManyInstructions {
        environment: String,
        count: usize,
        size: usize,
    },

    #[error("environment `{environment}`: profile `{profile}` not found")]
    MissingProfile {
        environment: String,
        profile: String,
    },

    #[error("environment `{environment}`: package `{package}` not found")]
    MissingPackage {
        environment: String,
        package: String,
    },
}

pub type Result<T> = std::result::Result<T, ContentError>;
