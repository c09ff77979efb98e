//! Code generator: statements to resolved instructions and program data.

mod directives;
mod generator;
mod program;

#[cfg(test)]
mod generator_tests;

pub use directives::{Directive, Parameter};
pub use generator::{CodeGenerator, Generated};
pub use program::{CodeInstruction, ProgramData, Variable, pretty_bytes};
