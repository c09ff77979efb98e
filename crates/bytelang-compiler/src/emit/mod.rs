//! Bytecode emission.
//!
//! Layout: start address (heap pointer), variable values in declaration
//! order, then each instruction as opcode plus packed arguments.

mod counting;
mod writer;


pub use counting::CountingWriter;
pub use writer::BytecodeWriter;
