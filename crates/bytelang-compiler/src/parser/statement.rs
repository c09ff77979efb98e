use std::fmt;

use super::argument::UniversalArgument;
use crate::diagnostics::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    DirectiveUse,
    MarkDeclare,
    InstructionCall,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectiveUse => write!(f, "DIRECTIVE_USE"),
            Self::MarkDeclare => write!(f, "MARK_DECLARE"),
            Self::InstructionCall => write!(f, "INSTRUCTION_CALL"),
        }
    }
}

/// One classified source line.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub location: Location,
    /// Zero-based position among the produced statements.
    pub index: usize,
    /// Directive, mark or instruction name, without `.` or `:`.
    pub head: String,
    pub arguments: Vec<UniversalArgument>,
}

impl Statement {
    pub fn line(&self) -> usize {
        self.location.line
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = format!("{}@{}", self.kind, self.index);
        write!(f, "{:<4} {tag:<24} {}", self.location.line, self.head)?;
        if self.kind == StatementKind::MarkDeclare {
            return Ok(());
        }
        write!(f, "(")?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}
