use std::rc::Rc;
use std::time::Duration;

use bytelang_core::{Colors, PrimitiveType};

use super::log_flags::LogFlags;
use super::report::{column, section, table};
use crate::bytecode::{CompiledProgram, dump};
use crate::diagnostics::Diagnostics;
use crate::parser::Statement;

/// Everything a successful compile produced, kept for the report.
#[derive(Debug, Clone)]
pub struct CompileSuccess {
    pub flags: LogFlags,
    pub primitives: Vec<Rc<PrimitiveType>>,
    pub statements: Vec<Statement>,
    pub compiled: CompiledProgram,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct CompileFailure {
    pub diagnostics: Diagnostics,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub enum CompileResult {
    Success(CompileSuccess),
    Failure(CompileFailure),
}

impl CompileResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn success(&self) -> Option<&CompileSuccess> {
        match self {
            Self::Success(success) => Some(success),
            Self::Failure(_) => None,
        }
    }

    /// Diagnostics of a failed compile.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(&failure.diagnostics),
        }
    }

    pub fn elapsed(&self) -> Duration {
        match self {
            Self::Success(success) => success.elapsed,
            Self::Failure(failure) => failure.elapsed,
        }
    }

    /// Report sections selected by the log flags, or the numbered error log.
    pub fn message(&self) -> String {
        match self {
            Self::Success(success) => success.message(),
            Self::Failure(failure) => failure.message(),
        }
    }
}

impl CompileFailure {
    pub fn message(&self) -> String {
        section("errors", &column(self.diagnostics.iter()))
    }
}

impl CompileSuccess {
    pub fn size(&self) -> usize {
        self.compiled.size()
    }

    pub fn message(&self) -> String {
        let program = &self.compiled.program;
        let environment = &program.environment;
        let mut sections = Vec::new();

        for &(name, flag) in LogFlags::SECTIONS {
            if !self.flags.contains(flag) {
                continue;
            }
            let body = match flag {
                LogFlags::PRIMITIVES => column(self.primitives.iter().map(|p| p.describe())),
                LogFlags::ENVIRONMENT_INSTRUCTIONS => {
                    column(environment.instructions.values())
                }
                LogFlags::PROFILE => table(&environment.profile.fields()),
                LogFlags::STATEMENTS => column(&self.statements),
                LogFlags::CONSTANTS => {
                    let pairs: Vec<(&str, String)> = program
                        .constants
                        .iter()
                        .map(|(name, value)| (name.as_str(), value.to_string()))
                        .collect();
                    table(&pairs)
                }
                LogFlags::VARIABLES => column(&program.variables),
                LogFlags::CODE_INSTRUCTIONS => column(
                    self.compiled
                        .instructions
                        .iter()
                        .map(|i| format!("{:04X} {i}", i.address)),
                ),
                LogFlags::BYTECODE => dump(&self.compiled, Colors::OFF).trim_end().to_string(),
                LogFlags::PROGRAM_SIZE => format!("{} bytes", self.size()),
                LogFlags::COMPILATION_TIME => format!("{:.2?}", self.elapsed),
                _ => continue,
            };
            let title = match flag {
                LogFlags::ENVIRONMENT_INSTRUCTIONS => format!("{} instructions", environment.name),
                _ => name.replace('_', " "),
            };
            sections.push(section(&title, &body));
        }

        sections.join("\n")
    }
}
