use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// Sections rendered by [`CompileResult::message`](super::CompileResult::message).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LogFlags(u16);

impl LogFlags {
    pub const NONE: Self = Self(0);
    pub const PRIMITIVES: Self = Self(1 << 0);
    pub const ENVIRONMENT_INSTRUCTIONS: Self = Self(1 << 1);
    pub const PROFILE: Self = Self(1 << 2);
    pub const STATEMENTS: Self = Self(1 << 3);
    pub const CODE_INSTRUCTIONS: Self = Self(1 << 4);
    pub const COMPILATION_TIME: Self = Self(1 << 5);
    pub const PROGRAM_SIZE: Self = Self(1 << 6);
    pub const VARIABLES: Self = Self(1 << 7);
    pub const CONSTANTS: Self = Self(1 << 8);
    pub const BYTECODE: Self = Self(1 << 9);

    pub const REGISTRIES: Self =
        Self(Self::PRIMITIVES.0 | Self::ENVIRONMENT_INSTRUCTIONS.0 | Self::PROFILE.0);
    pub const PARSER_RESULTS: Self = Self(Self::STATEMENTS.0 | Self::CODE_INSTRUCTIONS.0);
    pub const PROGRAM_VALUES: Self =
        Self(Self::VARIABLES.0 | Self::CONSTANTS.0 | Self::PROGRAM_SIZE.0);
    /// Every section except the timing line, which differs from run to run.
    pub const ALL: Self = Self(
        Self::REGISTRIES.0 | Self::PARSER_RESULTS.0 | Self::PROGRAM_VALUES.0 | Self::BYTECODE.0,
    );

    /// Single flags, in the order their sections are rendered.
    pub const SECTIONS: &'static [(&'static str, LogFlags)] = &[
        ("primitives", Self::PRIMITIVES),
        ("environment_instructions", Self::ENVIRONMENT_INSTRUCTIONS),
        ("profile", Self::PROFILE),
        ("statements", Self::STATEMENTS),
        ("constants", Self::CONSTANTS),
        ("variables", Self::VARIABLES),
        ("code_instructions", Self::CODE_INSTRUCTIONS),
        ("bytecode", Self::BYTECODE),
        ("program_size", Self::PROGRAM_SIZE),
        ("compilation_time", Self::COMPILATION_TIME),
    ];

    pub const GROUPS: &'static [(&'static str, LogFlags)] = &[
        ("registries", Self::REGISTRIES),
        ("parser_results", Self::PARSER_RESULTS),
        ("program_values", Self::PROGRAM_VALUES),
        ("all", Self::ALL),
        ("none", Self::NONE),
    ];

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for LogFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for LogFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log flag `{0}`")]
pub struct UnknownLogFlag(pub String);

impl FromStr for LogFlags {
    type Err = UnknownLogFlag;

    /// Comma separated, case-insensitive names: `statements,bytecode`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Self::NONE;
        for name in s.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let name = name.to_ascii_lowercase();
            let (_, flag) = Self::SECTIONS
                .iter()
                .chain(Self::GROUPS)
                .find(|(known, _)| *known == name)
                .ok_or_else(|| UnknownLogFlag(name.clone()))?;
            flags |= *flag;
        }
        Ok(flags)
    }
}

impl fmt::Display for LogFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Self::SECTIONS
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
            .collect();
        if names.is_empty() {
            return write!(f, "none");
        }
        write!(f, "{}", names.join(","))
    }
}
