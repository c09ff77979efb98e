use crate::parser::ArgumentMask;

/// Directives recognized after a `.` head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `.env <environment>`
    Env,
    /// `.def <name> <value>`
    Def,
    /// `.ptr <type> <name> <value>`
    Ptr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    pub name: &'static str,
    pub accepts: ArgumentMask,
}

const fn param(name: &'static str, accepts: ArgumentMask) -> Parameter {
    Parameter { name, accepts }
}

const ENV: &[Parameter] = &[param("environment", ArgumentMask::IDENTIFIER)];
const DEF: &[Parameter] = &[
    param("name", ArgumentMask::IDENTIFIER),
    param("value", ArgumentMask::ANY),
];
const PTR: &[Parameter] = &[
    param("type", ArgumentMask::IDENTIFIER),
    param("name", ArgumentMask::IDENTIFIER),
    param("value", ArgumentMask::ANY),
];

impl Directive {
    pub const ALL: [Directive; 3] = [Directive::Env, Directive::Def, Directive::Ptr];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Directive::Env => "env",
            Directive::Def => "def",
            Directive::Ptr => "ptr",
        }
    }

    pub fn parameters(self) -> &'static [Parameter] {
        match self {
            Directive::Env => ENV,
            Directive::Def => DEF,
            Directive::Ptr => PTR,
        }
    }
}
