use std::fmt;
use std::ops::Range;

/// Diagnostic kinds grouped by the stage that reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Statement parser
    UnknownStatement,
    InvalidArgument,

    // Code generator: directive shape
    UnknownDirective,
    ArgumentCount,
    ArgumentType,

    // Code generator: symbols
    Redefinition,
    UndefinedIdentifier,
    UnknownPrimitive,
    PointerRequiresVariable,
    PointerTruncation,
    VariableAfterCode,

    // Code generator: environment
    EnvironmentRequired,
    EnvironmentReselected,
    UnknownEnvironment,
    UnknownInstruction,
    MissingEnvironment,

    // Encoding
    ValueOutOfRange,
    ProgramTooLarge,
}

impl DiagnosticKind {
    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnknownStatement => "statement is not a directive, mark or instruction",
            Self::InvalidArgument => "invalid argument",

            Self::UnknownDirective => "unknown directive",
            Self::ArgumentCount => "invalid argument count",
            Self::ArgumentType => "invalid argument type",

            Self::Redefinition => "redefinition",
            Self::UndefinedIdentifier => "undefined identifier",
            Self::UnknownPrimitive => "unknown primitive type",
            Self::PointerRequiresVariable => "pointer argument requires a variable",
            Self::PointerTruncation => "variable is smaller than the pointed type",
            Self::VariableAfterCode => "variables must be declared before any code",

            Self::EnvironmentRequired => "environment not selected",
            Self::EnvironmentReselected => "environment already selected",
            Self::UnknownEnvironment => "unknown environment",
            Self::UnknownInstruction => "unknown instruction",
            Self::MissingEnvironment => "program has no environment; use `.env <name>`",

            Self::ValueOutOfRange => "value out of range",
            Self::ProgramTooLarge => "program exceeds the profile size limit",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnknownStatement => "`{}` is not a directive, mark or instruction".to_string(),
            Self::InvalidArgument => "invalid argument `{}`".to_string(),
            Self::UnknownDirective => "unknown directive `.{}`".to_string(),
            Self::Redefinition => "`{}` is already defined".to_string(),
            Self::UndefinedIdentifier => "`{}` is not defined".to_string(),
            Self::UnknownPrimitive => "unknown primitive type `{}`".to_string(),
            Self::UnknownEnvironment => "unknown environment `{}`".to_string(),
            Self::UnknownInstruction => "unknown instruction `{}`".to_string(),
            Self::EnvironmentReselected => "environment already selected: `{}`".to_string(),
            Self::MissingEnvironment => self.fallback_message().to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

/// Where in the source a diagnostic points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Physical line number, 1-based.
    pub line: usize,
    /// Byte range of the statement text within the whole source.
    pub range: Range<usize>,
    /// Statement text with the comment and surrounding whitespace removed.
    pub text: String,
}

impl Location {
    pub fn new(line: usize, range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            line,
            range,
            text: text.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {} '{}'", self.line, self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub kind: DiagnosticKind,
    /// Name of the stage that reported this diagnostic.
    pub owner: &'static str,
    pub location: Option<Location>,
    pub message: String,
    pub hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(
        kind: DiagnosticKind,
        owner: &'static str,
        location: Option<Location>,
    ) -> Self {
        Self {
            kind,
            owner,
            location,
            message: kind.fallback_message().to_string(),
            hints: Vec::new(),
        }
    }

    pub fn line(&self) -> Option<usize> {
        self.location.as_ref().map(|l| l.line)
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.owner, self.message)?;
        if let Some(location) = &self.location {
            write!(f, " {location}")?;
        }
        for hint in &self.hints {
            write!(f, " (help: {hint})")?;
        }
        Ok(())
    }
}
