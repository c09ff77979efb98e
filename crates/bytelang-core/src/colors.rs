//! ANSI color codes for bytecode listings.
//!
//! - Blue: addresses
//! - Green: byte values
//! - Dim: annotations (variables, marks, instructions)
//! - Reset: return to default

/// ANSI color palette for CLI output. Standard 16-color codes only.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub address: &'static str,
    pub value: &'static str,
    pub comment: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        address: "\x1b[34m",
        value: "\x1b[32m",
        comment: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        address: "",
        value: "",
        comment: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }
}
