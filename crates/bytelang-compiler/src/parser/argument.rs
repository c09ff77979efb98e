//! Statement arguments and their type masks.

use std::fmt;
use std::ops::BitOr;

use bytelang_core::Scalar;

use super::lexer::ArgumentToken;

/// Set of argument kinds a directive parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArgumentMask(u8);

impl ArgumentMask {
    pub const INTEGER: Self = Self(1 << 0);
    pub const EXPONENT: Self = Self(1 << 1);
    pub const IDENTIFIER: Self = Self(1 << 2);
    pub const NUMBER: Self = Self(Self::INTEGER.0 | Self::EXPONENT.0);
    pub const ANY: Self = Self(Self::NUMBER.0 | Self::IDENTIFIER.0);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ArgumentMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for ArgumentMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::INTEGER, "integer"),
            (Self::EXPONENT, "exponent"),
            (Self::IDENTIFIER, "identifier"),
        ];
        let mut first = true;
        for (mask, name) in names {
            if self.contains(mask) {
                if !first {
                    write!(f, " | ")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// A parsed statement argument.
#[derive(Debug, Clone, PartialEq)]
pub enum UniversalArgument {
    Integer(i128),
    Exponent(f64),
    Identifier(String),
}

impl UniversalArgument {
    /// Parse a single lexeme. `None` when no literal form matches or the
    /// value does not fit the literal domain.
    pub fn parse(lexeme: &str) -> Option<Self> {
        let token = ArgumentToken::classify(lexeme)?;
        let argument = match token {
            ArgumentToken::Decimal => Self::Integer(parse_radix(lexeme, "", 10)?),
            ArgumentToken::Binary => Self::Integer(parse_radix(lexeme, "0b", 2)?),
            ArgumentToken::Octal => Self::Integer(parse_radix(lexeme, "0", 8)?),
            ArgumentToken::Hex => Self::Integer(parse_radix(lexeme, "0x", 16)?),
            ArgumentToken::Exponent => Self::Exponent(lexeme.parse().ok()?),
            ArgumentToken::Char => {
                let ch = lexeme.chars().nth(1)?;
                Self::Exponent(u32::from(ch) as f64)
            }
            ArgumentToken::Identifier => Self::Identifier(lexeme.to_string()),
        };
        Some(argument)
    }

    pub fn mask(&self) -> ArgumentMask {
        match self {
            Self::Integer(_) => ArgumentMask::INTEGER,
            Self::Exponent(_) => ArgumentMask::EXPONENT,
            Self::Identifier(_) => ArgumentMask::IDENTIFIER,
        }
    }

    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Numeric value, if this is not an identifier.
    pub fn scalar(&self) -> Option<Scalar> {
        match self {
            Self::Integer(v) => Some(Scalar::Integer(*v)),
            Self::Exponent(v) => Some(Scalar::Exponent(*v)),
            Self::Identifier(_) => None,
        }
    }
}

impl From<Scalar> for UniversalArgument {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Integer(v) => Self::Integer(v),
            Scalar::Exponent(v) => Self::Exponent(v),
        }
    }
}

impl fmt::Display for UniversalArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Exponent(v) => write!(f, "{v:?}"),
            Self::Identifier(name) => write!(f, "{name}"),
        }
    }
}

/// Parse a signed literal in `radix`, skipping `prefix` (case-insensitive)
/// and `_` separators.
fn parse_radix(lexeme: &str, prefix: &str, radix: u32) -> Option<i128> {
    let (negative, unsigned) = match lexeme.as_bytes().first()? {
        b'-' => (true, &lexeme[1..]),
        b'+' => (false, &lexeme[1..]),
        _ => (false, lexeme),
    };
    let digits = unsigned
        .get(..prefix.len())
        .filter(|p| p.eq_ignore_ascii_case(prefix))
        .map(|_| &unsigned[prefix.len()..])?;

    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() {
        // `00` and `0_0` leave only the octal prefix behind
        return (radix == 8).then_some(0);
    }

    let magnitude = i128::from_str_radix(&digits, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
