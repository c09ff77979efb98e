//! Statement parser: source lines to classified statements.
//!
//! Works line by line. A line that fails to classify is reported and
//! skipped; every error on that line is recorded before moving on.

mod argument;
mod lexer;
mod statement;

#[cfg(test)]
mod lexer_tests;

pub use argument::{ArgumentMask, UniversalArgument};
pub use lexer::{ArgumentToken, HeadToken};
pub use statement::{Statement, StatementKind};

use crate::diagnostics::{DiagnosticKind, Location, StageDiagnostics};

pub const COMMENT_CHAR: char = '#';

pub struct StatementParser<'d> {
    diagnostics: StageDiagnostics<'d>,
}

impl<'d> StatementParser<'d> {
    pub const OWNER: &'static str = "StatementParser";

    pub fn new(diagnostics: StageDiagnostics<'d>) -> Self {
        Self { diagnostics }
    }

    pub fn run(mut self, source: &str) -> Vec<Statement> {
        let mut statements = Vec::new();
        let mut offset = 0;

        for (number, raw) in source.split_inclusive('\n').enumerate() {
            let line_start = offset;
            offset += raw.len();

            let code = match raw.find(COMMENT_CHAR) {
                Some(end) => &raw[..end],
                None => raw,
            };
            let text = code.trim();
            if text.is_empty() {
                continue;
            }

            let start = line_start + (code.len() - code.trim_start().len());
            let location = Location::new(number + 1, start..start + text.len(), text);
            if let Some(statement) = self.parse_line(location, statements.len()) {
                statements.push(statement);
            }
        }

        log::debug!("parsed {} statements", statements.len());
        statements
    }

    fn parse_line(&mut self, location: Location, index: usize) -> Option<Statement> {
        self.diagnostics.begin();

        let text = location.text.clone();
        let mut lexemes = text.split_whitespace();
        let head_lexeme = lexemes.next()?;

        let head = match HeadToken::classify(head_lexeme) {
            Some(HeadToken::Directive) => Some((StatementKind::DirectiveUse, &head_lexeme[1..])),
            Some(HeadToken::Mark) => Some((
                StatementKind::MarkDeclare,
                &head_lexeme[..head_lexeme.len() - 1],
            )),
            Some(HeadToken::Instruction) => Some((StatementKind::InstructionCall, head_lexeme)),
            None => {
                self.diagnostics
                    .report_at(DiagnosticKind::UnknownStatement, &location)
                    .message(head_lexeme)
                    .emit();
                None
            }
        };

        let mut arguments = Vec::new();
        for lexeme in lexemes {
            match UniversalArgument::parse(lexeme) {
                Some(argument) => arguments.push(argument),
                None => self
                    .diagnostics
                    .report_at(DiagnosticKind::InvalidArgument, &location)
                    .message(lexeme)
                    .emit(),
            }
        }

        if self.diagnostics.is_failed() {
            return None;
        }
        let (kind, head) = head?;
        Some(Statement {
            kind,
            head: head.to_string(),
            location,
            index,
            arguments,
        })
    }
}
