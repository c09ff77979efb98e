//! Source diagnostics.
//!
//! Every compile shares one root [`Diagnostics`] accumulator. Each stage
//! borrows a [`StageDiagnostics`] child that tags messages with the stage
//! name and tracks a local failure flag, so a stage can abandon the current
//! statement without stopping the whole compile.

mod message;
mod printer;


pub use message::{DiagnosticKind, DiagnosticMessage, Location};
pub use printer::DiagnosticsPrinter;

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    messages: &'a mut Vec<DiagnosticMessage>,
    failed: &'a mut bool,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Child handler for one stage, prefixing messages with `owner`.
    pub fn stage(&mut self, owner: &'static str) -> StageDiagnostics<'_> {
        StageDiagnostics {
            root: self,
            owner,
            failed: false,
        }
    }

    /// True while nothing has been recorded.
    pub fn is_success(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    /// One line per diagnostic, without source snippets.
    pub fn render(&self) -> String {
        self.printer().render()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DiagnosticMessage;
    type IntoIter = std::slice::Iter<'a, DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// Per-stage view of the root accumulator.
pub struct StageDiagnostics<'d> {
    root: &'d mut Diagnostics,
    owner: &'static str,
    failed: bool,
}

impl<'d> StageDiagnostics<'d> {
    /// Start a new validation block: clears the local failure flag.
    pub fn begin(&mut self) {
        self.failed = false;
    }

    /// Whether anything was reported since the last [`begin`](Self::begin).
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Whether the whole compile is still clean, across all stages.
    pub fn is_success(&self) -> bool {
        self.root.is_success()
    }

    pub fn report(&mut self, kind: DiagnosticKind) -> DiagnosticBuilder<'_> {
        self.build(kind, None)
    }

    pub fn report_at(&mut self, kind: DiagnosticKind, location: &Location) -> DiagnosticBuilder<'_> {
        self.build(kind, Some(location.clone()))
    }

    fn build(&mut self, kind: DiagnosticKind, location: Option<Location>) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            messages: &mut self.root.messages,
            failed: &mut self.failed,
            message: DiagnosticMessage::with_default_message(kind, self.owner, location),
        }
    }
}

impl<'a> DiagnosticBuilder<'a> {
    /// Provide custom detail for this diagnostic, rendered using the kind's template.
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        let detail = msg.into();
        self.message.message = self.message.kind.message(Some(&detail));
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.message.hints.push(hint.into());
        self
    }

    pub fn emit(self) {
        *self.failed = true;
        self.messages.push(self.message);
    }
}
