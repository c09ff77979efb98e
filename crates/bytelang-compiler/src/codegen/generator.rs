//! Single forward pass over statements.
//!
//! Addresses are assigned as statements are seen: variables from the end
//! of the start-address field, instructions after the last variable. A
//! name is visible only from the line that defines it.

use std::collections::BTreeMap;
use std::rc::Rc;

use bytelang_core::{Content, ContentError, Environment, PrimitiveType, Scalar};
use indexmap::IndexMap;

use super::directives::Directive;
use super::program::{CodeInstruction, ProgramData, Variable};
use crate::diagnostics::{DiagnosticKind, StageDiagnostics};
use crate::parser::{Statement, StatementKind, UniversalArgument};

/// Symbols and cursors mutated by the statement handlers.
#[derive(Debug, Default)]
struct SymbolTable {
    environment: Option<Rc<Environment>>,
    constants: IndexMap<String, UniversalArgument>,
    marks: BTreeMap<usize, Vec<String>>,
    variables: IndexMap<String, Variable>,
    /// Heap cursor; seeded with the heap pointer size on `.env`.
    variable_offset: usize,
    /// Instruction bytes emitted so far.
    mark_offset: usize,
}

impl SymbolTable {
    fn code_address(&self) -> usize {
        self.variable_offset + self.mark_offset
    }

    fn has_code(&self) -> bool {
        self.mark_offset > 0 || !self.marks.is_empty()
    }
}

/// Instructions and program data produced by one run.
#[derive(Debug, Clone)]
pub struct Generated {
    pub instructions: Vec<CodeInstruction>,
    /// `None` when no environment was selected.
    pub program: Option<ProgramData>,
}

pub struct CodeGenerator<'c, 'd> {
    content: &'c Content,
    diagnostics: StageDiagnostics<'d>,
    symbols: SymbolTable,
}

impl<'c, 'd> CodeGenerator<'c, 'd> {
    pub const OWNER: &'static str = "CodeGenerator";

    pub fn new(content: &'c Content, diagnostics: StageDiagnostics<'d>) -> Self {
        Self {
            content,
            diagnostics,
            symbols: SymbolTable::default(),
        }
    }

    /// Process `statements` in order.
    ///
    /// Source errors are reported and the offending statement skipped;
    /// only configuration faults while loading an environment are `Err`.
    pub fn run(mut self, statements: &[Statement]) -> Result<Generated, ContentError> {
        let mut instructions = Vec::new();

        for statement in statements {
            match statement.kind {
                StatementKind::DirectiveUse => self.process_directive(statement)?,
                StatementKind::MarkDeclare => self.process_mark(statement),
                StatementKind::InstructionCall => {
                    if let Some(instruction) = self.process_instruction(statement) {
                        log::trace!("{:04X}: {instruction}", instruction.address);
                        instructions.push(instruction);
                    }
                }
            }
        }

        let program = self.program_data();
        log::debug!(
            "generated {} instructions, {} variables",
            instructions.len(),
            self.symbols.variables.len()
        );
        Ok(Generated {
            instructions,
            program,
        })
    }

    fn program_data(&mut self) -> Option<ProgramData> {
        let Some(environment) = self.symbols.environment.clone() else {
            self.diagnostics
                .report(DiagnosticKind::MissingEnvironment)
                .emit();
            return None;
        };

        Some(ProgramData {
            environment,
            start_address: self.symbols.variable_offset,
            variables: self.symbols.variables.values().cloned().collect(),
            constants: self.symbols.constants.clone(),
            marks: self.symbols.marks.clone(),
        })
    }

    fn process_directive(&mut self, statement: &Statement) -> Result<(), ContentError> {
        self.diagnostics.begin();

        let Some(directive) = Directive::from_name(&statement.head) else {
            self.diagnostics
                .report_at(DiagnosticKind::UnknownDirective, &statement.location)
                .message(&statement.head)
                .hint("expected one of `.env`, `.def`, `.ptr`")
                .emit();
            return Ok(());
        };

        if !self.check_directive_arguments(directive, statement) {
            return Ok(());
        }

        match directive {
            Directive::Env => self.directive_env(statement)?,
            Directive::Def => self.directive_def(statement),
            Directive::Ptr => self.directive_ptr(statement),
        }
        Ok(())
    }

    fn check_directive_arguments(&mut self, directive: Directive, statement: &Statement) -> bool {
        let parameters = directive.parameters();
        if !self.check_argument_count(statement, parameters.len()) {
            return false;
        }

        for (i, (parameter, argument)) in parameters.iter().zip(&statement.arguments).enumerate() {
            if !parameter.accepts.contains(argument.mask()) {
                self.diagnostics
                    .report_at(DiagnosticKind::ArgumentType, &statement.location)
                    .message(format!(
                        "argument {} (`{}`) of `.{}` must be {}, got `{argument}`",
                        i + 1,
                        parameter.name,
                        directive.name(),
                        parameter.accepts,
                    ))
                    .emit();
            }
        }
        !self.diagnostics.is_failed()
    }

    fn check_argument_count(&mut self, statement: &Statement, need: usize) -> bool {
        let got = statement.arguments.len();
        if got != need {
            self.diagnostics
                .report_at(DiagnosticKind::ArgumentCount, &statement.location)
                .message(format!("need {need} (got {got})"))
                .emit();
            return false;
        }
        true
    }

    fn directive_env(&mut self, statement: &Statement) -> Result<(), ContentError> {
        let Some(name) = statement.arguments[0].identifier() else {
            return Ok(());
        };

        if let Some(current) = &self.symbols.environment {
            let current = current.name.clone();
            self.diagnostics
                .report_at(DiagnosticKind::EnvironmentReselected, &statement.location)
                .message(current)
                .emit();
            return Ok(());
        }

        let Some(environment) = self.content.environment(name)? else {
            self.diagnostics
                .report_at(DiagnosticKind::UnknownEnvironment, &statement.location)
                .message(name)
                .emit();
            return Ok(());
        };

        // Constants declared before `.env` could not be checked against instruction names.
        let shadowing: Vec<String> = self
            .symbols
            .constants
            .keys()
            .filter(|name| environment.instruction(name).is_some())
            .cloned()
            .collect();
        for constant in shadowing {
            self.diagnostics
                .report_at(DiagnosticKind::Redefinition, &statement.location)
                .message(&constant)
                .hint(format!("`{constant}` is an instruction of `{}`", environment.name))
                .emit();
        }

        log::debug!("selected environment `{}`", environment.name);
        self.symbols.variable_offset = environment.profile.pointer_heap.size;
        self.symbols.environment = Some(environment);
        Ok(())
    }

    fn directive_def(&mut self, statement: &Statement) {
        let [name, value] = statement.arguments.as_slice() else {
            return;
        };
        let Some(name) = name.identifier() else {
            return;
        };

        self.check_name_available(statement, name);
        let value = self.resolve(statement, value);
        if self.diagnostics.is_failed() {
            return;
        }
        if let Some(value) = value {
            self.symbols.constants.insert(name.to_string(), value.into());
        }
    }

    fn directive_ptr(&mut self, statement: &Statement) {
        let [type_name, name, value] = statement.arguments.as_slice() else {
            return;
        };
        let (Some(type_name), Some(name)) = (type_name.identifier(), name.identifier()) else {
            return;
        };

        if self.symbols.environment.is_none() {
            self.diagnostics
                .report_at(DiagnosticKind::EnvironmentRequired, &statement.location)
                .message("`.ptr` needs the heap pointer size")
                .emit();
            return;
        }
        if self.symbols.has_code() {
            self.diagnostics
                .report_at(DiagnosticKind::VariableAfterCode, &statement.location)
                .message(format!("`{name}` comes after code"))
                .emit();
            return;
        }

        let Some(primitive) = self.content.primitives().get(type_name).cloned() else {
            self.diagnostics
                .report_at(DiagnosticKind::UnknownPrimitive, &statement.location)
                .message(type_name)
                .emit();
            return;
        };

        self.check_name_available(statement, name);
        let value = self
            .resolve(statement, value)
            .and_then(|value| self.pack(statement, &primitive, value));
        if self.diagnostics.is_failed() {
            return;
        }
        let Some(value) = value else {
            return;
        };

        let address = self.symbols.variable_offset;
        self.symbols.variable_offset += primitive.size;
        self.symbols
            .constants
            .insert(name.to_string(), UniversalArgument::Integer(address as i128));
        self.symbols.variables.insert(
            name.to_string(),
            Variable {
                address,
                identifier: name.to_string(),
                primitive,
                value,
            },
        );
    }

    fn process_mark(&mut self, statement: &Statement) {
        self.diagnostics.begin();

        if self.symbols.environment.is_none() {
            self.diagnostics
                .report_at(DiagnosticKind::EnvironmentRequired, &statement.location)
                .message(format!("mark `{}` has no address", statement.head))
                .emit();
            return;
        }
        if !self.check_argument_count(statement, 0) {
            return;
        }

        self.check_name_available(statement, &statement.head);
        if self.diagnostics.is_failed() {
            return;
        }

        let address = self.symbols.code_address();
        self.symbols
            .constants
            .insert(statement.head.clone(), UniversalArgument::Integer(address as i128));
        self.symbols
            .marks
            .entry(address)
            .or_default()
            .push(statement.head.clone());
    }

    fn process_instruction(&mut self, statement: &Statement) -> Option<CodeInstruction> {
        self.diagnostics.begin();

        let Some(environment) = self.symbols.environment.clone() else {
            self.diagnostics
                .report_at(DiagnosticKind::EnvironmentRequired, &statement.location)
                .message(format!("cannot call `{}`", statement.head))
                .emit();
            return None;
        };

        let Some(instruction) = environment.instruction(&statement.head).cloned() else {
            self.diagnostics
                .report_at(DiagnosticKind::UnknownInstruction, &statement.location)
                .message(&statement.head)
                .emit();
            return None;
        };

        if !self.check_argument_count(statement, instruction.arguments.len()) {
            return None;
        }

        let mut arguments = Vec::with_capacity(instruction.arguments.len());
        let pairs = instruction.arguments.iter().zip(&statement.arguments);
        for (i, (declared, argument)) in pairs.enumerate() {
            let packed = match &declared.pointing {
                Some(pointing) => {
                    self.pointer_argument(statement, i, argument, &declared.primitive, pointing)
                }
                None => self
                    .resolve(statement, argument)
                    .and_then(|value| self.pack(statement, &declared.primitive, value)),
            };
            arguments.extend(packed);
        }
        if self.diagnostics.is_failed() {
            return None;
        }

        let address = self.symbols.code_address();
        self.symbols.mark_offset += instruction.size;
        Some(CodeInstruction {
            instruction,
            arguments,
            address,
        })
    }

    /// Pack the address of a variable for a pointer argument.
    fn pointer_argument(
        &mut self,
        statement: &Statement,
        position: usize,
        argument: &UniversalArgument,
        storage: &PrimitiveType,
        pointing: &PrimitiveType,
    ) -> Option<Vec<u8>> {
        let variable = argument
            .identifier()
            .and_then(|name| self.symbols.variables.get(name));
        let Some(variable) = variable else {
            self.diagnostics
                .report_at(DiagnosticKind::PointerRequiresVariable, &statement.location)
                .message(format!("argument {} got `{argument}`", position + 1))
                .emit();
            return None;
        };

        if variable.primitive.size < pointing.size {
            let message = format!(
                "argument {}: `{}` is {} ({}B), `{}` reads {} ({}B)",
                position + 1,
                variable.identifier,
                variable.primitive,
                variable.primitive.size,
                statement.head,
                pointing,
                pointing.size,
            );
            self.diagnostics
                .report_at(DiagnosticKind::PointerTruncation, &statement.location)
                .message(message)
                .emit();
            return None;
        }

        let address = variable.address as i128;
        self.pack(statement, storage, Scalar::Integer(address))
    }

    /// Numeric value of a literal or a known constant.
    fn resolve(&mut self, statement: &Statement, argument: &UniversalArgument) -> Option<Scalar> {
        if let Some(value) = argument.scalar() {
            return Some(value);
        }
        let name = argument.identifier()?;
        match self.symbols.constants.get(name).and_then(|c| c.scalar()) {
            Some(value) => Some(value),
            None => {
                self.diagnostics
                    .report_at(DiagnosticKind::UndefinedIdentifier, &statement.location)
                    .message(name)
                    .emit();
                None
            }
        }
    }

    fn pack(
        &mut self,
        statement: &Statement,
        primitive: &PrimitiveType,
        value: Scalar,
    ) -> Option<Vec<u8>> {
        match primitive.pack(value) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                self.diagnostics
                    .report_at(DiagnosticKind::ValueOutOfRange, &statement.location)
                    .message(err.to_string())
                    .emit();
                None
            }
        }
    }

    /// Reports a redefinition if `name` is taken by a constant or an instruction.
    fn check_name_available(&mut self, statement: &Statement, name: &str) {
        if self.symbols.constants.contains_key(name) {
            self.diagnostics
                .report_at(DiagnosticKind::Redefinition, &statement.location)
                .message(name)
                .emit();
            return;
        }

        let Some(environment) = &self.symbols.environment else {
            return;
        };
        if environment.instruction(name).is_some() {
            let environment = environment.name.clone();
            self.diagnostics
                .report_at(DiagnosticKind::Redefinition, &statement.location)
                .message(name)
                .hint(format!("`{name}` is an instruction of `{environment}`"))
                .emit();
        }
    }
}
