use std::path::PathBuf;

use bytelang_compiler::compiler::{column, section, table};
use bytelang_core::{Content, Environment, EnvironmentInstruction};
use serde::Serialize;

pub struct EnvArgs {
    pub name: String,
    pub json: bool,
    pub content: PathBuf,
}

pub fn run(args: EnvArgs) {
    let environment = Content::open(&args.content)
        .and_then(|content| content.environment(&args.name));
    let environment = match environment {
        Ok(Some(environment)) => environment,
        Ok(None) => {
            eprintln!(
                "error: unknown environment '{}' in '{}'",
                args.name,
                args.content.display()
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&EnvironmentView::new(&environment)) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("{}", render_text(&environment));
}

pub fn render_text(environment: &Environment) -> String {
    let profile = section(
        &format!("{} profile", environment.name),
        &table(&environment.profile.fields()),
    );
    let instructions = section(
        &format!("{} instructions", environment.name),
        &column(environment.instructions.values()),
    );
    format!("{profile}\n{instructions}")
}

/// JSON shape of `bytelang env --json`, for host-side binding generators.
#[derive(Debug, Serialize)]
pub struct EnvironmentView {
    pub name: String,
    pub profile: ProfileView,
    pub instructions: Vec<InstructionView>,
}

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub name: String,
    pub max_program_length: Option<usize>,
    pub pointer_program: String,
    pub pointer_heap: String,
    pub instruction_index: String,
}

#[derive(Debug, Serialize)]
pub struct InstructionView {
    pub index: usize,
    pub package: String,
    pub name: String,
    pub size: usize,
    pub signature: String,
    pub snake_case: String,
    pub arguments: Vec<ArgumentView>,
}

#[derive(Debug, Serialize)]
pub struct ArgumentView {
    pub primitive: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointing: Option<String>,
}

impl EnvironmentView {
    pub fn new(environment: &Environment) -> Self {
        let profile = &environment.profile;
        Self {
            name: environment.name.clone(),
            profile: ProfileView {
                name: profile.name.clone(),
                max_program_length: profile.max_program_length,
                pointer_program: profile.pointer_program.to_string(),
                pointer_heap: profile.pointer_heap.to_string(),
                instruction_index: profile.instruction_index.to_string(),
            },
            instructions: environment
                .instructions
                .values()
                .map(|i| InstructionView::new(i))
                .collect(),
        }
    }
}

impl InstructionView {
    fn new(instruction: &EnvironmentInstruction) -> Self {
        Self {
            index: instruction.index,
            package: instruction.package.clone(),
            name: instruction.name.clone(),
            size: instruction.size,
            signature: instruction.signature(),
            snake_case: instruction.snake_case(),
            arguments: instruction
                .arguments
                .iter()
                .map(|a| ArgumentView {
                    primitive: a.primitive.to_string(),
                    pointing: a.pointing.as_ref().map(|p| p.to_string()),
                })
                .collect(),
        }
    }
}
