use indoc::indoc;

use super::*;
use crate::diagnostics::Diagnostics;
use crate::parser::{StatementParser, UniversalArgument};
use crate::test_utils::Fixture;

fn generate(source: &str) -> (Generated, Diagnostics) {
    let fixture = Fixture::new();
    let content = fixture.content();
    let mut diagnostics = Diagnostics::new();
    let statements = StatementParser::new(diagnostics.stage(StatementParser::OWNER)).run(source);
    assert!(diagnostics.is_success(), "{}", diagnostics.render());

    let generated = CodeGenerator::new(&content, diagnostics.stage(CodeGenerator::OWNER))
        .run(&statements)
        .unwrap();
    (generated, diagnostics)
}

fn errors(source: &str) -> String {
    let (_, diagnostics) = generate(source);
    diagnostics.render()
}

#[test]
fn assigns_addresses_in_one_pass() {
    let (generated, diagnostics) = generate(indoc! {"
        .env vart_mem
        .ptr u8 speed 100
        .ptr i16 x -5
        .def FAST 200
        start:
        set_speed FAST
        speed_from speed
        loop:
        quit
    "});
    assert!(diagnostics.is_success(), "{}", diagnostics.render());

    let program = generated.program.unwrap();
    assert_eq!(program.start_address, 5);
    assert_eq!(program.environment.name, "vart_mem");

    let variables: Vec<String> = program.variables.iter().map(|v| v.to_string()).collect();
    insta::assert_snapshot!(variables.join("\n"), @r"
    std::u8 speed@2 = 64
    std::i16 x@3 = FBFF
    ");

    let constants: Vec<String> = program
        .constants
        .iter()
        .map(|(name, value)| format!("{name} = {value}"))
        .collect();
    insta::assert_snapshot!(constants.join("\n"), @r"
    speed = 2
    x = 3
    FAST = 200
    start = 5
    loop = 10
    ");

    let marks: Vec<(usize, Vec<&str>)> = program
        .marks
        .iter()
        .map(|(a, names)| (*a, names.iter().map(String::as_str).collect()))
        .collect();
    assert_eq!(marks, [(5, vec!["start"]), (10, vec!["loop"])]);

    let instructions: Vec<String> = generated
        .instructions
        .iter()
        .map(|i| format!("{:04X} {i}", i.address))
        .collect();
    insta::assert_snapshot!(instructions.join("\n"), @r"
    0005 [2B] vart::set_speed@2 { (std::u8)C8 }
    0007 [3B] mem::speed_from@8 { (std::u16)0200 }
    000A [1B] vart::quit@0 {}
    ");
}

#[test]
fn numeric_conversions_follow_the_argument_type() {
    let (generated, diagnostics) = generate(indoc! {"
        .env vart_esp32
        set_speed 2.9
        set_speed 'A'
        set_position -1 0x7FFF
    "});
    assert!(diagnostics.is_success());

    let args: Vec<Vec<Vec<u8>>> = generated
        .instructions
        .into_iter()
        .map(|i| i.arguments)
        .collect();
    assert_eq!(args[0], [vec![2u8]]);
    assert_eq!(args[1], [vec![65u8]]);
    assert_eq!(args[2], [vec![0xFFu8, 0xFF], vec![0xFF, 0x7F]]);
}

#[test]
fn def_from_identifier_stores_resolved_value() {
    let (generated, _) = generate(".env vart_esp32\n.def A 5\n.def B A\n");
    let constants = generated.program.unwrap().constants;
    assert_eq!(constants["B"], UniversalArgument::Integer(5));
}

#[test]
fn forward_reference_is_undefined() {
    insta::assert_snapshot!(errors(indoc! {"
        .env vart_esp32
        set_speed LATER
        .def LATER 5
    "}), @"[CodeGenerator] `LATER` is not defined at 2 'set_speed LATER'");
}

#[test]
fn duplicate_def_keeps_first_value() {
    let (generated, diagnostics) = generate(".env vart_esp32\n.def A 1\n.def A 2\n");
    insta::assert_snapshot!(diagnostics.render(), @"[CodeGenerator] `A` is already defined at 3 '.def A 2'");
    assert_eq!(
        generated.program.unwrap().constants["A"],
        UniversalArgument::Integer(1)
    );
}

#[test]
fn constants_cannot_shadow_instructions() {
    insta::assert_snapshot!(errors(".env vart_esp32\n.def quit 1\n"), @"[CodeGenerator] `quit` is already defined at 2 '.def quit 1' (help: `quit` is an instruction of `vart_esp32`)");
    insta::assert_snapshot!(errors(".def delay_ms 1\n.env vart_esp32\n"), @"[CodeGenerator] `delay_ms` is already defined at 2 '.env vart_esp32' (help: `delay_ms` is an instruction of `vart_esp32`)");
}

#[test]
fn ptr_requires_environment() {
    insta::assert_snapshot!(errors(".ptr u8 x 1\n.env vart_esp32\n"), @"[CodeGenerator] environment not selected: `.ptr` needs the heap pointer size at 1 '.ptr u8 x 1'");
}

#[test]
fn ptr_after_code_is_rejected() {
    insta::assert_snapshot!(errors(".env vart_esp32\nquit\n.ptr u8 x 1\n"), @"[CodeGenerator] variables must be declared before any code: `x` comes after code at 3 '.ptr u8 x 1'");
    insta::assert_snapshot!(errors(".env vart_esp32\nstart:\n.ptr u8 x 1\n"), @"[CodeGenerator] variables must be declared before any code: `x` comes after code at 3 '.ptr u8 x 1'");
}

#[test]
fn ptr_unknown_primitive() {
    insta::assert_snapshot!(errors(".env vart_esp32\n.ptr u24 x 1\n"), @"[CodeGenerator] unknown primitive type `u24` at 2 '.ptr u24 x 1'");
}

#[test]
fn pointer_arguments_need_variables() {
    insta::assert_snapshot!(errors(indoc! {"
        .env vart_mem
        .def S 5
        speed_from 5
        speed_from S
    "}), @r"
    [CodeGenerator] pointer argument requires a variable: argument 1 got `5` at 3 'speed_from 5'
    [CodeGenerator] pointer argument requires a variable: argument 1 got `S` at 4 'speed_from S'
    ");
}

#[test]
fn pointer_to_smaller_variable_is_rejected() {
    let (generated, diagnostics) = generate(indoc! {"
        .env vart_mem
        .ptr u8 d 1
        delay_from d
        quit
    "});
    insta::assert_snapshot!(diagnostics.render(), @"[CodeGenerator] variable is smaller than the pointed type: argument 1: `d` is std::u8 (1B), `delay_from` reads std::u16 (2B) at 3 'delay_from d'");
    // the rejected call takes no space
    assert_eq!(generated.instructions.len(), 1);
    assert_eq!(generated.instructions[0].address, 3);
}

#[test]
fn pointer_to_wider_variable_is_accepted() {
    let (generated, diagnostics) = generate(".env vart_mem\n.ptr u32 d 1\n.ptr i16 y 2\nmove_from d y\n");
    assert!(diagnostics.is_success(), "{}", diagnostics.render());
    assert_eq!(
        generated.instructions[0].arguments,
        [vec![0x02u8, 0x00], vec![0x06, 0x00]]
    );
}

#[test]
fn marks_and_instructions_need_an_environment() {
    let (generated, diagnostics) = generate("loop:\nquit\n");
    assert!(generated.program.is_none());
    insta::assert_snapshot!(diagnostics.render(), @r"
    [CodeGenerator] environment not selected: mark `loop` has no address at 1 'loop:'
    [CodeGenerator] environment not selected: cannot call `quit` at 2 'quit'
    [CodeGenerator] program has no environment; use `.env <name>`
    ");
}

#[test]
fn environment_is_selected_once() {
    insta::assert_snapshot!(errors(".env vart_esp32\n.env vart_mem\n"), @"[CodeGenerator] environment already selected: `vart_esp32` at 2 '.env vart_mem'");
}

#[test]
fn unknown_environment() {
    insta::assert_snapshot!(errors(".env nowhere\n"), @r"
    [CodeGenerator] unknown environment `nowhere` at 1 '.env nowhere'
    [CodeGenerator] program has no environment; use `.env <name>`
    ");
}

#[test]
fn directive_shape_is_validated() {
    insta::assert_snapshot!(errors(indoc! {"
        .env vart_esp32
        .def 5 5
        .env
        .org 5
        .ptr u8 x
    "}), @r"
    [CodeGenerator] invalid argument type: argument 1 (`name`) of `.def` must be identifier, got `5` at 2 '.def 5 5'
    [CodeGenerator] invalid argument count: need 1 (got 0) at 3 '.env'
    [CodeGenerator] unknown directive `.org` at 4 '.org 5' (help: expected one of `.env`, `.def`, `.ptr`)
    [CodeGenerator] invalid argument count: need 3 (got 2) at 5 '.ptr u8 x'
    ");
}

#[test]
fn instruction_errors() {
    insta::assert_snapshot!(errors(indoc! {"
        .env vart_esp32
        foo 1
        set_position 1
        set_speed 256
        loop: 5
    "}), @r"
    [CodeGenerator] unknown instruction `foo` at 2 'foo 1'
    [CodeGenerator] invalid argument count: need 2 (got 1) at 3 'set_position 1'
    [CodeGenerator] value out of range: 256 is out of range for std::u8 at 4 'set_speed 256'
    [CodeGenerator] invalid argument count: need 0 (got 1) at 5 'loop: 5'
    ");
}

#[test]
fn directive_table() {
    assert_eq!(Directive::from_name("ptr"), Some(Directive::Ptr));
    assert_eq!(Directive::from_name("org"), None);
    let names: Vec<&str> = Directive::Ptr.parameters().iter().map(|p| p.name).collect();
    assert_eq!(names, ["type", "name", "value"]);
}

#[test]
fn pretty_bytes_groups_pairs_from_the_right() {
    assert_eq!(pretty_bytes(&[]), "");
    assert_eq!(pretty_bytes(&[0x0A]), "0A");
    assert_eq!(pretty_bytes(&[1, 2, 3]), "01_0203");
    assert_eq!(pretty_bytes(&[1, 2, 3, 4]), "0102_0304");
}
