use std::io::Cursor;

use indoc::indoc;

use super::*;
use crate::diagnostics::DiagnosticKind;
use crate::test_utils::{Fixture, shipped_content, shipped_root};
use crate::{Error, shot_bytes, shot_errors};

fn shipped() -> ByteLangCompiler {
    ByteLangCompiler::new(shipped_content())
}

#[test]
fn vart_esp32_end_to_end() {
    let mut out = Vec::new();
    let source = ".env vart_esp32\nset_speed 100\nquit\n";
    let result = shipped().compile(source, &mut out, LogFlags::NONE).unwrap();

    assert!(result.is_ok(), "{}", result.message());
    assert_eq!(out, [0x02, 0x00, 0x02, 0x64, 0x00]);
    assert_eq!(result.success().unwrap().size(), 5);
}

#[test]
fn unknown_instruction_is_the_only_error() {
    let mut out = Vec::new();
    let result = shipped()
        .compile(".env vart_esp32\nfoo 1\n", &mut out, LogFlags::ALL)
        .unwrap();

    assert!(!result.is_ok());
    assert!(out.is_empty());
    let diagnostics = result.diagnostics().unwrap();
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = diagnostics.iter().next().unwrap();
    assert_eq!(diagnostic.kind, DiagnosticKind::UnknownInstruction);
    assert_eq!(diagnostic.line(), Some(2));
    assert!(result.message().contains("unknown instruction"));
}

#[test]
fn duplicate_def_emits_nothing() {
    shot_errors!(
        "
        .env vart_esp32
        .def x 1
        .def x 1
        quit
    ",
        @"[CodeGenerator] `x` is already defined at 3 '.def x 1'"
    );
}

#[test]
fn forward_def_reference() {
    shot_errors!(
        "
        .env vart_esp32
        .def a b
    ",
        @"[CodeGenerator] `b` is not defined at 2 '.def a b'"
    );

    let fixture = Fixture::new();
    let bytes = fixture.bytecode(".env vart_esp32\n.def b 7\n.def a b\nset_speed a\n");
    assert_eq!(bytes, [0x02, 0x00, 0x02, 0x07]);
}

#[test]
fn pointer_size_guard_names_the_argument() {
    let errors = Fixture::new().errors(".env vart_mem\n.ptr u8 d 1\n.ptr u8 e 1\nmove_from d e\n");
    assert!(errors.contains("argument 1"), "{errors}");
    assert!(errors.contains("argument 2"), "{errors}");
}

#[test]
fn pointer_program_bytes() {
    shot_bytes!(
        "
        .env vart_mem
        .ptr i16 x 300
        .ptr i16 y -300
        move_from x y
        quit
    ",
        @"06 00 2C 01 D4 FE 0A 02 00 04 00 00"
    );
}

#[test]
fn parse_errors_stop_before_generation() {
    // `foo` would be an unknown instruction, but generation never runs
    shot_errors!(
        "
        .env vart_esp32
        set_speed 1x
        foo
    ",
        @"[StatementParser] invalid argument `1x` at 2 'set_speed 1x'"
    );
}

#[test]
fn size_limit_failure_leaves_destination_empty() {
    let (result, out) = Fixture::new().compile(".env vart_tiny\nset_position 1 2\nquit\n");
    assert!(!result.is_ok());
    assert!(out.is_empty());
    insta::assert_snapshot!(result.message(), @r"
    ---------------------------------------------------- <<< errors >>> ----------------------------------------------------
      0: [BytecodeWriter] program exceeds the profile size limit: 8 bytes, limit 8 (help: profile `tiny` accepts programs below 8 bytes)
    ");
}

#[test]
fn compilation_is_deterministic() {
    let source = indoc! {"
        .env vart_mem
        .ptr u16 wait 250
        .def FAST 200
        start:
        set_speed FAST
        delay_from wait
        set_position -10 10
        quit
    "};
    let fixture = Fixture::new();
    let first = fixture.bytecode(source);
    let second = fixture.bytecode(source);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn success_report_sections() {
    let fixture = Fixture::new();
    let flags = LogFlags::PROFILE | LogFlags::PROGRAM_VALUES | LogFlags::BYTECODE;
    let result = fixture
        .compiler()
        .compile(".env vart_esp32\n.ptr u8 s 9\nset_speed s\n", Vec::new(), flags)
        .unwrap();

    insta::assert_snapshot!(result.message(), @r"
    --------------------------------------------------- <<< profile >>> ----------------------------------------------------
    name                    esp32
    max_program_length      unlimited
    pointer_program         [unsigned 16-bit] std::u16
    pointer_heap            [unsigned 16-bit] std::u16
    instruction_index       [unsigned 8-bit] std::u8
    -------------------------------------------------- <<< constants >>> ---------------------------------------------------
    s       2
    -------------------------------------------------- <<< variables >>> ---------------------------------------------------
      0: std::u8 s@2 = 09
    --------------------------------------------------- <<< bytecode >>> ---------------------------------------------------
    # program start address define = 0003
    0000: 03
    0001: 00
    # std::u8 s@2 = 09
    0002: 09
    # [2B] vart::set_speed@2 { (std::u8)02 }
    0003: 02
    0004: 02
    ------------------------------------------------- <<< program size >>> -------------------------------------------------
    5 bytes
    ");
}

#[test]
fn report_lists_statements_and_instructions() {
    let fixture = Fixture::new();
    let result = fixture
        .compiler()
        .compile(".env vart_esp32\nquit\n", Vec::new(), LogFlags::PARSER_RESULTS)
        .unwrap();

    let message = result.message();
    assert!(message.contains("<<< statements >>>"));
    assert!(message.contains("INSTRUCTION_CALL@1"));
    assert!(message.contains("<<< code instructions >>>"));
    assert!(message.contains("0002 [1B] vart::quit@0 {}"));
    assert!(!message.contains("<<< bytecode >>>"));
}

#[test]
fn report_without_flags_is_empty() {
    let (result, _) = Fixture::new().compile(".env vart_esp32\nquit\n");
    assert!(result.is_ok());
    assert!(result.message().is_empty());
}

#[test]
fn compile_from_reader() {
    let mut out = Vec::new();
    let source = Cursor::new(".env vart_esp32\nquit\n");
    let result = shipped()
        .compile_reader(source, &mut out, LogFlags::NONE)
        .unwrap();
    assert!(result.is_ok());
    assert_eq!(out, [0x02, 0x00, 0x00]);
}

#[test]
fn broken_package_is_an_error() {
    let fixture = Fixture::new();
    fixture.write("packages/bad.blp", "oops f16\n");
    fixture.write(
        "env/broken.json",
        r#"{ "profile": "esp32", "packages": ["bad"] }"#,
    );
    let err = fixture
        .compiler()
        .compile(".env broken\n", Vec::new(), LogFlags::NONE)
        .unwrap_err();
    assert!(matches!(err, Error::Content(_)));
}

#[test]
fn open_shipped_root() {
    let compiler = ByteLangCompiler::open(shipped_root()).unwrap();
    assert!(compiler.content().environment("vart_esp32").unwrap().is_some());
}

#[test]
fn missing_content_root_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(ByteLangCompiler::open(&missing).is_err());
}
