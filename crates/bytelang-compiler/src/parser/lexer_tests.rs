use super::*;

fn arg(lexeme: &str) -> Option<UniversalArgument> {
    UniversalArgument::parse(lexeme)
}

#[test]
fn head_precedence() {
    assert_eq!(HeadToken::classify(".env"), Some(HeadToken::Directive));
    assert_eq!(HeadToken::classify("loop:"), Some(HeadToken::Mark));
    assert_eq!(HeadToken::classify("set_speed"), Some(HeadToken::Instruction));
    assert_eq!(HeadToken::classify("42"), Some(HeadToken::Instruction));
    assert_eq!(HeadToken::classify("."), None);
    assert_eq!(HeadToken::classify("a:b"), None);
    assert_eq!(HeadToken::classify("set-speed"), None);
}

#[test]
fn integer_literals() {
    assert_eq!(arg("0"), Some(UniversalArgument::Integer(0)));
    assert_eq!(arg("42"), Some(UniversalArgument::Integer(42)));
    assert_eq!(arg("-1_000"), Some(UniversalArgument::Integer(-1000)));
    assert_eq!(arg("+7"), Some(UniversalArgument::Integer(7)));
    assert_eq!(arg("0b1010_0101"), Some(UniversalArgument::Integer(0xA5)));
    assert_eq!(arg("0B11"), Some(UniversalArgument::Integer(3)));
    assert_eq!(arg("017"), Some(UniversalArgument::Integer(15)));
    assert_eq!(arg("-0_17"), Some(UniversalArgument::Integer(-15)));
    assert_eq!(arg("0xFF_FF"), Some(UniversalArgument::Integer(0xFFFF)));
    assert_eq!(arg("0Xab"), Some(UniversalArgument::Integer(0xAB)));
}

#[test]
fn exponent_and_char_literals() {
    assert_eq!(arg("2.75"), Some(UniversalArgument::Exponent(2.75)));
    assert_eq!(arg("-1.5e-3"), Some(UniversalArgument::Exponent(-1.5e-3)));
    assert_eq!(arg("'A'"), Some(UniversalArgument::Exponent(65.0)));
    assert_eq!(arg("'0'"), Some(UniversalArgument::Exponent(48.0)));
}

#[test]
fn documented_literal_forms() {
    let parsed: Vec<String> = ["0x1_F", "0b1010", "017", "-12", "3.14", "'A'"]
        .iter()
        .map(|lexeme| format!("{:?}", arg(lexeme).unwrap()))
        .collect();
    insta::assert_snapshot!(parsed.join("\n"), @r"
    Integer(31)
    Integer(10)
    Integer(15)
    Integer(-12)
    Exponent(3.14)
    Exponent(65.0)
    ");
}

#[test]
fn identifiers() {
    assert_eq!(
        arg("_speed2"),
        Some(UniversalArgument::Identifier("_speed2".to_string()))
    );
    assert_eq!(arg("speed").unwrap().mask(), ArgumentMask::IDENTIFIER);
}

#[test]
fn rejected_lexemes() {
    for lexeme in ["08", "0b2", "0x", "1.", ".5", "'ab'", "''", "1e5", "01.5x", "12ab", "-x"] {
        assert_eq!(arg(lexeme), None, "{lexeme} should not parse");
    }
}

#[test]
fn literal_overflow_is_rejected() {
    assert_eq!(arg("0x1_0000_0000_0000_0000_0000_0000_0000_0000"), None);
}

#[test]
fn masks() {
    assert!(ArgumentMask::ANY.contains(ArgumentMask::IDENTIFIER));
    assert!(ArgumentMask::NUMBER.contains(ArgumentMask::EXPONENT));
    assert!(!ArgumentMask::NUMBER.contains(ArgumentMask::IDENTIFIER));
    assert_eq!(ArgumentMask::ANY.to_string(), "integer | exponent | identifier");
    assert_eq!(
        (ArgumentMask::INTEGER | ArgumentMask::IDENTIFIER).to_string(),
        "integer | identifier"
    );
}

#[test]
fn scalar_view() {
    assert_eq!(arg("5").unwrap().scalar(), Some(bytelang_core::Scalar::Integer(5)));
    assert_eq!(arg("x").unwrap().scalar(), None);
}
