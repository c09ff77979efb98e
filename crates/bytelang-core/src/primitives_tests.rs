use super::*;

const STD: &str = r#"{
    "u8": { "size": 1, "type": "unsigned" },
    "u16": { "size": 2, "type": "unsigned" },
    "i16": { "size": 2, "type": "signed" },
    "i64": { "size": 8, "type": "signed" },
    "u64": { "size": 8, "type": "unsigned" },
    "f32": { "size": 4, "type": "exponent" },
    "f64": { "size": 8, "type": "exponent" }
}"#;

fn std_primitives() -> Primitives {
    Primitives::from_json("std", STD).unwrap()
}

#[test]
fn preserves_declaration_order() {
    let primitives = std_primitives();
    let names: Vec<&str> = primitives.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["u8", "u16", "i16", "i64", "u64", "f32", "f64"]);
}

#[test]
fn lookup_by_size_and_kind() {
    let primitives = std_primitives();
    assert_eq!(primitives.by_size(2, WriteKind::Unsigned).unwrap().name, "u16");
    assert_eq!(primitives.by_size(2, WriteKind::Signed).unwrap().name, "i16");
    assert!(primitives.by_size(4, WriteKind::Unsigned).is_none());
}

#[test]
fn display_and_describe() {
    let primitives = std_primitives();
    let i16 = primitives.get("i16").unwrap();
    assert_eq!(i16.to_string(), "std::i16");
    assert_eq!(i16.describe(), "[signed 16-bit] std::i16");
}

#[test]
fn pack_integers_little_endian() {
    let primitives = std_primitives();
    let u16 = primitives.get("u16").unwrap();
    let i16 = primitives.get("i16").unwrap();

    assert_eq!(u16.pack_integer(0x1234).unwrap(), [0x34, 0x12]);
    assert_eq!(i16.pack_integer(-2).unwrap(), [0xFE, 0xFF]);
    assert_eq!(
        primitives.get("u64").unwrap().pack_integer(u64::MAX as i128).unwrap(),
        [0xFF; 8]
    );
    assert_eq!(
        primitives.get("i64").unwrap().pack_integer(i64::MIN as i128).unwrap(),
        [0, 0, 0, 0, 0, 0, 0, 0x80]
    );
}

#[test]
fn pack_rejects_out_of_range() {
    let primitives = std_primitives();
    let u8 = primitives.get("u8").unwrap();
    let i16 = primitives.get("i16").unwrap();

    let err = u8.pack_integer(256).unwrap_err();
    assert_eq!(err.to_string(), "256 is out of range for std::u8");
    assert!(u8.pack_integer(-1).is_err());
    assert!(i16.pack_integer(32768).is_err());
    assert!(i16.pack_integer(-32768).is_ok());
}

#[test]
fn pack_exponents() {
    let primitives = std_primitives();
    let f32 = primitives.get("f32").unwrap();
    let f64 = primitives.get("f64").unwrap();

    assert_eq!(f32.pack_exponent(1.5).unwrap(), 1.5f32.to_le_bytes());
    assert_eq!(f64.pack_exponent(-0.25).unwrap(), (-0.25f64).to_le_bytes());
    assert!(f32.pack_exponent(1e40).is_err());
}

#[test]
fn scalar_conversion_follows_target_kind() {
    let primitives = std_primitives();
    let u8 = primitives.get("u8").unwrap();
    let f32 = primitives.get("f32").unwrap();

    // exponent values are floored for integer targets
    assert_eq!(u8.pack(Scalar::Exponent(3.7)).unwrap(), [3]);
    assert_eq!(f32.pack(Scalar::Integer(2)).unwrap(), 2.0f32.to_le_bytes());
}

#[test]
fn read_unsigned_is_little_endian() {
    let primitives = std_primitives();
    let u16 = primitives.get("u16").unwrap();
    assert_eq!(u16.read_unsigned(&[0x34, 0x12, 0xFF]), Some(0x1234));
    assert_eq!(u16.read_unsigned(&[0x34]), None);
}

#[test]
fn rejects_type_alias() {
    let json = r#"{
        "u8": { "size": 1, "type": "unsigned" },
        "byte": { "size": 1, "type": "unsigned" }
    }"#;
    let err = Primitives::from_json("std", json).unwrap_err();
    insta::assert_snapshot!(err, @"primitive `byte` aliases `u8` (unsigned 1B); type aliases are not supported");
}

#[test]
fn rejects_invalid_size() {
    let json = r#"{ "half": { "size": 2, "type": "exponent" } }"#;
    let err = Primitives::from_json("std", json).unwrap_err();
    assert!(matches!(
        err,
        ContentError::InvalidPrimitiveSize { size: 2, .. }
    ));

    let json = r#"{ "u24": { "size": 3, "type": "unsigned" } }"#;
    assert!(Primitives::from_json("std", json).is_err());
}

#[test]
fn rejects_unknown_kind() {
    let json = r#"{ "u8": { "size": 1, "type": "bcd" } }"#;
    let err = Primitives::from_json("std", json).unwrap_err();
    assert!(matches!(err, ContentError::Json { .. }));
}
