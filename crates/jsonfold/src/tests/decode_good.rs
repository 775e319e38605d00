use rstest::rstest;

use super::{DEEP, nesting_depth, object};
use crate::{Decoder, NumberMode, ParserOptions, Value, decode};

#[rstest]
#[case("null", Value::Null)]
#[case("true", Value::Bool(true))]
#[case("  false  ", Value::Bool(false))]
#[case("42", Value::Int(42))]
#[case("-1", Value::Int(-1))]
#[case("2.5", Value::Float(2.5))]
#[case("1e3", Value::Float(1000.0))]
#[case(r#""hi""#, Value::from("hi"))]
#[case("[]", Value::Array(vec![]))]
#[case("{}", object([]))]
fn top_level_values(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(decode(input.as_bytes()).unwrap(), expected);
}

#[test]
fn nested_document() {
    let input = br#"
    {
        "name": "jsonfold",
        "tags": ["fast", "small"],
        "meta": {"stars": 3, "ratio": 0.75, "archived": false, "parent": null},
        "matrix": [[1, 2], [], [{}]]
    }"#;
    let expected = object([
        ("name", Value::from("jsonfold")),
        (
            "tags",
            Value::Array(vec![Value::from("fast"), Value::from("small")]),
        ),
        (
            "meta",
            object([
                ("stars", Value::Int(3)),
                ("ratio", Value::Float(0.75)),
                ("archived", Value::Bool(false)),
                ("parent", Value::Null),
            ]),
        ),
        (
            "matrix",
            Value::Array(vec![
                Value::Array(vec![Value::Int(1), Value::Int(2)]),
                Value::Array(vec![]),
                Value::Array(vec![object([])]),
            ]),
        ),
    ]);
    assert_eq!(decode(input).unwrap(), expected);
}

#[test]
fn duplicate_keys_in_text() {
    let value = decode(br#"{"a": 1, "a": [true]}"#).unwrap();
    assert_eq!(value, object([("a", Value::Array(vec![Value::Bool(true)]))]));
}

#[test]
fn deep_arrays_decode_and_drop() {
    let mut input = vec![b'['; DEEP];
    input.extend(std::iter::repeat_n(b']', DEEP));
    let value = decode(&input).unwrap();
    assert_eq!(nesting_depth(&value), DEEP);
    drop(value);
}

#[test]
fn deep_objects_decode_and_drop() {
    let mut input = br#"{"k":"#.repeat(DEEP);
    input.extend_from_slice(b"null");
    input.extend(std::iter::repeat_n(b'}', DEEP));
    let value = decode(&input).unwrap();
    assert_eq!(nesting_depth(&value), DEEP);
    drop(value);
}

#[test]
fn embedded_nul_survives() {
    let value = decode(br#"["a\u0000b"]"#).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items[0].as_bytes().unwrap(), &b"a\0b"[..]);
}

#[test]
fn comments_are_skipped() {
    let value = decode(b"// header\n{\"a\": /* inline */ 1}").unwrap();
    assert_eq!(value, object([("a", Value::Int(1))]));
}

#[test]
fn raw_number_mode_yields_floats() {
    let mut decoder = Decoder::new(ParserOptions {
        number_mode: NumberMode::RawText,
        ..Default::default()
    });
    let value = decoder.decode(b"[1, 12345678901234567890, -0.5]").unwrap();
    assert_eq!(
        value,
        Value::Array(vec![
            Value::Float(1.0),
            Value::Float(12_345_678_901_234_567_890.0),
            Value::Float(-0.5),
        ])
    );
}

#[test]
fn unchecked_utf8_keeps_raw_bytes() {
    let mut decoder = Decoder::new(ParserOptions {
        check_utf8: false,
        ..Default::default()
    });
    let value = decoder.decode(b"{\"\xff\": \"\xfe\"}").unwrap();
    assert_eq!(
        value.get(b"\xff").and_then(Value::as_bytes).map(|s| s.to_vec()),
        Some(vec![0xfe])
    );
}

#[test]
fn decoder_is_reusable() {
    let mut decoder = Decoder::default();
    assert_eq!(
        decoder.decode(br#"{"a": [1, 2]}"#).unwrap(),
        object([("a", Value::Array(vec![Value::Int(1), Value::Int(2)]))])
    );
    assert_eq!(decoder.decode(b"[3]").unwrap(), Value::Array(vec![Value::Int(3)]));
}

#[test]
fn decoder_recovers_after_error() {
    let mut decoder = Decoder::default();
    assert!(decoder.decode(br#"{"a": [1, "#).is_err());
    assert_eq!(decoder.decode(b"{}").unwrap(), object([]));
}
