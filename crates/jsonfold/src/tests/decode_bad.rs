use rstest::rstest;

use crate::{DecodeError, Decoder, EventRecorder, ParseFailure, ParserOptions, decode};

fn parse_error(input: &[u8]) -> (ParseFailure, String) {
    match decode(input) {
        Err(DecodeError::Parse { kind, message }) => (kind, message),
        other => panic!("expected a parse error for {input:?}, got {other:?}"),
    }
}

#[test]
fn empty_input() {
    assert_eq!(decode(b""), Err(DecodeError::EmptyInput));
}

#[test]
fn empty_input_never_reaches_the_source() {
    struct Counting(usize);
    impl crate::EventSource for Counting {
        fn drive<H: crate::EventHandler + ?Sized>(
            &mut self,
            _input: &[u8],
            _handler: &mut H,
        ) -> Result<crate::Status, H::Error> {
            self.0 += 1;
            Ok(crate::Status::Ok)
        }
    }

    let mut source = Counting(0);
    let mut decoder = Decoder::default();
    assert_eq!(decoder.decode_with(&mut source, b""), Err(DecodeError::EmptyInput));
    assert_eq!(source.0, 0);
    assert_eq!(decoder.decode_with(&mut source, b" "), Err(DecodeError::EmptyDocument));
    assert_eq!(source.0, 1);
}

#[rstest]
#[case(" ")]
#[case("\n\t\r ")]
#[case("/* only a comment */")]
#[case("// line comment")]
fn no_value(#[case] input: &str) {
    assert_eq!(decode(input.as_bytes()), Err(DecodeError::EmptyDocument));
}

#[rstest]
#[case("[1, 2", "unexpected end of input at 1:6")]
#[case("{\"a\": ", "unexpected end of input at 1:7")]
#[case("{\"a\"", "unexpected end of input at 1:5")]
#[case("\"unterminated", "unexpected end of input at 1:14")]
#[case("[/* open comment", "unexpected end of input at 1:17")]
fn truncated(#[case] input: &str, #[case] message: &str) {
    assert_eq!(
        parse_error(input.as_bytes()),
        (ParseFailure::Incomplete, message.to_owned())
    );
}

#[rstest]
#[case("[1,]", "unexpected ']', expected value at 1:4")]
#[case("{\"a\" 1}", "unexpected number, expected ':' after object key at 1:6")]
#[case("[1] 2", "trailing garbage after the top-level value at 1:5")]
#[case("nope", "invalid character 'o' at 1:2")]
#[case("{\n  \"a\": tru}", "invalid character '}' at 2:11")]
#[case("99999999999999999999", "integer overflow at 1:1")]
#[case("[-1e999]", "numeric (floating point) overflow at 1:2")]
fn malformed(#[case] input: &str, #[case] message: &str) {
    assert_eq!(
        parse_error(input.as_bytes()),
        (ParseFailure::Syntax, message.to_owned())
    );
}

#[test]
fn comments_disabled() {
    let mut decoder = Decoder::new(ParserOptions {
        allow_comments: false,
        ..Default::default()
    });
    let err = decoder.decode(b"// no\n1").unwrap_err();
    assert_eq!(
        err.to_string(),
        "syntax error: probable comment found in input text, comments are not enabled at 1:1"
    );
}

#[test]
fn invalid_utf8_checked_by_default() {
    let (kind, message) = parse_error(b"\"\xc3\x28\"");
    assert_eq!(kind, ParseFailure::Syntax);
    assert_eq!(message, "invalid UTF-8 in string at 1:1");
}

#[test]
fn no_partial_tree_on_error() {
    // Events up to the error were delivered, but the caller only sees the error.
    let mut recorder = EventRecorder::default();
    let mut scanner = crate::Scanner::default();
    crate::EventSource::drive(&mut scanner, b"[1, 2, x]", &mut recorder).unwrap();
    assert_eq!(recorder.events().len(), 3);

    assert!(matches!(
        decode(b"[1, 2, x]"),
        Err(DecodeError::Parse {
            kind: ParseFailure::Syntax,
            ..
        })
    ));
}
