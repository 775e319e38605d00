use thiserror::Error;

/// A positioned scanner failure.
///
/// Rendered as `"{error} at {line}:{column}"`; this text becomes the
/// diagnostic of the terminal [`Status`](crate::Status).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{source} at {line}:{column}")]
pub struct ScanError {
    /// What went wrong.
    pub source: SyntaxError,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl ScanError {
    /// `true` if more input could have completed the document.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        matches!(self.source, SyntaxError::UnexpectedEndOfInput)
    }
}

/// Kinds of malformed input the scanner rejects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
    #[error("invalid byte 0x{0:02X}")]
    InvalidByte(u8),
    #[error("invalid character inside string: 0x{0:02X}")]
    ControlCharacterInString(u8),
    #[error("invalid escape character '{0}'")]
    InvalidEscape(char),
    #[error("invalid unicode escape sequence at character: '{0}'")]
    InvalidUnicodeEscapeChar(char),
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    #[error("probable comment found in input text, comments are not enabled")]
    CommentsDisabled,
    #[error("integer overflow")]
    IntegerOverflow,
    #[error("numeric (floating point) overflow")]
    FloatOverflow,
    #[error("unexpected {found}, expected {expected}")]
    UnexpectedToken {
        found: &'static str,
        expected: &'static str,
    },
    #[error("trailing garbage after the top-level value")]
    TrailingGarbage,
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}
