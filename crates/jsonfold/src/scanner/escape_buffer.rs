//! Accumulates the four hexadecimal digits of a `\uXXXX` escape.
//!
//! The buffer yields a UTF-16 code unit rather than a `char`: surrogate
//! halves are valid here and are paired (or replaced) by the lexer.

use crate::scanner::error::SyntaxError;

#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    acc: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.acc = 0;
        self.len = 0;
    }

    #[inline]
    fn hex_val(b: u8) -> Option<u16> {
        match b {
            b'0'..=b'9' => Some(u16::from(b - b'0')),
            b'a'..=b'f' => Some(u16::from(b - b'a') + 10),
            b'A'..=b'F' => Some(u16::from(b - b'A') + 10),
            _ => None,
        }
    }

    /// Feeds one digit. Returns the code unit once the fourth digit arrives,
    /// resetting for the next escape.
    pub fn feed(&mut self, b: u8) -> Result<Option<u16>, SyntaxError> {
        let d = Self::hex_val(b).ok_or(SyntaxError::InvalidUnicodeEscapeChar(char::from(b)))?;

        self.acc = (self.acc << 4) | d;
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        let unit = self.acc;
        self.reset();
        Ok(Some(unit))
    }
}

#[cfg(test)]
mod tests {
    use super::UnicodeEscapeBuffer;
    use crate::scanner::error::SyntaxError;

    #[test]
    fn basic_decoding() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(buf.feed(b'0').unwrap(), None);
        assert_eq!(buf.feed(b'0').unwrap(), None);
        assert_eq!(buf.feed(b'4').unwrap(), None);
        assert_eq!(buf.feed(b'1').unwrap(), Some(0x41));
    }

    #[test]
    fn mixed_case_hex() {
        let mut buf = UnicodeEscapeBuffer::new();
        let mut last = None;
        for b in b"AbCd" {
            last = buf.feed(*b).unwrap();
        }
        assert_eq!(last, Some(0xABCD));
    }

    #[test]
    fn surrogates_are_code_units() {
        let mut buf = UnicodeEscapeBuffer::new();
        let mut last = None;
        for b in b"D83D" {
            last = buf.feed(*b).unwrap();
        }
        assert_eq!(last, Some(0xD83D));
    }

    #[test]
    fn reset_clears_buffer() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert!(buf.feed(b'F').unwrap().is_none());
        buf.reset();
        for b in b"004" {
            assert_eq!(buf.feed(*b).unwrap(), None);
        }
        assert_eq!(buf.feed(b'2').unwrap(), Some(0x42));
    }

    #[test]
    fn invalid_hex_error() {
        let mut buf = UnicodeEscapeBuffer::new();
        let err = buf.feed(b'G').unwrap_err();
        assert_eq!(err, SyntaxError::InvalidUnicodeEscapeChar('G'));
    }
}
