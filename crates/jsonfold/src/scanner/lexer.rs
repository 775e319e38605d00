use std::{borrow::Cow, mem};

use bstr::ByteSlice;

use super::{
    error::{ScanError, SyntaxError},
    escape_buffer::UnicodeEscapeBuffer,
};
use crate::options::ParserOptions;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token<'src> {
    Eof,
    /// Must be one of: `{` `}` `[` `]` `:` `,`
    Punctuator(u8),
    /// Decoded string contents. Borrowed from the input when the string has
    /// no escapes.
    String(Cow<'src, [u8]>),
    Number {
        text: &'src str,
        /// No fraction and no exponent.
        integer: bool,
    },
    Boolean(bool),
    Null,
}

impl Token<'_> {
    /// Short description for "unexpected ..." diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Token::Eof => "end of input",
            Token::Punctuator(b'{') => "'{'",
            Token::Punctuator(b'}') => "'}'",
            Token::Punctuator(b'[') => "'['",
            Token::Punctuator(b']') => "']'",
            Token::Punctuator(b':') => "':'",
            Token::Punctuator(b',') => "','",
            Token::Punctuator(_) => "punctuator",
            Token::String(_) => "string",
            Token::Number { .. } => "number",
            Token::Boolean(_) => "boolean",
            Token::Null => "null",
        }
    }
}

#[derive(Copy, Clone)]
struct Mark {
    pos: usize,
    line: usize,
    column: usize,
}

/// Splits a complete input buffer into tokens.
pub(crate) struct Lexer<'src> {
    input: &'src [u8],

    pos: usize,
    line: usize,
    column: usize,

    /// Where the last token started.
    token_line: usize,
    token_column: usize,

    allow_comments: bool,
    check_utf8: bool,

    /// Decoded contents of a string that contains escapes.
    scratch: Vec<u8>,
    unicode_escape_buffer: UnicodeEscapeBuffer,
}

impl<'src> Lexer<'src> {
    pub fn new(input: &'src [u8], options: &ParserOptions) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
            token_line: 1,
            token_column: 1,
            allow_comments: options.allow_comments,
            check_utf8: options.check_utf8,
            scratch: Vec::new(),
            unicode_escape_buffer: UnicodeEscapeBuffer::new(),
        }
    }

    pub fn next_token(&mut self) -> Result<Token<'src>, ScanError> {
        self.skip_insignificant()?;
        self.token_line = self.line;
        self.token_column = self.column;

        let Some(byte) = self.peek() else {
            return Ok(Token::Eof);
        };
        match byte {
            b'{' | b'}' | b'[' | b']' | b':' | b',' => {
                self.advance();
                Ok(Token::Punctuator(byte))
            }
            b'"' => self.lex_string(),
            b'-' | b'0'..=b'9' => self.lex_number(),
            b't' => self.lex_literal(b"true", Token::Boolean(true)),
            b'f' => self.lex_literal(b"false", Token::Boolean(false)),
            b'n' => self.lex_literal(b"null", Token::Null),
            _ => Err(self.invalid_char()),
        }
    }

    // ------------------------------------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------------------------------------

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline]
    fn advance(&mut self) {
        if let Some(b) = self.peek() {
            self.pos += 1;
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else if b & 0xC0 != 0x80 {
                // Continuation bytes do not start a new character.
                self.column += 1;
            }
        }
    }

    fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    fn restore(&mut self, mark: Mark) {
        self.pos = mark.pos;
        self.line = mark.line;
        self.column = mark.column;
    }

    // ------------------------------------------------------------------------------------------------
    // Whitespace & comments
    // ------------------------------------------------------------------------------------------------

    fn skip_insignificant(&mut self) -> Result<(), ScanError> {
        loop {
            match self.peek() {
                Some(b' ' | b'\n' | b'\r' | b'\t') => self.advance(),
                Some(b'/') => self.skip_comment()?,
                _ => return Ok(()),
            }
        }
    }

    fn skip_comment(&mut self) -> Result<(), ScanError> {
        if !self.allow_comments {
            return Err(self.syntax_error(SyntaxError::CommentsDisabled));
        }
        self.advance();
        match self.peek() {
            Some(b'/') => {
                while let Some(b) = self.peek() {
                    self.advance();
                    if b == b'\n' {
                        break;
                    }
                }
                Ok(())
            }
            Some(b'*') => {
                self.advance();
                loop {
                    match self.peek() {
                        None => return Err(self.syntax_error(SyntaxError::UnexpectedEndOfInput)),
                        Some(b'*') => {
                            self.advance();
                            if self.peek() == Some(b'/') {
                                self.advance();
                                return Ok(());
                            }
                        }
                        Some(_) => self.advance(),
                    }
                }
            }
            _ => Err(self.invalid_char()),
        }
    }

    // ------------------------------------------------------------------------------------------------
    // Literals & numbers
    // ------------------------------------------------------------------------------------------------

    fn lex_literal(
        &mut self,
        literal: &'static [u8],
        token: Token<'src>,
    ) -> Result<Token<'src>, ScanError> {
        for &expected in literal {
            match self.peek() {
                Some(b) if b == expected => self.advance(),
                _ => return Err(self.invalid_char()),
            }
        }
        Ok(token)
    }

    fn lex_number(&mut self) -> Result<Token<'src>, ScanError> {
        let input = self.input;
        let start = self.pos;
        let mut integer = true;

        if self.peek() == Some(b'-') {
            self.advance();
        }
        match self.peek() {
            Some(b'0') => self.advance(),
            Some(b'1'..=b'9') => self.skip_digits(),
            _ => return Err(self.invalid_char()),
        }
        if self.peek() == Some(b'.') {
            integer = false;
            self.advance();
            self.expect_digits()?;
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            integer = false;
            self.advance();
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.advance();
            }
            self.expect_digits()?;
        }

        let text = input[start..self.pos]
            .to_str()
            .map_err(|_| self.token_error(SyntaxError::InvalidUtf8))?;
        Ok(Token::Number { text, integer })
    }

    fn skip_digits(&mut self) {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.advance();
        }
    }

    fn expect_digits(&mut self) -> Result<(), ScanError> {
        match self.peek() {
            Some(b'0'..=b'9') => {
                self.skip_digits();
                Ok(())
            }
            _ => Err(self.invalid_char()),
        }
    }

    // ------------------------------------------------------------------------------------------------
    // Strings
    // ------------------------------------------------------------------------------------------------

    fn lex_string(&mut self) -> Result<Token<'src>, ScanError> {
        let input = self.input;
        self.advance(); // opening quote
        let start = self.pos;

        // Borrow the contents straight from the input until an escape shows up.
        loop {
            match self.peek() {
                None => return Err(self.syntax_error(SyntaxError::UnexpectedEndOfInput)),
                Some(b'"') => {
                    let bytes = &input[start..self.pos];
                    self.check_string(bytes)?;
                    self.advance();
                    return Ok(Token::String(Cow::Borrowed(bytes)));
                }
                Some(b'\\') => break,
                Some(b) if b < 0x20 => {
                    return Err(self.syntax_error(SyntaxError::ControlCharacterInString(b)));
                }
                Some(_) => self.advance(),
            }
        }

        self.scratch.clear();
        self.scratch.extend_from_slice(&input[start..self.pos]);
        loop {
            match self.peek() {
                None => return Err(self.syntax_error(SyntaxError::UnexpectedEndOfInput)),
                Some(b'"') => {
                    let bytes = mem::take(&mut self.scratch);
                    self.check_string(&bytes)?;
                    self.advance();
                    return Ok(Token::String(Cow::Owned(bytes)));
                }
                Some(b'\\') => {
                    self.advance();
                    self.lex_escape()?;
                }
                Some(b) if b < 0x20 => {
                    return Err(self.syntax_error(SyntaxError::ControlCharacterInString(b)));
                }
                Some(b) => {
                    self.scratch.push(b);
                    self.advance();
                }
            }
        }
    }

    fn lex_escape(&mut self) -> Result<(), ScanError> {
        let decoded = match self.peek() {
            None => return Err(self.syntax_error(SyntaxError::UnexpectedEndOfInput)),
            Some(b'"') => b'"',
            Some(b'\\') => b'\\',
            Some(b'/') => b'/',
            Some(b'b') => 0x08,
            Some(b'f') => 0x0C,
            Some(b'n') => b'\n',
            Some(b'r') => b'\r',
            Some(b't') => b'\t',
            Some(b'u') => {
                self.advance();
                let c = self.lex_unicode_escape()?;
                let mut buf = [0; 4];
                self.scratch
                    .extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                return Ok(());
            }
            Some(_) => {
                let err = match self.invalid_char().source {
                    SyntaxError::InvalidCharacter(c) => SyntaxError::InvalidEscape(c),
                    other => other,
                };
                return Err(self.syntax_error(err));
            }
        };
        self.advance();
        self.scratch.push(decoded);
        Ok(())
    }

    /// Decodes the digits after `\u`, pairing a high surrogate with an
    /// immediately following `\u` low surrogate. Unpaired surrogates decode to
    /// U+FFFD.
    fn lex_unicode_escape(&mut self) -> Result<char, ScanError> {
        let unit = self.lex_code_unit()?;
        if !(0xD800..=0xDBFF).contains(&unit) {
            return Ok(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER));
        }

        if self.input[self.pos..].starts_with(b"\\u") {
            let mark = self.mark();
            self.advance();
            self.advance();
            let low = self.lex_code_unit()?;
            if (0xDC00..=0xDFFF).contains(&low) {
                let code = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                return Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            // Not a low surrogate: leave it to be decoded as its own escape.
            self.restore(mark);
        }
        Ok(char::REPLACEMENT_CHARACTER)
    }

    fn lex_code_unit(&mut self) -> Result<u16, ScanError> {
        self.unicode_escape_buffer.reset();
        loop {
            let Some(b) = self.peek() else {
                return Err(self.syntax_error(SyntaxError::UnexpectedEndOfInput));
            };
            let unit = self
                .unicode_escape_buffer
                .feed(b)
                .map_err(|err| self.syntax_error(err))?;
            self.advance();
            if let Some(unit) = unit {
                return Ok(unit);
            }
        }
    }

    fn check_string(&self, bytes: &[u8]) -> Result<(), ScanError> {
        if self.check_utf8 && bytes.to_str().is_err() {
            return Err(self.token_error(SyntaxError::InvalidUtf8));
        }
        Ok(())
    }

    // ------------------------------------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------------------------------------

    /// The character under the cursor is not acceptable here.
    pub fn invalid_char(&self) -> ScanError {
        let rest = &self.input[self.pos..];
        let err = match bstr::decode_utf8(rest) {
            (Some(c), _) => SyntaxError::InvalidCharacter(c),
            (None, _) => rest
                .first()
                .copied()
                .map_or(SyntaxError::UnexpectedEndOfInput, SyntaxError::InvalidByte),
        };
        self.syntax_error(err)
    }

    /// An error at the cursor.
    pub fn syntax_error(&self, source: SyntaxError) -> ScanError {
        ScanError {
            source,
            line: self.line,
            column: self.column,
        }
    }

    /// An error at the start of the last token.
    pub fn token_error(&self, source: SyntaxError) -> ScanError {
        ScanError {
            source,
            line: self.token_line,
            column: self.token_column,
        }
    }

    pub fn unexpected(&self, found: &Token<'_>, expected: &'static str) -> ScanError {
        self.token_error(SyntaxError::UnexpectedToken {
            found: found.describe(),
            expected,
        })
    }
}
