//! The built-in event source: a single-pass JSON scanner over a complete
//! buffer.
//!
//! The [`Scanner`] lexes the input into tokens and runs them through a small
//! grammar state machine, pushing one event into the handler for every value,
//! key and container boundary. It accepts exactly one top-level value of any
//! type, surrounded by optional whitespace and (when enabled) comments.
//!
//! # Examples
//!
//! ```
//! use jsonfold::{EventRecorder, EventSource, ParserOptions, Scanner, Status};
//!
//! let mut scanner = Scanner::new(ParserOptions::default());
//! let mut recorder = EventRecorder::default();
//! let status = scanner.drive(b"[1, 2", &mut recorder).unwrap();
//! assert_eq!(
//!     status,
//!     Status::Incomplete("unexpected end of input at 1:6".to_string())
//! );
//! assert_eq!(recorder.events().len(), 3);
//! ```

mod error;
mod escape_buffer;
mod lexer;


pub use error::{ScanError, SyntaxError};
use lexer::{Lexer, Token};
use log::debug;

use crate::{
    event::{ContainerKind, EventHandler},
    options::{NumberMode, ParserOptions},
    source::{EventSource, Status},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Start,
    BeforeFirstPropertyName,
    BeforePropertyName,
    AfterPropertyName,
    BeforePropertyValue,
    BeforeFirstArrayValue,
    BeforeArrayValue,
    AfterPropertyValue,
    AfterArrayValue,
    End,
}

/// Why a scan stopped early.
enum Halt<E> {
    Syntax(ScanError),
    Handler(E),
}

impl<E> From<ScanError> for Halt<E> {
    fn from(err: ScanError) -> Self {
        Halt::Syntax(err)
    }
}

/// Byte-level JSON event source.
///
/// Numbers, comments and UTF-8 checking follow the [`ParserOptions`] the
/// scanner was created with. The scanner keeps no state between calls except
/// the error of the last one.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    options: ParserOptions,
    last_error: Option<ScanError>,
}

impl Scanner {
    /// Creates a scanner with the given options.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            last_error: None,
        }
    }

    /// The options this scanner was created with.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// The positioned error behind the last non-`Ok` status, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&ScanError> {
        self.last_error.as_ref()
    }

    fn run<H: EventHandler + ?Sized>(
        &self,
        lexer: &mut Lexer<'_>,
        handler: &mut H,
    ) -> Result<(), Halt<H::Error>> {
        use ParseState::*;

        let mut frames: Vec<ContainerKind> = Vec::new();
        let mut state = Start;

        loop {
            let token = lexer.next_token()?;
            state = match (state, token) {
                // Whitespace or comments only: no value, but nothing malformed.
                (Start | End, Token::Eof) => return Ok(()),
                (End, _) => return Err(lexer.token_error(SyntaxError::TrailingGarbage).into()),
                (_, Token::Eof) => {
                    return Err(lexer.syntax_error(SyntaxError::UnexpectedEndOfInput).into());
                }

                (BeforeFirstArrayValue, Token::Punctuator(b']')) => {
                    Self::close(ContainerKind::Array, &mut frames, handler)?
                }
                (Start | BeforePropertyValue | BeforeArrayValue | BeforeFirstArrayValue, token) => {
                    self.value(token, lexer, &mut frames, handler)?
                }

                (BeforeFirstPropertyName, Token::Punctuator(b'}')) => {
                    Self::close(ContainerKind::Object, &mut frames, handler)?
                }
                (BeforeFirstPropertyName | BeforePropertyName, Token::String(key)) => {
                    handler.key(&key).map_err(Halt::Handler)?;
                    AfterPropertyName
                }
                (BeforeFirstPropertyName | BeforePropertyName, token) => {
                    return Err(lexer.unexpected(&token, "object key").into());
                }

                (AfterPropertyName, Token::Punctuator(b':')) => BeforePropertyValue,
                (AfterPropertyName, token) => {
                    return Err(lexer.unexpected(&token, "':' after object key").into());
                }

                (AfterPropertyValue, Token::Punctuator(b',')) => BeforePropertyName,
                (AfterPropertyValue, Token::Punctuator(b'}')) => {
                    Self::close(ContainerKind::Object, &mut frames, handler)?
                }
                (AfterPropertyValue, token) => {
                    return Err(lexer.unexpected(&token, "',' or '}'").into());
                }

                (AfterArrayValue, Token::Punctuator(b',')) => BeforeArrayValue,
                (AfterArrayValue, Token::Punctuator(b']')) => {
                    Self::close(ContainerKind::Array, &mut frames, handler)?
                }
                (AfterArrayValue, token) => {
                    return Err(lexer.unexpected(&token, "',' or ']'").into());
                }
            };
        }
    }

    fn value<H: EventHandler + ?Sized>(
        &self,
        token: Token<'_>,
        lexer: &Lexer<'_>,
        frames: &mut Vec<ContainerKind>,
        handler: &mut H,
    ) -> Result<ParseState, Halt<H::Error>> {
        let emitted = match token {
            Token::Punctuator(b'{') => {
                handler.start_object().map_err(Halt::Handler)?;
                frames.push(ContainerKind::Object);
                return Ok(ParseState::BeforeFirstPropertyName);
            }
            Token::Punctuator(b'[') => {
                handler.start_array().map_err(Halt::Handler)?;
                frames.push(ContainerKind::Array);
                return Ok(ParseState::BeforeFirstArrayValue);
            }
            Token::Null => handler.null(),
            Token::Boolean(b) => handler.boolean(b),
            Token::String(bytes) => handler.string(&bytes),
            Token::Number { text, integer } => {
                self.number(text, integer, lexer, handler)?;
                return Ok(Self::after_value(frames));
            }
            token => return Err(lexer.unexpected(&token, "value").into()),
        };
        emitted.map_err(Halt::Handler)?;
        Ok(Self::after_value(frames))
    }

    fn number<H: EventHandler + ?Sized>(
        &self,
        text: &str,
        integer: bool,
        lexer: &Lexer<'_>,
        handler: &mut H,
    ) -> Result<(), Halt<H::Error>> {
        let emitted = match self.options.number_mode {
            NumberMode::RawText => handler.raw_number(text),
            NumberMode::Typed if integer => {
                let value = text
                    .parse::<i64>()
                    .map_err(|_| lexer.token_error(SyntaxError::IntegerOverflow))?;
                handler.integer(value)
            }
            NumberMode::Typed => {
                let value = text
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| lexer.token_error(SyntaxError::FloatOverflow))?;
                handler.double(value)
            }
        };
        emitted.map_err(Halt::Handler)
    }

    fn close<H: EventHandler + ?Sized>(
        kind: ContainerKind,
        frames: &mut Vec<ContainerKind>,
        handler: &mut H,
    ) -> Result<ParseState, Halt<H::Error>> {
        debug_assert_eq!(frames.last(), Some(&kind));
        frames.pop();
        match kind {
            ContainerKind::Array => handler.end_array(),
            ContainerKind::Object => handler.end_object(),
        }
        .map_err(Halt::Handler)?;
        Ok(Self::after_value(frames))
    }

    fn after_value(frames: &[ContainerKind]) -> ParseState {
        match frames.last() {
            None => ParseState::End,
            Some(ContainerKind::Array) => ParseState::AfterArrayValue,
            Some(ContainerKind::Object) => ParseState::AfterPropertyValue,
        }
    }
}

impl EventSource for Scanner {
    fn drive<H: EventHandler + ?Sized>(
        &mut self,
        input: &[u8],
        handler: &mut H,
    ) -> Result<Status, H::Error> {
        self.last_error = None;
        let mut lexer = Lexer::new(input, &self.options);
        match self.run(&mut lexer, handler) {
            Ok(()) => Ok(Status::Ok),
            Err(Halt::Handler(err)) => Err(err),
            Err(Halt::Syntax(err)) => {
                debug!("scan stopped: {err}");
                let message = err.to_string();
                let status = if err.is_incomplete() {
                    Status::Incomplete(message)
                } else {
                    Status::SyntaxError(message)
                };
                self.last_error = Some(err);
                Ok(status)
            }
        }
    }
}
