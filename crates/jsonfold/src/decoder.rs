//! The decode entry point.
//!
//! [`Decoder`] owns a [`TreeBuilder`] and reuses it across calls, resetting it
//! before every decode so nothing leaks from one document into the next.
//!
//! # Examples
//!
//! ```rust
//! use jsonfold::{Decoder, ParserOptions, Value};
//!
//! let mut decoder = Decoder::new(ParserOptions::default());
//! let value = decoder.decode(br#"{"a": 1, "b": [2, 3]}"#).unwrap();
//! assert_eq!(value.get("a"), Some(&Value::Int(1)));
//!
//! // The same decoder, a fresh document.
//! assert_eq!(decoder.decode(b"true").unwrap(), Value::Bool(true));
//! ```
use log::debug;

use crate::{
    builder::TreeBuilder,
    error::{DecodeError, ParseFailure},
    options::ParserOptions,
    scanner::Scanner,
    source::{EventSource, Status},
    value::Value,
};

/// A reusable decoder.
///
/// One decode runs at a time per instance (`decode` takes `&mut self`); use
/// one decoder per thread for concurrent decoding.
#[derive(Debug, Default)]
pub struct Decoder {
    options: ParserOptions,
    builder: TreeBuilder,
}

impl Decoder {
    /// Creates a decoder whose built-in scanner uses `options`.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            builder: TreeBuilder::new(),
        }
    }

    /// The options passed to [`Decoder::new`].
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Decodes one JSON document with the built-in [`Scanner`].
    ///
    /// # Errors
    ///
    /// See [`Decoder::decode_with`].
    pub fn decode(&mut self, input: &[u8]) -> Result<Value, DecodeError> {
        let mut scanner = Scanner::new(self.options);
        self.decode_with(&mut scanner, input)
    }

    /// Decodes the events `source` produces for `input`.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::EmptyInput`] if `input` is empty; `source` is not
    ///   invoked.
    /// - The first error the tree builder raises while handling an event.
    /// - [`DecodeError::Parse`] if the source reports malformed or truncated
    ///   input.
    /// - [`DecodeError::InvariantViolation`] if the source reports success
    ///   with containers still open.
    /// - [`DecodeError::EmptyDocument`] if the source reports success without
    ///   producing a value.
    ///
    /// After an error the builder may hold a partial tree; it is discarded by
    /// the reset at the start of the next call, including one that fails with
    /// [`DecodeError::EmptyInput`].
    pub fn decode_with<S: EventSource + ?Sized>(
        &mut self,
        source: &mut S,
        input: &[u8],
    ) -> Result<Value, DecodeError> {
        let result = self.run(source, input);
        match &result {
            Ok(value) => debug!("decoded {} bytes into {}", input.len(), value.kind()),
            Err(err) => debug!("decoding {} bytes failed: {err}", input.len()),
        }
        result
    }

    fn run<S: EventSource + ?Sized>(
        &mut self,
        source: &mut S,
        input: &[u8],
    ) -> Result<Value, DecodeError> {
        self.builder.reset();
        if input.is_empty() {
            return Err(DecodeError::EmptyInput);
        }

        match source.drive(input, &mut self.builder)? {
            Status::Ok => {}
            Status::SyntaxError(message) => {
                return Err(DecodeError::Parse {
                    kind: ParseFailure::Syntax,
                    message,
                });
            }
            Status::Incomplete(message) => {
                return Err(DecodeError::Parse {
                    kind: ParseFailure::Incomplete,
                    message,
                });
            }
        }

        if !self.builder.is_idle() {
            return Err(DecodeError::InvariantViolation(
                "event stream ended with containers still open",
            ));
        }
        self.builder.take_root().ok_or(DecodeError::EmptyDocument)
    }
}

/// Decodes one JSON document with default [`ParserOptions`].
///
/// # Errors
///
/// See [`Decoder::decode_with`].
///
/// # Examples
///
/// ```rust
/// use jsonfold::{DecodeError, Value, decode};
///
/// assert_eq!(decode(b"42").unwrap(), Value::Int(42));
/// assert_eq!(decode(b"").unwrap_err(), DecodeError::EmptyInput);
/// ```
pub fn decode(input: &[u8]) -> Result<Value, DecodeError> {
    Decoder::default().decode(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_still_discards_partial_tree() {
        let mut decoder = Decoder::default();
        assert!(matches!(
            decoder.decode(b"[1, [2,"),
            Err(DecodeError::Parse {
                kind: ParseFailure::Incomplete,
                ..
            })
        ));
        assert!(!decoder.builder.is_idle());

        assert_eq!(decoder.decode(b""), Err(DecodeError::EmptyInput));
        assert!(decoder.builder.is_idle());
        assert_eq!(decoder.builder.root(), None);
    }
}
