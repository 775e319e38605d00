/// Configuration for the built-in [`Scanner`](crate::Scanner) and for
/// [`Decoder`](crate::Decoder).
///
/// Options are passed explicitly to each decoder or scanner; there is no
/// process-wide configuration.
///
/// # Examples
///
/// ```rust
/// use jsonfold::{Decoder, NumberMode, ParserOptions, Value};
///
/// let mut decoder = Decoder::new(ParserOptions {
///     number_mode: NumberMode::RawText,
///     ..Default::default()
/// });
/// assert_eq!(decoder.decode(b"7").unwrap(), Value::Float(7.0));
/// ```
///
/// # Default
///
/// Typed numbers, comments allowed, UTF-8 checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// How numbers are reported to the handler.
    ///
    /// # Default
    ///
    /// [`NumberMode::Typed`]
    pub number_mode: NumberMode,

    /// Whether `/* ... */` and `// ...` comments are accepted as whitespace.
    ///
    /// When `false`, a `/` outside a string is a syntax error.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_comments: bool,

    /// Whether string and key contents must be valid UTF-8.
    ///
    /// When `false`, bytes are passed through unchanged, so decoded strings
    /// may hold arbitrary bytes.
    ///
    /// # Default
    ///
    /// `true`
    pub check_utf8: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            number_mode: NumberMode::default(),
            allow_comments: true,
            check_utf8: true,
        }
    }
}

/// Number reporting policy.
///
/// - `Typed`: integers become `integer` events (text outside `i64` range is a
///   syntax error), everything else `double` events.
/// - `RawText`: every number is a `raw_number` event carrying its text; the
///   tree builder converts it to a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberMode {
    /// Integer and float events.
    #[default]
    Typed,
    /// Raw number text events.
    RawText,
}
