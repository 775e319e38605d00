use std::fmt;

use thiserror::Error;

use crate::event::ContainerKind;

/// Why a decode call failed.
///
/// `decode` never returns a partial tree: it yields either a complete
/// [`Value`](crate::Value) or exactly one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The input buffer was empty; the event source was not invoked.
    #[error("cannot decode an empty buffer")]
    EmptyInput,
    /// The event source reported malformed or truncated input.
    #[error("{kind}: {message}")]
    Parse {
        /// Which terminal status the source reported.
        kind: ParseFailure,
        /// The source's diagnostic text.
        message: String,
    },
    /// A key event arrived while the innermost open container was not an
    /// object, or while that object already had a key waiting for its value.
    #[error("object key received outside of an object awaiting a key")]
    KeyContext,
    /// A value event arrived for an object that has no pending key.
    #[error("value received for an object with no pending key")]
    MissingKey,
    /// An end event arrived with no matching open container.
    #[error("end of {0} received with no matching open {0}")]
    Unbalanced(ContainerKind),
    /// The source reported success but no value ever reached the root.
    #[error("input parsed successfully but contained no value")]
    EmptyDocument,
    /// Raw number text could not be converted to a float.
    #[error("invalid number text {text:?}")]
    NumberFormat {
        /// The offending text.
        text: String,
    },
    /// A state that a conforming event source cannot produce.
    #[error("builder invariant violated: {0}")]
    InvariantViolation(&'static str),
}

/// Non-`ok` terminal statuses of an event source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParseFailure {
    /// The input is malformed.
    Syntax,
    /// The input ended before the document was complete.
    Incomplete,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Syntax => "syntax error",
            Self::Incomplete => "incomplete input",
        })
    }
}
