//! Decodes JSON into an owned value tree by folding a stream of parse events.
//!
//! Decoding is split in two halves:
//!
//! - an [`EventSource`] turns the input into parse events (`null`, `bool`,
//!   `int`, `double`, `raw_number`, `string`, `start_object`, `key`,
//!   `end_object`, `start_array`, `end_array`) and a terminal [`Status`];
//! - the [`TreeBuilder`] folds those events into a [`Value`] with two stacks
//!   (open containers and pending keys) and a root slot.
//!
//! The built-in [`Scanner`] is the usual event source; [`ReplaySource`]
//! replays recorded events.
//!
//! ```rust
//! use jsonfold::{Value, decode};
//!
//! let value = decode(br#"{"a": 1, "b": [2, 3.5, "x"]}"#).unwrap();
//! assert_eq!(value.get("a"), Some(&Value::Int(1)));
//! assert_eq!(
//!     value.get("b"),
//!     Some(&Value::Array(vec![
//!         Value::Int(2),
//!         Value::Float(3.5),
//!         Value::from("x"),
//!     ]))
//! );
//! ```

mod builder;
mod decoder;
mod error;
mod event;
mod options;
mod scanner;
mod source;
mod value;

#[cfg(test)]
mod tests;

pub use builder::TreeBuilder;
pub use decoder::{Decoder, decode};
pub use error::{DecodeError, ParseFailure};
pub use event::{ContainerKind, Event, EventHandler, EventRecorder};
pub use options::{NumberMode, ParserOptions};
pub use scanner::{ScanError, Scanner, SyntaxError};
pub use source::{EventSource, ReplaySource, Status};
pub use value::{Array, Object, Value};
