//! Parse events exchanged between an event source and a handler.
//!
//! An [`EventSource`](crate::EventSource) pushes events into an
//! [`EventHandler`], one method call per event, in document order. The
//! [`Event`] enum is the same vocabulary as data, for recording and replaying
//! event streams.
//!
//! # Examples
//!
//! ```
//! use jsonfold::{Event, EventRecorder, EventSource, ParserOptions, Scanner, Status};
//!
//! let mut recorder = EventRecorder::default();
//! let status = Scanner::new(ParserOptions::default())
//!     .drive(br#"{"a":[1]}"#, &mut recorder)
//!     .unwrap();
//! assert_eq!(status, Status::Ok);
//! assert_eq!(
//!     recorder.into_events(),
//!     vec![
//!         Event::StartObject,
//!         Event::Key(b"a".as_slice().into()),
//!         Event::StartArray,
//!         Event::Integer(1),
//!         Event::EndArray,
//!         Event::EndObject,
//!     ]
//! );
//! ```
use std::{borrow::Cow, convert::Infallible, fmt};

/// The two container kinds an event stream can open.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    /// `[ ... ]`
    Array,
    /// `{ ... }`
    Object,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Array => "array",
            Self::Object => "object",
        })
    }
}

/// Receives parse events, one call per event.
///
/// Returning an error from any method stops the event source; the error is
/// handed back to whoever drove the source.
pub trait EventHandler {
    /// Error produced when an event cannot be accepted.
    type Error;

    /// `null`
    fn null(&mut self) -> Result<(), Self::Error>;
    /// `true` / `false`
    fn boolean(&mut self, value: bool) -> Result<(), Self::Error>;
    /// A number without fraction or exponent that fits in `i64`.
    fn integer(&mut self, value: i64) -> Result<(), Self::Error>;
    /// Any other number, already converted.
    fn double(&mut self, value: f64) -> Result<(), Self::Error>;
    /// The unconverted number text. Sources emit either this or the typed
    /// `integer`/`double` pair for a given parse, never both.
    fn raw_number(&mut self, text: &str) -> Result<(), Self::Error>;
    /// A string value: exactly these bytes, which may include NUL.
    fn string(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
    /// `{`
    fn start_object(&mut self) -> Result<(), Self::Error>;
    /// An object key; the next value event belongs to it.
    fn key(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
    /// `}`
    fn end_object(&mut self) -> Result<(), Self::Error>;
    /// `[`
    fn start_array(&mut self) -> Result<(), Self::Error>;
    /// `]`
    fn end_array(&mut self) -> Result<(), Self::Error>;
}

/// A single parse event as data.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'a> {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean(bool),
    /// A typed integer.
    Integer(i64),
    /// A typed floating point number.
    Double(f64),
    /// Number text, unconverted.
    RawNumber(Cow<'a, str>),
    /// A string value.
    String(Cow<'a, [u8]>),
    /// `{`
    StartObject,
    /// An object key.
    Key(Cow<'a, [u8]>),
    /// `}`
    EndObject,
    /// `[`
    StartArray,
    /// `]`
    EndArray,
}

impl Event<'_> {
    /// Calls the handler method matching this event.
    ///
    /// # Errors
    ///
    /// Whatever the handler returns.
    pub fn dispatch<H: EventHandler + ?Sized>(&self, handler: &mut H) -> Result<(), H::Error> {
        match self {
            Event::Null => handler.null(),
            Event::Boolean(b) => handler.boolean(*b),
            Event::Integer(i) => handler.integer(*i),
            Event::Double(d) => handler.double(*d),
            Event::RawNumber(text) => handler.raw_number(text),
            Event::String(bytes) => handler.string(bytes),
            Event::StartObject => handler.start_object(),
            Event::Key(bytes) => handler.key(bytes),
            Event::EndObject => handler.end_object(),
            Event::StartArray => handler.start_array(),
            Event::EndArray => handler.end_array(),
        }
    }

    /// Detaches the event from any borrowed input.
    #[must_use]
    pub fn into_owned(self) -> Event<'static> {
        match self {
            Event::Null => Event::Null,
            Event::Boolean(b) => Event::Boolean(b),
            Event::Integer(i) => Event::Integer(i),
            Event::Double(d) => Event::Double(d),
            Event::RawNumber(text) => Event::RawNumber(Cow::Owned(text.into_owned())),
            Event::String(bytes) => Event::String(Cow::Owned(bytes.into_owned())),
            Event::StartObject => Event::StartObject,
            Event::Key(bytes) => Event::Key(Cow::Owned(bytes.into_owned())),
            Event::EndObject => Event::EndObject,
            Event::StartArray => Event::StartArray,
            Event::EndArray => Event::EndArray,
        }
    }
}

/// A handler that accepts every event and keeps an owned copy of it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EventRecorder {
    events: Vec<Event<'static>>,
}

impl EventRecorder {
    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[Event<'static>] {
        &self.events
    }

    /// Consumes the recorder, returning its events.
    #[must_use]
    pub fn into_events(self) -> Vec<Event<'static>> {
        self.events
    }

    fn record(&mut self, event: Event<'static>) -> Result<(), Infallible> {
        self.events.push(event);
        Ok(())
    }
}

impl EventHandler for EventRecorder {
    type Error = Infallible;

    fn null(&mut self) -> Result<(), Self::Error> {
        self.record(Event::Null)
    }

    fn boolean(&mut self, value: bool) -> Result<(), Self::Error> {
        self.record(Event::Boolean(value))
    }

    fn integer(&mut self, value: i64) -> Result<(), Self::Error> {
        self.record(Event::Integer(value))
    }

    fn double(&mut self, value: f64) -> Result<(), Self::Error> {
        self.record(Event::Double(value))
    }

    fn raw_number(&mut self, text: &str) -> Result<(), Self::Error> {
        self.record(Event::RawNumber(Cow::Owned(text.to_owned())))
    }

    fn string(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.record(Event::String(Cow::Owned(bytes.to_vec())))
    }

    fn start_object(&mut self) -> Result<(), Self::Error> {
        self.record(Event::StartObject)
    }

    fn key(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.record(Event::Key(Cow::Owned(bytes.to_vec())))
    }

    fn end_object(&mut self) -> Result<(), Self::Error> {
        self.record(Event::EndObject)
    }

    fn start_array(&mut self) -> Result<(), Self::Error> {
        self.record(Event::StartArray)
    }

    fn end_array(&mut self) -> Result<(), Self::Error> {
        self.record(Event::EndArray)
    }
}
