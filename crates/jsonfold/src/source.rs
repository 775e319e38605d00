//! The event-source side of the decoder.
//!
//! An event source turns an input buffer into parse events, pushing each one
//! into an [`EventHandler`] in document order, and finishes with a terminal
//! [`Status`]. The crate ships two sources: the byte-level
//! [`Scanner`](crate::Scanner) and [`ReplaySource`], which replays a recorded
//! event list.
use crate::event::{Event, EventHandler};

/// How an event source finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Every event of a complete document was emitted.
    Ok,
    /// The input is malformed; carries the source's diagnostic.
    SyntaxError(String),
    /// The input ended mid-document; carries the source's diagnostic.
    Incomplete(String),
}

/// A producer of parse events.
pub trait EventSource {
    /// Pushes the events found in `input` into `handler`.
    ///
    /// The first handler error stops the source and is returned as `Err`;
    /// otherwise the source's terminal status is returned.
    ///
    /// # Errors
    ///
    /// The first error returned by `handler`.
    fn drive<H: EventHandler + ?Sized>(
        &mut self,
        input: &[u8],
        handler: &mut H,
    ) -> Result<Status, H::Error>;
}

/// Replays a fixed list of events, ignoring the input buffer.
///
/// Useful for driving a handler with event streams no textual input would
/// produce, including malformed ones.
///
/// # Examples
///
/// ```
/// use jsonfold::{Decoder, DecodeError, Event, ParserOptions, ReplaySource};
///
/// let mut source = ReplaySource::new(vec![Event::StartObject, Event::Integer(1)]);
/// let err = Decoder::new(ParserOptions::default())
///     .decode_with(&mut source, b"ignored")
///     .unwrap_err();
/// assert_eq!(err, DecodeError::MissingKey);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySource<'a> {
    events: Vec<Event<'a>>,
    status: Status,
}

impl<'a> ReplaySource<'a> {
    /// A source that emits `events` and then reports [`Status::Ok`].
    #[must_use]
    pub fn new(events: Vec<Event<'a>>) -> Self {
        Self {
            events,
            status: Status::Ok,
        }
    }

    /// Replaces the terminal status reported after the last event.
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// The events this source emits.
    #[must_use]
    pub fn events(&self) -> &[Event<'a>] {
        &self.events
    }
}

impl EventSource for ReplaySource<'_> {
    fn drive<H: EventHandler + ?Sized>(
        &mut self,
        _input: &[u8],
        handler: &mut H,
    ) -> Result<Status, H::Error> {
        for event in &self.events {
            event.dispatch(handler)?;
        }
        Ok(self.status.clone())
    }
}
