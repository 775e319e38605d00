mod arbitrary;
mod decode_bad;
mod decode_good;

use std::borrow::Cow;

use crate::{DecodeError, Decoder, Event, Object, ParserOptions, ReplaySource, Value};

pub(crate) fn key(k: &str) -> Event<'static> {
    Event::Key(Cow::Owned(k.as_bytes().to_vec()))
}

pub(crate) fn string(s: &str) -> Event<'static> {
    Event::String(Cow::Owned(s.as_bytes().to_vec()))
}

pub(crate) fn object<const N: usize>(entries: [(&str, Value); N]) -> Value {
    let mut object = Object::new();
    for (k, v) in entries {
        object.insert(k.into(), v);
    }
    Value::Object(object)
}

/// Decodes a recorded event stream with a fresh decoder.
pub(crate) fn replay(events: Vec<Event<'_>>) -> Result<Value, DecodeError> {
    let mut source = ReplaySource::new(events);
    Decoder::new(ParserOptions::default()).decode_with(&mut source, b"<replayed>")
}

/// Nesting used to check that building and dropping trees never recurses.
pub(crate) const DEEP: usize = 100_000;

/// Containers on the path that always follows the first child.
pub(crate) fn nesting_depth(mut value: &Value) -> usize {
    let mut depth = 0;
    loop {
        let first = match value {
            Value::Array(items) => items.first(),
            Value::Object(object) => object.values().next(),
            _ => return depth,
        };
        depth += 1;
        match first {
            Some(inner) => value = inner,
            None => return depth,
        }
    }
}
