//! JSON value types and utilities.
//!
//! This module defines the [`Value`] enum, the owned tree produced by the
//! decoder. Strings and object keys are byte strings ([`BString`]) so that
//! embedded NUL bytes and, when UTF-8 checking is disabled, arbitrary bytes
//! survive decoding unchanged.

use std::{borrow::Cow, mem};

use bstr::{BStr, BString, ByteSlice};
use indexmap::IndexMap;

use crate::event::Event;

/// Object representation: insertion ordered, looked up by key.
pub type Object = IndexMap<BString, Value>;
/// Array representation.
pub type Array = Vec<Value>;

/// A decoded JSON value.
///
/// Every node is owned by exactly one parent (or by the caller, for the root),
/// so the tree is acyclic by construction.
///
/// # Examples
///
/// ```
/// use jsonfold::{Object, Value};
///
/// let mut object = Object::new();
/// object.insert("key".into(), Value::from("value"));
/// let v = Value::Object(object);
/// assert_eq!(v.get("key").and_then(Value::as_str), Some("value"));
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// `null`
    #[default]
    Null,
    /// `true` or `false`
    Bool(bool),
    /// An integer that fits in `i64`.
    Int(i64),
    /// Any other number.
    Float(f64),
    /// A string, as the exact bytes produced by the event source.
    String(BString),
    /// An ordered list of values.
    Array(Array),
    /// A mapping from key to value, iterated in insertion order.
    Object(Object),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v.into())
    }
}

impl From<BString> for Value {
    fn from(v: BString) -> Self {
        Self::String(v)
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Short lowercase name of the variant, used in logs and diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Bool`].
    ///
    /// [`Bool`]: Value::Bool
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(..))
    }

    /// Returns `true` if the value is [`Int`] or [`Float`].
    ///
    /// [`Int`]: Value::Int
    /// [`Float`]: Value::Float
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(..) | Self::Float(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// The boolean, if this is a [`Bool`](Value::Bool).
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer, if this is an [`Int`](Value::Int).
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The number as `f64`. Integers are widened, possibly losing precision.
    ///
    /// ```
    /// use jsonfold::Value;
    ///
    /// assert_eq!(Value::Int(3).as_f64(), Some(3.0));
    /// assert_eq!(Value::Float(0.5).as_f64(), Some(0.5));
    /// assert_eq!(Value::Null.as_f64(), None);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The raw string bytes, if this is a [`String`](Value::String).
    #[must_use]
    pub fn as_bytes(&self) -> Option<&BStr> {
        match self {
            Self::String(s) => Some(s.as_bstr()),
            _ => None,
        }
    }

    /// The string as `&str`, if this is a [`String`](Value::String) holding
    /// valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|s| s.to_str().ok())
    }

    /// The elements, if this is an [`Array`](Value::Array).
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// The entries, if this is an [`Object`](Value::Object).
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Looks up `key` in an object. Returns `None` for every other variant.
    #[must_use]
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&Value> {
        self.as_object()
            .and_then(|o| o.get(key.as_ref().as_bstr()))
    }

    /// Walks the tree and returns the event sequence that rebuilds it.
    ///
    /// Numbers come back as typed `Integer`/`Double` events; strings and keys
    /// borrow from `self`.
    ///
    /// ```
    /// use jsonfold::{Event, Value};
    ///
    /// let v = Value::Array(vec![Value::Int(1)]);
    /// assert_eq!(
    ///     v.events(),
    ///     vec![Event::StartArray, Event::Integer(1), Event::EndArray]
    /// );
    /// ```
    #[must_use]
    pub fn events(&self) -> Vec<Event<'_>> {
        enum Step<'a> {
            Visit(&'a Value),
            Emit(Event<'a>),
        }

        let mut out = Vec::new();
        let mut stack = vec![Step::Visit(self)];
        while let Some(step) = stack.pop() {
            let value = match step {
                Step::Emit(event) => {
                    out.push(event);
                    continue;
                }
                Step::Visit(value) => value,
            };
            match value {
                Self::Null => out.push(Event::Null),
                Self::Bool(b) => out.push(Event::Boolean(*b)),
                Self::Int(i) => out.push(Event::Integer(*i)),
                Self::Float(f) => out.push(Event::Double(*f)),
                Self::String(s) => out.push(Event::String(Cow::Borrowed(s.as_slice()))),
                Self::Array(array) => {
                    out.push(Event::StartArray);
                    stack.push(Step::Emit(Event::EndArray));
                    stack.extend(array.iter().rev().map(Step::Visit));
                }
                Self::Object(object) => {
                    out.push(Event::StartObject);
                    stack.push(Step::Emit(Event::EndObject));
                    for (k, v) in object.iter().rev() {
                        stack.push(Step::Visit(v));
                        stack.push(Step::Emit(Event::Key(Cow::Borrowed(k.as_slice()))));
                    }
                }
            }
        }
        out
    }

    /// `true` for an array or object with at least one element.
    fn has_children(&self) -> bool {
        match self {
            Self::Array(array) => !array.is_empty(),
            Self::Object(object) => !object.is_empty(),
            _ => false,
        }
    }
}

// Nested containers are torn down from a heap worklist, so dropping a deeply
// nested tree never recurses.
impl Drop for Value {
    fn drop(&mut self) {
        let nested = match self {
            Self::Array(array) => array.iter().any(Value::has_children),
            Self::Object(object) => object.values().any(Value::has_children),
            _ => false,
        };
        if !nested {
            return;
        }

        let mut pending: Vec<Value> = match self {
            Self::Array(array) => mem::take(array),
            Self::Object(object) => object.drain(..).map(|(_, v)| v).collect(),
            _ => return,
        };
        while let Some(mut value) = pending.pop() {
            match &mut value {
                Self::Array(array) => pending.append(array),
                Self::Object(object) => pending.extend(object.drain(..).map(|(_, v)| v)),
                _ => {}
            }
        }
    }
}

// Serialized the way `serde_json::Value` is: untagged, with strings and keys
// rendered lossily as UTF-8.
#[cfg(any(test, feature = "serde"))]
mod serde_impls {
    use bstr::ByteSlice;
    use serde::{
        Serialize, Serializer,
        ser::{SerializeMap, SerializeSeq},
    };

    use super::Value;

    impl Serialize for Value {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self {
                Value::Null => serializer.serialize_unit(),
                Value::Bool(b) => serializer.serialize_bool(*b),
                Value::Int(i) => serializer.serialize_i64(*i),
                Value::Float(f) => serializer.serialize_f64(*f),
                Value::String(s) => serializer.serialize_str(&s.to_str_lossy()),
                Value::Array(array) => {
                    let mut seq = serializer.serialize_seq(Some(array.len()))?;
                    for v in array {
                        seq.serialize_element(v)?;
                    }
                    seq.end()
                }
                Value::Object(object) => {
                    let mut map = serializer.serialize_map(Some(object.len()))?;
                    for (k, v) in object {
                        map.serialize_entry(&*k.to_str_lossy(), v)?;
                    }
                    map.end()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_only_looks_into_objects() {
        let mut object = Object::new();
        object.insert("a".into(), Value::Int(1));
        let v = Value::Object(object);
        assert_eq!(v.get("a"), Some(&Value::Int(1)));
        assert_eq!(v.get(b"b"), None);
        assert_eq!(Value::Array(vec![]).get("a"), None);
    }

    #[test]
    fn as_str_rejects_invalid_utf8() {
        let v = Value::String(BString::from(&b"\xff\xfe"[..]));
        assert!(v.as_bytes().is_some());
        assert_eq!(v.as_str(), None);
    }

    #[test]
    fn events_follow_insertion_order() {
        let mut object = Object::new();
        object.insert("z".into(), Value::Null);
        object.insert("a".into(), Value::Bool(true));
        let v = Value::Object(object);
        assert_eq!(
            v.events(),
            vec![
                Event::StartObject,
                Event::Key(Cow::Borrowed(&b"z"[..])),
                Event::Null,
                Event::Key(Cow::Borrowed(&b"a"[..])),
                Event::Boolean(true),
                Event::EndObject,
            ]
        );
    }

    #[test]
    fn serializes_like_serde_json() {
        let mut object = Object::new();
        object.insert("n".into(), Value::Float(1.5));
        object.insert("l".into(), Value::Array(vec![Value::Int(-2), Value::Null]));
        let v = Value::Object(object);
        assert_eq!(
            serde_json::to_string(&v).unwrap(),
            r#"{"n":1.5,"l":[-2,null]}"#
        );
    }
}
