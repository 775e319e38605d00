//! Folds a linear event stream into a [`Value`] tree.
//!
//! The builder keeps two stacks and a root slot:
//!
//! - the open-container stack, one frame per array or object between its
//!   start and end events, innermost last;
//! - the pending-key stack, keys that have been seen but not yet paired with
//!   a value;
//! - the root slot, filled once when the outermost value completes.
//!
//! Containers are pushed on their start event and only placed into their
//! parent when the matching end event arrives, so nesting depth costs one
//! frame and every event is O(1).
use bstr::BString;
use log::trace;

use crate::{
    error::DecodeError,
    event::{ContainerKind, EventHandler},
    value::{Array, Object, Value},
};

/// One open container.
#[derive(Debug)]
enum Frame {
    Array(Array),
    Object {
        object: Object,
        /// Pending-key stack depth when this object was opened. Keys above
        /// the floor belong to this object.
        key_floor: usize,
    },
}

impl Frame {
    fn kind(&self) -> ContainerKind {
        match self {
            Frame::Array(_) => ContainerKind::Array,
            Frame::Object { .. } => ContainerKind::Object,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Frame::Array(array) => Value::Array(array),
            Frame::Object { object, .. } => Value::Object(object),
        }
    }
}

/// The stack machine that turns events into a tree.
///
/// `TreeBuilder` implements [`EventHandler`], so any
/// [`EventSource`](crate::EventSource) can drive it. Everything it has built
/// so far is owned by its stacks; dropping it mid-document frees the partial
/// tree.
///
/// # Examples
///
/// ```
/// use jsonfold::{EventHandler, TreeBuilder, Value};
///
/// let mut builder = TreeBuilder::new();
/// builder.start_array().unwrap();
/// builder.integer(1).unwrap();
/// builder.end_array().unwrap();
/// assert_eq!(builder.take_root(), Some(Value::Array(vec![Value::Int(1)])));
/// ```
#[derive(Debug, Default)]
pub struct TreeBuilder {
    frames: Vec<Frame>,
    keys: Vec<BString>,
    root: Option<Value>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops any partial tree and returns to the initial state.
    pub fn reset(&mut self) {
        self.frames.clear();
        self.keys.clear();
        self.root = None;
    }

    /// Number of containers currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Number of keys waiting for their value.
    #[must_use]
    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    /// `true` when no container is open and no key is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.frames.is_empty() && self.keys.is_empty()
    }

    /// The completed root value, if any.
    #[must_use]
    pub fn root(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    /// Moves the completed root value out of the builder.
    pub fn take_root(&mut self) -> Option<Value> {
        self.root.take()
    }

    /// Attaches a finished value to the innermost open container, or makes it
    /// the root when nothing is open.
    fn place(&mut self, value: Value) -> Result<(), DecodeError> {
        trace!("placing {} at depth {}", value.kind(), self.frames.len());
        let result = match self.frames.last_mut() {
            None => {
                if self.root.is_some() {
                    return Err(DecodeError::InvariantViolation("root value already set"));
                }
                self.root = Some(value);
                Ok(())
            }
            Some(Frame::Array(array)) => {
                array.push(value);
                Ok(())
            }
            Some(Frame::Object { object, key_floor }) => {
                if self.keys.len() <= *key_floor {
                    return Err(DecodeError::MissingKey);
                }
                // Exactly one key sits above the floor here.
                let key = self.keys.swap_remove(*key_floor);
                // Duplicate keys keep their first position and take the last value.
                object.insert(key, value);
                Ok(())
            }
        };
        self.check_invariants();
        result
    }

    fn open(&mut self, frame: Frame) -> Result<(), DecodeError> {
        if self.frames.is_empty() && self.root.is_some() {
            return Err(DecodeError::InvariantViolation("root value already set"));
        }
        self.frames.push(frame);
        self.check_invariants();
        Ok(())
    }

    fn close(&mut self, kind: ContainerKind) -> Result<(), DecodeError> {
        match self.frames.last() {
            Some(frame) if frame.kind() == kind => {}
            _ => return Err(DecodeError::Unbalanced(kind)),
        }
        if let Some(Frame::Object { key_floor, .. }) = self.frames.last() {
            if self.keys.len() > *key_floor {
                return Err(DecodeError::InvariantViolation(
                    "object closed while a key awaits its value",
                ));
            }
        }
        let Some(frame) = self.frames.pop() else {
            return Err(DecodeError::Unbalanced(kind));
        };
        self.place(frame.into_value())
    }

    #[cfg(feature = "fuzzing")]
    fn check_invariants(&self) {
        let mut floor = 0;
        for frame in &self.frames {
            if let Frame::Object { key_floor, .. } = frame {
                assert!(*key_floor >= floor, "key floors must not decrease");
                floor = *key_floor;
            }
        }
        let objects = self
            .frames
            .iter()
            .filter(|frame| matches!(frame, Frame::Object { .. }))
            .count();
        assert!(
            self.keys.len() <= objects,
            "more pending keys ({}) than open objects ({objects})",
            self.keys.len()
        );
        assert!(
            self.frames.is_empty() || self.root.is_none(),
            "root set while containers are open"
        );
    }

    #[cfg(not(feature = "fuzzing"))]
    #[inline]
    #[allow(clippy::unused_self)]
    fn check_invariants(&self) {}
}

impl EventHandler for TreeBuilder {
    type Error = DecodeError;

    fn null(&mut self) -> Result<(), DecodeError> {
        self.place(Value::Null)
    }

    fn boolean(&mut self, value: bool) -> Result<(), DecodeError> {
        self.place(Value::Bool(value))
    }

    fn integer(&mut self, value: i64) -> Result<(), DecodeError> {
        self.place(Value::Int(value))
    }

    fn double(&mut self, value: f64) -> Result<(), DecodeError> {
        self.place(Value::Float(value))
    }

    fn raw_number(&mut self, text: &str) -> Result<(), DecodeError> {
        let value = text.parse::<f64>().map_err(|_| DecodeError::NumberFormat {
            text: text.to_owned(),
        })?;
        self.place(Value::Float(value))
    }

    fn string(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        self.place(Value::String(BString::from(bytes)))
    }

    fn start_object(&mut self) -> Result<(), DecodeError> {
        let key_floor = self.keys.len();
        self.open(Frame::Object {
            object: Object::new(),
            key_floor,
        })
    }

    fn key(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        match self.frames.last() {
            Some(Frame::Object { key_floor, .. }) if self.keys.len() == *key_floor => {
                self.keys.push(BString::from(bytes));
                self.check_invariants();
                Ok(())
            }
            _ => Err(DecodeError::KeyContext),
        }
    }

    fn end_object(&mut self) -> Result<(), DecodeError> {
        self.close(ContainerKind::Object)
    }

    fn start_array(&mut self) -> Result<(), DecodeError> {
        self.open(Frame::Array(Array::new()))
    }

    fn end_array(&mut self) -> Result<(), DecodeError> {
        self.close(ContainerKind::Array)
    }
}
