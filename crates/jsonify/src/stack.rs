//! The scope stack behind [`Builder`](crate::Builder).
//!
//! A document under construction is a root slot plus a vector of frames, one
//! per open nesting level. Each frame was opened by a keyed scope
//! (`"key": { ... }`) or an anonymous one (a bare `[...]`/`{...}` handed back
//! to the caller). Keyed frames opened with `open_keyed_array` are marked as
//! such, since only they may collapse a single-element array.
//!
//! The root and each frame own at most one slot value. Writes always target
//! the top frame ("current"), and an empty slot takes its shape from the first write:
//! a keyed store makes it an object, an append makes it an array. Explicit
//! opens may fix the shape up front.
//!
//! Closing a frame moves its slot out: a keyed frame becomes a pair added to
//! the parent, an anonymous frame is returned to the caller. Children never
//! hold references to their parents, so there is nothing to unlink.
//!
//! Every operation validates before it mutates; a failed call leaves the
//! stack exactly as it found it.

use tracing::trace;

use crate::error::{BuildError, Result};
use crate::value::{ContainerKind, Pair, Value};

#[derive(Debug, Clone, PartialEq)]
enum Origin {
    /// Opened under a key; closes into a pair on the parent.
    Keyed(String),
    /// Opened under a key as an array collecting items; closes like `Keyed`
    /// but is the only origin [`ScopeStack::collapse_singleton`] touches.
    KeyedArray(String),
    /// Opened without a key; closes into a value returned to the caller.
    Anonymous,
}

#[derive(Debug, Clone, PartialEq)]
struct Frame {
    origin: Origin,
    slot: Option<Value>,
}

/// Stack of open scopes over one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeStack {
    root: Option<Value>,
    nested: Vec<Frame>,
}

impl ScopeStack {
    /// An empty stack at the document root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all content and open scopes.
    pub fn reset(&mut self) {
        self.root = None;
        self.nested.clear();
    }

    /// Current nesting depth; 0 at the document root.
    pub fn level(&self) -> usize {
        self.nested.len()
    }

    /// The document root, or `None` if nothing was written yet.
    pub fn root(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    /// Consume the stack and return the root. Scopes still open are
    /// discarded without being spliced in.
    pub fn into_root(self) -> Option<Value> {
        self.root
    }

    /// The value held by the current scope, if any.
    pub fn current(&self) -> Option<&Value> {
        match self.nested.last() {
            Some(frame) => frame.slot.as_ref(),
            None => self.root.as_ref(),
        }
    }

    fn current_slot_mut(&mut self) -> &mut Option<Value> {
        match self.nested.last_mut() {
            Some(frame) => &mut frame.slot,
            None => &mut self.root,
        }
    }

    /// Add `key: value` to the current scope, creating it as an object if it
    /// is empty. A duplicate key keeps its position and takes the new value.
    /// In an array scope the pair is appended as a single-entry object.
    pub fn store(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
        let pair = Pair::new(key, value);
        trace!(level = self.level(), key = %pair.key, "store");
        add_pair(self.current_slot_mut(), pair)
    }

    /// Append `value` to the current scope, creating it as an array if it is
    /// empty. Fails with [`BuildError::Type`] if the scope already holds an
    /// object or a scalar.
    pub fn append(&mut self, value: Value) -> Result<()> {
        let level = self.level();
        let slot = self.current_slot_mut();
        match slot {
            None => {
                *slot = Some(Value::Array(vec![value.into_element()]));
            }
            Some(Value::Array(items)) => items.push(value.into_element()),
            Some(other) => {
                return Err(BuildError::Type(format!(
                    "cannot append an array item to a scope holding a {}",
                    other.kind()
                )));
            }
        }
        trace!(level, "append");
        Ok(())
    }

    /// Open a scope whose content becomes the value of `key` in the current
    /// scope once closed.
    pub fn open_keyed(&mut self, key: impl Into<String>) -> Result<()> {
        self.open(Origin::Keyed(key.into()), None)
    }

    /// Like [`open_keyed`](Self::open_keyed), but the new scope is an array
    /// from the start, so it closes as `[]` even if nothing is appended.
    pub fn open_keyed_array(&mut self, key: impl Into<String>) -> Result<()> {
        self.open(Origin::KeyedArray(key.into()), Some(Value::array()))
    }

    /// Open a scope of a fixed shape whose content is handed back by
    /// [`close_anonymous`](Self::close_anonymous) instead of being attached.
    pub fn open_anonymous(&mut self, kind: ContainerKind) {
        trace!(level = self.level() + 1, ?kind, "open anonymous scope");
        self.nested.push(Frame {
            origin: Origin::Anonymous,
            slot: Some(kind.empty()),
        });
    }

    fn open(&mut self, origin: Origin, slot: Option<Value>) -> Result<()> {
        if let Some(current) = self.current() {
            if !current.is_object() && !current.is_array() {
                return Err(BuildError::Type(format!(
                    "cannot open a keyed scope inside a {}",
                    current.kind()
                )));
            }
        }
        if let Origin::Keyed(key) | Origin::KeyedArray(key) = &origin {
            trace!(level = self.level() + 1, key = %key, "open keyed scope");
        }
        self.nested.push(Frame { origin, slot });
        Ok(())
    }

    /// Close the innermost scope, which must be keyed. Its content (or
    /// `null` if it stayed empty) is added to the parent as a pair.
    pub fn close_keyed(&mut self) -> Result<()> {
        let frame = self.pop_frame()?;
        let key = match frame.origin {
            Origin::Keyed(key) | Origin::KeyedArray(key) => key,
            Origin::Anonymous => {
                self.nested.push(Frame {
                    origin: Origin::Anonymous,
                    slot: frame.slot,
                });
                return Err(BuildError::Argument(
                    "innermost open scope is anonymous; close it with close_anonymous".into(),
                ));
            }
        };
        trace!(level = self.level() + 1, key = %key, "close keyed scope");
        let value = frame.slot.unwrap_or(Value::Null);
        add_pair(self.current_slot_mut(), Pair::new(key, value))
    }

    /// Close the innermost scope, which must be anonymous, and return its
    /// container.
    pub fn close_anonymous(&mut self) -> Result<Value> {
        let frame = self.pop_frame()?;
        match frame.origin {
            Origin::Anonymous => {
                trace!(level = self.level() + 1, "close anonymous scope");
                Ok(frame.slot.unwrap_or(Value::Null))
            }
            origin @ (Origin::Keyed(_) | Origin::KeyedArray(_)) => {
                self.nested.push(Frame {
                    origin,
                    slot: frame.slot,
                });
                Err(BuildError::Argument(
                    "innermost open scope is keyed; close it with close_keyed".into(),
                ))
            }
        }
    }

    /// Pop the innermost scope and discard its content. The parent is left
    /// untouched. Returns `false` at the root, where there is nothing to pop.
    pub fn abandon(&mut self) -> bool {
        let popped = self.nested.pop().is_some();
        if popped {
            trace!(level = self.level() + 1, "abandon scope");
        }
        popped
    }

    /// If the innermost scope was opened with
    /// [`open_keyed_array`](Self::open_keyed_array) and holds exactly one
    /// element, replace the array by that element. Any other scope, and the
    /// root, is left alone.
    pub fn collapse_singleton(&mut self) {
        let Some(frame) = self.nested.last_mut() else {
            return;
        };
        if !matches!(frame.origin, Origin::KeyedArray(_)) {
            return;
        }
        if let Some(Value::Array(items)) = &mut frame.slot {
            if items.len() == 1 {
                let only = items.pop();
                frame.slot = only;
            }
        }
    }

    /// Compose an already-parsed tree into the current scope:
    ///
    /// - empty scope: `value` becomes its content (a pair becomes a
    ///   single-entry object)
    /// - object scope: an object is merged in, incoming keys overwriting in
    ///   place; a pair is added like a keyed store
    /// - array scope: `value` is appended as one element
    ///
    /// Merging anything but an object or a pair into an object, or ingesting
    /// into a scalar, fails with [`BuildError::Argument`].
    pub fn ingest(&mut self, value: Value) -> Result<()> {
        trace!(level = self.level(), incoming = value.kind(), "ingest");
        let slot = self.current_slot_mut();
        match slot {
            None => *slot = Some(value.into_element()),
            Some(Value::Array(items)) => items.push(value.into_element()),
            Some(target) if target.is_object() => match value {
                pair @ Value::Pair(_) => target.add(pair)?,
                other => target.merge(other)?,
            },
            Some(other) => {
                return Err(BuildError::Argument(format!(
                    "cannot ingest into a scope holding a {}",
                    other.kind()
                )));
            }
        }
        Ok(())
    }

    fn pop_frame(&mut self) -> Result<Frame> {
        self.nested
            .pop()
            .ok_or_else(|| BuildError::Argument("no nested scope is open".into()))
    }
}

/// Add `pair` to `slot`, creating an object when the slot is empty.
fn add_pair(slot: &mut Option<Value>, pair: Pair) -> Result<()> {
    match slot {
        Some(container) => container.add(Value::from(pair)),
        None => {
            let mut object = Value::object();
            object.add(Value::from(pair))?;
            *slot = Some(object);
            Ok(())
        }
    }
}
