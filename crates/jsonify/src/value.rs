//! The document tree.
//!
//! `Value` mirrors JSON's types but keeps two builder-specific variants:
//! [`Pair`], the unit an object is built from, and `Raw`, a pre-encoded
//! fragment emitted verbatim. Objects use `IndexMap` so keys keep their
//! first-insertion position even when a later write replaces the value.

use std::fmt;

use indexmap::IndexMap;
use serde_json::Number;

use crate::error::{BuildError, Result};
use crate::serializer;

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    /// Integers and floats stay distinct: `1` and `1.0` render as written.
    Number(Number),
    String(String),
    Array(Vec<Value>),
    /// Key-value pairs in first-insertion order.
    Object(IndexMap<String, Value>),
    /// A key-value pair waiting to be placed into a container.
    Pair(Box<Pair>),
    /// Pre-encoded JSON text, written out without validation.
    Raw(String),
}

/// A single `"key": value` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub key: String,
    pub value: Value,
}

impl Pair {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into().into_element(),
        }
    }
}

/// The two container shapes a scope can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Object,
    Array,
}

impl ContainerKind {
    /// An empty container of this kind.
    pub fn empty(self) -> Value {
        match self {
            ContainerKind::Object => Value::Object(IndexMap::new()),
            ContainerKind::Array => Value::Array(Vec::new()),
        }
    }
}

impl Value {
    /// An empty object.
    pub fn object() -> Self {
        Value::Object(IndexMap::new())
    }

    /// An empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// Wrap pre-encoded JSON text. The fragment is trusted as-is; enable
    /// `verify` on the builder to catch malformed fragments at compile time.
    pub fn raw(json: impl Into<String>) -> Self {
        Value::Raw(json.into())
    }

    /// Human-readable name of the variant, used in error messages and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Pair(_) => "pair",
            Value::Raw(_) => "raw fragment",
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a key of an object. Returns `None` for every other variant.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Number of entries of a container, `None` for scalars.
    pub fn container_len(&self) -> Option<usize> {
        match self {
            Value::Array(items) => Some(items.len()),
            Value::Object(map) => Some(map.len()),
            _ => None,
        }
    }

    /// Prepare a node for a position that cannot hold a bare pair (an array
    /// element or an object entry value): a `Pair` becomes a single-entry
    /// object, everything else passes through.
    pub fn into_element(self) -> Value {
        match self {
            Value::Pair(pair) => {
                let mut map = IndexMap::with_capacity(1);
                map.insert(pair.key, pair.value.into_element());
                Value::Object(map)
            }
            other => other,
        }
    }

    /// Add `item` to this container.
    ///
    /// - `Array`: appends; a `Pair` is first wrapped in a single-entry object,
    ///   so arrays never hold bare pairs.
    /// - `Object`: `item` must be a `Pair`. A duplicate key replaces the
    ///   existing value but keeps its original position.
    ///
    /// Any other combination fails with [`BuildError::Type`] and leaves `self`
    /// unchanged.
    pub fn add(&mut self, item: Value) -> Result<()> {
        match self {
            Value::Array(items) => {
                items.push(item.into_element());
                Ok(())
            }
            Value::Object(map) => match item {
                Value::Pair(pair) => {
                    map.insert(pair.key, pair.value.into_element());
                    Ok(())
                }
                other => Err(BuildError::Type(format!(
                    "cannot add a {} to an object; objects only accept key-value pairs",
                    other.kind()
                ))),
            },
            scalar => Err(BuildError::Type(format!(
                "cannot add a {} to a {}",
                item.kind(),
                scalar.kind()
            ))),
        }
    }

    /// Merge the entries of `other` into this object, pair by pair.
    ///
    /// Incoming keys overwrite same-named entries in place; new keys are
    /// appended. Both sides must be objects.
    pub fn merge(&mut self, other: Value) -> Result<()> {
        match (self, other) {
            (Value::Object(map), Value::Object(incoming)) => {
                for (key, value) in incoming {
                    map.insert(key, value);
                }
                Ok(())
            }
            (Value::Object(_), other) => Err(BuildError::Argument(format!(
                "cannot merge {} into object",
                other.kind()
            ))),
            (target, _) => Err(BuildError::Argument(format!(
                "cannot merge into a {}",
                target.kind()
            ))),
        }
    }

    /// Compact JSON text of this node.
    pub fn to_json(&self) -> String {
        let mut out = String::new();
        serializer::write_compact(self, &mut out);
        out
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}
