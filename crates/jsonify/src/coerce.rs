//! Conversions from host values into [`Value`].
//!
//! Every mutation entry point of the builder takes `impl Into<Value>`, so
//! these impls decide what a raw value becomes. The rules are total:
//!
//! | host value                                   | becomes            |
//! |----------------------------------------------|--------------------|
//! | `Value`                                      | itself             |
//! | `&str`, `String`, `char`, `Cow<str>`         | `String`           |
//! | integers, `f32`, `f64`                       | `Number`           |
//! | non-finite floats                            | `Null`             |
//! | `bool`                                       | `Bool`             |
//! | `()`, `None`                                 | `Null`             |
//! | `Vec<T>`, `&[T]`, `[T; N]`                   | `Array`            |
//! | `IndexMap`, `BTreeMap`, collected pairs      | `Object`           |
//! | `Pair`, `(K, V)`                             | `Pair`             |
//! | `serde_json::Value`                          | equivalent tree    |
//!
//! Anything else can go through [`Value::display`], which keeps the lenient
//! "use its text" fallback explicit at the call site.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Display;

use indexmap::IndexMap;
use serde_json::Number;

use crate::value::{Pair, Value};

/// Collects coerced elements into an array, wrapping any bare pair into a
/// single-entry object on the way in.
trait CollectArray: Iterator<Item = Value> + Sized {
    fn collect_array(self) -> Value {
        Value::Array(self.map(Value::into_element).collect())
    }
}

impl<I: Iterator<Item = Value>> CollectArray for I {}

impl Value {
    /// Coerce any displayable value into a string node.
    ///
    /// ```
    /// use jsonify::Value;
    /// let addr: std::net::Ipv4Addr = "10.0.0.1".parse().unwrap();
    /// assert_eq!(Value::display(&addr).to_json(), r#""10.0.0.1""#);
    /// ```
    pub fn display(value: &impl Display) -> Self {
        Value::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(s: Cow<'_, str>) -> Self {
        Value::String(s.into_owned())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::String(c.to_string())
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Value {
    /// NaN and the infinities have no JSON literal and become `null`.
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(Value::Null, Value::Number)
    }
}

impl From<f32> for Value {
    /// Goes through the shortest decimal form so `0.1f32` renders as `0.1`
    /// rather than its widened binary expansion.
    fn from(f: f32) -> Self {
        f.to_string()
            .parse::<f64>()
            .map_or(Value::Null, Value::from)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().map(Into::into).collect_array()
    }
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        items.iter().cloned().map(Into::into).collect_array()
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        items.into_iter().map(Into::into).collect_array()
    }
}

impl<K: Into<String>, V: Into<Value>> From<IndexMap<K, V>> for Value {
    fn from(map: IndexMap<K, V>) -> Self {
        Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.into(), v.into().into_element()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(map: BTreeMap<K, V>) -> Self {
        Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.into(), v.into().into_element()))
                .collect(),
        )
    }
}

impl FromIterator<Pair> for Value {
    /// Collect pairs into an object; later duplicates overwrite in place.
    fn from_iter<I: IntoIterator<Item = Pair>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|p| (p.key, p.value.into_element()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    /// Collect `(key, value)` couples into an object.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter().map(Pair::from).collect()
    }
}

impl From<Pair> for Value {
    fn from(pair: Pair) -> Self {
        Value::Pair(Box::new(pair))
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Pair {
    fn from((key, value): (K, V)) -> Self {
        Pair::new(key, value)
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Value {
    fn from(couple: (K, V)) -> Self {
        Value::Pair(Box::new(couple.into()))
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}
