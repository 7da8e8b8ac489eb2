//! Text → [`Value`], backed by `serde_json`.
//!
//! The workspace enables serde_json's `preserve_order` feature, so object
//! keys come back in document order and ingest/pretty keep the layout the
//! builder produced.

use crate::error::Result;
use crate::value::Value;

/// Parse JSON text into a document tree.
///
/// Accepts any JSON value at top level (object, array, or scalar).
pub fn parse(text: &str) -> Result<Value> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    Ok(Value::from(value))
}
