//! Compact and pretty JSON text renderings of a [`Value`] tree.
//!
//! The compact writer walks the tree itself so that pairs and raw fragments
//! can be emitted; string escaping is delegated to `serde_json`. Pretty
//! output is produced by `serde_json::to_string_pretty` on the re-parsed
//! compact text.
//!
//! Numbers are written with the literal form they were built with; `1.0` is
//! never shortened to `1`.
//!
//! [`compile`] is the full pipeline used by the builder: compact render, then
//! an optional re-parse (verify and/or pretty).

use tracing::debug;

use crate::error::Result;
use crate::options::BuilderOptions;
use crate::value::Value;

/// Text produced for a document with no content.
pub const EMPTY_DOCUMENT: &str = "{}";

/// Render the document rooted at `root` according to `options`.
///
/// - No root → `{}`.
/// - `verify`: the compact text is parsed back; a failure is returned as
///   [`BuildError::Parse`](crate::BuildError::Parse) with the parser's cause.
/// - `pretty`: the compact text is parsed back and re-rendered by
///   `serde_json::to_string_pretty` (two-space indentation, `"key": value`,
///   empty containers as `{}`/`[]`).
///
/// Never mutates the tree.
pub fn compile(root: Option<&Value>, options: &BuilderOptions) -> Result<String> {
    let compact = match root {
        Some(value) => value.to_json(),
        None => EMPTY_DOCUMENT.to_string(),
    };

    if !options.verify && !options.pretty {
        debug!(bytes = compact.len(), "compiled compact document");
        return Ok(compact);
    }

    let reparsed: serde_json::Value = serde_json::from_str(&compact)?;
    if options.pretty {
        let pretty = serde_json::to_string_pretty(&reparsed)?;
        debug!(bytes = pretty.len(), verified = options.verify, "compiled pretty document");
        Ok(pretty)
    } else {
        debug!(bytes = compact.len(), "compiled and verified document");
        Ok(compact)
    }
}

/// Append the compact rendering of `value` to `out`: no whitespace,
/// comma-joined entries, object keys in insertion order.
pub fn write_compact(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_string(s, out),
        Value::Raw(json) => out.push_str(json),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_compact(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, val)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_compact(val, out);
            }
            out.push('}');
        }
        // Only reachable when a lone pair is rendered directly; containers
        // and the scope stack wrap pairs before they are stored.
        Value::Pair(pair) => {
            write_string(&pair.key, out);
            out.push(':');
            write_compact(&pair.value, out);
        }
    }
}

/// Append `s` as a quoted, escaped JSON string, using serde_json's escaping:
/// `\"`, `\\`, the short control escapes and `\u00xx` for the rest below
/// `0x20`. Non-ASCII text is written as-is.
pub fn write_string(s: &str, out: &mut String) {
    out.push_str(&serde_json::Value::from(s).to_string());
}
