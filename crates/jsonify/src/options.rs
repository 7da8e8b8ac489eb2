//! Builder configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Options recognized by [`Builder`](crate::Builder). All default to `false`.
///
/// Options can be chained:
///
/// ```
/// use jsonify::BuilderOptions;
/// let opts = BuilderOptions::default().pretty(true).verify(true);
/// assert!(opts.pretty && opts.verify);
/// ```
///
/// or loaded from JSON, where missing fields keep their defaults:
///
/// ```
/// use jsonify::BuilderOptions;
/// let opts = BuilderOptions::from_json(r#"{"pretty": true}"#).unwrap();
/// assert!(opts.pretty && !opts.verify);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderOptions {
    /// Parse the compiled text back and fail if it is not valid JSON.
    /// Doubles the cost of `compile`; meant for development.
    pub verify: bool,

    /// Emit indented output (two spaces per level, one entry per line).
    pub pretty: bool,

    /// When an iterate-and-collect scope produces exactly one element, store
    /// that element instead of a one-element array. Off by default: the
    /// standard dialect never unwraps.
    pub unwrap_single_item: bool,
}

impl BuilderOptions {
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn unwrap_single_item(mut self, unwrap: bool) -> Self {
        self.unwrap_single_item = unwrap;
        self
    }

    /// Load options from a JSON object such as `{"verify": true}`.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
