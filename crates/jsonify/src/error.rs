//! Error types for document building and compilation.

use thiserror::Error;

/// Errors raised while building or compiling a document.
///
/// Every variant is raised at the point of detection, before the builder's
/// state is touched, so a failed operation leaves the document as it was.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The current container's shape conflicts with the requested operation,
    /// e.g. appending an array item to a slot that already holds an object.
    #[error("type error: {0}")]
    Type(String),

    /// A caller-supplied composition is structurally invalid, e.g. merging an
    /// array into an object during ingest, or closing a scope that is not open.
    #[error("argument error: {0}")]
    Argument(String),

    /// Text could not be parsed as JSON: ingest input, option text, or the
    /// compiled output when verification is enabled.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience alias used throughout jsonify.
pub type Result<T> = std::result::Result<T, BuildError>;
