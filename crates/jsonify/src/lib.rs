//! # jsonify
//!
//! Incremental builder for JSON documents.
//!
//! A [`Builder`] keeps a stack of open scopes. Keyed stores, array appends
//! and nested scopes are issued in any order the caller likes, and the stack
//! assembles them into one well-formed tree that compiles to strict JSON
//! text, compact or pretty.
//!
//! ## Quick start
//!
//! ```rust
//! use jsonify::{Builder, BuilderOptions};
//!
//! let mut json = Builder::new();
//! json.nest("foo", |json| {
//!     json.nest("bar", |json| {
//!         json.store("baz", "goo")?;
//!         Ok(())
//!     })?;
//!     Ok(())
//! })?;
//! assert_eq!(json.compile()?, r#"{"foo":{"bar":{"baz":"goo"}}}"#);
//!
//! // Pre-built JSON can be merged into whatever scope is open.
//! json.ingest(r#"{"extra":[1,2]}"#)?;
//! assert_eq!(json.compile()?, r#"{"foo":{"bar":{"baz":"goo"}},"extra":[1,2]}"#);
//!
//! let pretty = Builder::compile_with(BuilderOptions::default().pretty(true), |json| {
//!     json.store("hello", "world")?;
//!     Ok(())
//! })?;
//! assert_eq!(pretty, "{\n  \"hello\": \"world\"\n}");
//! # Ok::<(), jsonify::BuildError>(())
//! ```
//!
//! ## Modules
//!
//! - [`value`]: the `Value` tree and its container operations
//! - [`coerce`]: conversions from Rust values into `Value`
//! - [`stack`]: the scope stack the builder runs on
//! - [`builder`]: the closure-scoped `Builder` session
//! - [`serializer`]: compact/pretty rendering and the compile pipeline
//! - [`parse`]: JSON text to `Value`
//! - [`options`]: `BuilderOptions`
//! - [`error`]: error types

pub mod builder;
pub mod coerce;
pub mod error;
pub mod options;
pub mod parse;
pub mod serializer;
pub mod stack;
pub mod value;

pub use builder::Builder;
pub use error::{BuildError, Result};
pub use options::BuilderOptions;
pub use parse::parse;
pub use stack::ScopeStack;
pub use value::{ContainerKind, Pair, Value};
