//! The document-building session.
//!
//! [`Builder`] wraps a [`ScopeStack`] with closure-scoped operations, so
//! every scope a caller opens is closed again on the way out, including when
//! the body fails.
//!
//! ```
//! use jsonify::Builder;
//!
//! let mut json = Builder::new();
//! json.nest("person", |json| {
//!     json.store("first_name", "George")?;
//!     json.store("last_name", "Burdell")?;
//!     Ok(())
//! })?;
//! json.nest_each("links", ["self", "school"], |rel| ("rel", rel))?;
//!
//! assert_eq!(
//!     json.compile()?,
//!     r#"{"person":{"first_name":"George","last_name":"Burdell"},"links":[{"rel":"self"},{"rel":"school"}]}"#
//! );
//! # Ok::<(), jsonify::BuildError>(())
//! ```

use tracing::debug;

use crate::error::Result;
use crate::options::BuilderOptions;
use crate::parse;
use crate::serializer;
use crate::stack::ScopeStack;
use crate::value::{ContainerKind, Value};

/// Incrementally builds one JSON document.
///
/// Content is added with keyed stores, array appends and nested scopes;
/// [`compile`](Self::compile) renders the result without modifying it and may
/// be called any number of times. A builder with no content compiles to `{}`.
///
/// A builder is a single-writer object: use one per thread, or synchronize
/// externally.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    stack: ScopeStack,
    options: BuilderOptions,
}

impl Builder {
    /// A builder with default options (compact, unverified).
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder that compiles according to `options`.
    pub fn with_options(options: BuilderOptions) -> Self {
        Self {
            stack: ScopeStack::new(),
            options,
        }
    }

    /// The options this builder compiles with.
    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Build and compile a document in one call.
    ///
    /// ```
    /// use jsonify::{Builder, BuilderOptions};
    ///
    /// let text = Builder::compile_with(BuilderOptions::default(), |json| {
    ///     json.store("hello", "world")?;
    ///     Ok(())
    /// })?;
    /// assert_eq!(text, r#"{"hello":"world"}"#);
    /// # Ok::<(), jsonify::BuildError>(())
    /// ```
    pub fn compile_with<F>(options: BuilderOptions, build: F) -> Result<String>
    where
        F: FnOnce(&mut Builder) -> Result<()>,
    {
        let mut builder = Builder::with_options(options);
        build(&mut builder)?;
        builder.compile()
    }

    /// Discard all content; the builder compiles to `{}` again.
    pub fn reset(&mut self) -> &mut Self {
        debug!("reset builder");
        self.stack.reset();
        self
    }

    /// Current nesting depth; 0 outside of any scope.
    pub fn level(&self) -> usize {
        self.stack.level()
    }

    /// The document root, or `None` if nothing was added yet.
    pub fn root(&self) -> Option<&Value> {
        self.stack.root()
    }

    /// Consume the builder and return the document tree. Scopes still open
    /// are dropped.
    pub fn into_root(self) -> Option<Value> {
        self.stack.into_root()
    }

    /// Store `key: value` in the current scope.
    ///
    /// The current scope becomes an object if it is empty. Storing a key that
    /// already exists replaces its value but keeps its original position.
    pub fn store(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<&mut Self> {
        self.stack.store(key, value.into())?;
        Ok(self)
    }

    /// Store `key` with a value derived from an argument list, the entry point
    /// for adapters that turn arbitrary method calls into keys:
    ///
    /// - no arguments → `null`
    /// - one argument → that argument
    /// - two or more → an array of the arguments
    ///
    /// ```
    /// use jsonify::{Builder, Value};
    ///
    /// let mut json = Builder::new();
    /// json.tag("none", Vec::<Value>::new())?;
    /// json.tag("one", [1])?;
    /// json.tag("many", [1, 2])?;
    /// assert_eq!(json.compile()?, r#"{"none":null,"one":1,"many":[1,2]}"#);
    /// # Ok::<(), jsonify::BuildError>(())
    /// ```
    pub fn tag<I, V>(&mut self, key: impl Into<String>, args: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut args: Vec<Value> = args.into_iter().map(Into::into).collect();
        let value = match args.len() {
            0 => Value::Null,
            1 => args.pop().unwrap_or(Value::Null),
            _ => Value::from(args),
        };
        self.store(key, value)
    }

    /// Open a scope under `key`, run `body` in it, and store whatever the
    /// body built as the value of `key`. A body that adds nothing stores
    /// `null`.
    ///
    /// If `body` fails, the scope is discarded and the builder is left as it
    /// was before the call.
    pub fn nest<F>(&mut self, key: impl Into<String>, body: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.stack.open_keyed(key)?;
        self.run_scope(body)?;
        self.stack.close_keyed()?;
        Ok(self)
    }

    /// Store under `key` an array made by mapping every element of `items`
    /// through `transform`.
    ///
    /// An empty `items` stores `[]`. With
    /// [`unwrap_single_item`](BuilderOptions::unwrap_single_item) set, a
    /// single resulting element is stored on its own instead of as a
    /// one-element array.
    pub fn nest_each<I, F, V>(
        &mut self,
        key: impl Into<String>,
        items: I,
        mut transform: F,
    ) -> Result<&mut Self>
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> V,
        V: Into<Value>,
    {
        self.stack.open_keyed_array(key)?;
        for item in items {
            if let Err(err) = self.stack.append(transform(item).into()) {
                self.stack.abandon();
                return Err(err);
            }
        }
        if self.options.unwrap_single_item {
            self.stack.collapse_singleton();
        }
        self.stack.close_keyed()?;
        Ok(self)
    }

    /// Append `value` to the current scope, which becomes an array if it is
    /// empty. At top level this makes the document itself an array.
    ///
    /// Fails with [`BuildError::Type`](crate::BuildError::Type) if the current
    /// scope already holds an object.
    pub fn append(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
        self.stack.append(value.into())?;
        Ok(self)
    }

    /// Append every element of `values`, in order.
    pub fn append_all<I, V>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        for value in values {
            self.stack.append(value.into())?;
        }
        Ok(self)
    }

    /// Build an array in a scope of its own and return it, without attaching
    /// it anywhere. Use it to nest array literals:
    ///
    /// ```
    /// use jsonify::Builder;
    ///
    /// let mut json = Builder::new();
    /// let pair = json.array(|json| {
    ///     json.append(1)?.append(2)?;
    ///     Ok(())
    /// })?;
    /// json.append(pair)?.append(3)?;
    /// assert_eq!(json.compile()?, "[[1,2],3]");
    /// # Ok::<(), jsonify::BuildError>(())
    /// ```
    pub fn array<F>(&mut self, body: F) -> Result<Value>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.anonymous(ContainerKind::Array, body)
    }

    /// Build an object in a scope of its own and return it, without attaching
    /// it anywhere.
    pub fn object<F>(&mut self, body: F) -> Result<Value>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.anonymous(ContainerKind::Object, body)
    }

    fn anonymous<F>(&mut self, kind: ContainerKind, body: F) -> Result<Value>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.stack.open_anonymous(kind);
        self.run_scope(body)?;
        self.stack.close_anonymous()
    }

    /// Run `body` inside the scope just opened. On failure every scope opened
    /// from here on is discarded before the error is returned.
    fn run_scope<F>(&mut self, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let depth = self.stack.level();
        let outcome = body(self);
        if outcome.is_err() {
            while self.stack.level() >= depth && self.stack.abandon() {}
        }
        outcome
    }

    /// Parse `text` as JSON and compose it into the current scope:
    ///
    /// - empty scope: the parsed document replaces it
    /// - object scope: a parsed object is merged in (incoming keys win, in
    ///   place); anything else fails with
    ///   [`BuildError::Argument`](crate::BuildError::Argument)
    /// - array scope: the parsed document is appended as one element
    ///
    /// Empty or whitespace-only text is a no-op.
    pub fn ingest(&mut self, text: &str) -> Result<&mut Self> {
        if text.trim().is_empty() {
            return Ok(self);
        }
        let value = parse::parse(text)?;
        debug!(bytes = text.len(), shape = value.kind(), "ingest document");
        self.stack.ingest(value)?;
        Ok(self)
    }

    /// [`ingest`](Self::ingest) for a tree that is already parsed. A pair is
    /// placed like a keyed store: into an empty scope it becomes a
    /// single-entry object, into an object it adds (or replaces) one key.
    pub fn ingest_value(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
        self.stack.ingest(value.into())?;
        Ok(self)
    }

    /// Render the document. Never modifies the builder.
    ///
    /// With `verify` set the output is parsed back and a failure is returned
    /// as [`BuildError::Parse`](crate::BuildError::Parse); with `pretty` set
    /// the output is indented.
    pub fn compile(&self) -> Result<String> {
        serializer::compile(self.stack.root(), &self.options)
    }
}
