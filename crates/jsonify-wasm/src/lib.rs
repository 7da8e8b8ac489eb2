//! WASM bindings for jsonify.
//!
//! JavaScript has no closures the builder can unwind, so the binding drives
//! the scope stack directly: `open`/`openArray` push a keyed scope and
//! `close` splices it into its parent. Values cross the boundary as JSON text.
//!
//! ```js
//! const json = new JsonBuilder();
//! json.store("name", '"Alice"');
//! json.open("address");
//! json.store("zip", "10065");
//! json.close();
//! json.compile(); // {"name":"Alice","address":{"zip":10065}}
//! ```
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p jsonify-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/jsonify-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/jsonify_wasm.wasm
//! ```

use jsonify::{serializer, BuildError, BuilderOptions, ScopeStack};
use wasm_bindgen::prelude::*;

fn to_js(err: BuildError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// An incremental JSON document builder.
#[wasm_bindgen]
pub struct JsonBuilder {
    stack: ScopeStack,
    options: BuilderOptions,
}

#[wasm_bindgen]
impl JsonBuilder {
    /// Create a builder. `options` is an optional JSON object such as
    /// `{"pretty": true, "verify": true}`; missing fields default to `false`.
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<String>) -> Result<JsonBuilder, JsValue> {
        let options = match options.as_deref() {
            Some(text) => BuilderOptions::from_json(text).map_err(to_js)?,
            None => BuilderOptions::default(),
        };
        Ok(JsonBuilder {
            stack: ScopeStack::new(),
            options,
        })
    }

    /// Store the JSON value `json` under `key` in the current scope.
    pub fn store(&mut self, key: &str, json: &str) -> Result<(), JsValue> {
        let value = jsonify::parse(json).map_err(to_js)?;
        self.stack.store(key, value).map_err(to_js)
    }

    /// Append the JSON value `json` to the current scope.
    pub fn append(&mut self, json: &str) -> Result<(), JsValue> {
        let value = jsonify::parse(json).map_err(to_js)?;
        self.stack.append(value).map_err(to_js)
    }

    /// Open a scope under `key`. It closes as `null` if nothing is added.
    pub fn open(&mut self, key: &str) -> Result<(), JsValue> {
        self.stack.open_keyed(key).map_err(to_js)
    }

    /// Open an array scope under `key`. It closes as `[]` if nothing is
    /// appended.
    #[wasm_bindgen(js_name = "openArray")]
    pub fn open_array(&mut self, key: &str) -> Result<(), JsValue> {
        self.stack.open_keyed_array(key).map_err(to_js)
    }

    /// Close the innermost scope. With `unwrap_single_item` set, a scope
    /// opened by `openArray` that holds exactly one element closes as that
    /// element; scopes opened by `open` are never unwrapped.
    pub fn close(&mut self) -> Result<(), JsValue> {
        if self.options.unwrap_single_item {
            self.stack.collapse_singleton();
        }
        self.stack.close_keyed().map_err(to_js)
    }

    /// Merge JSON text into the current scope. Blank text is ignored.
    pub fn ingest(&mut self, text: &str) -> Result<(), JsValue> {
        if text.trim().is_empty() {
            return Ok(());
        }
        let value = jsonify::parse(text).map_err(to_js)?;
        self.stack.ingest(value).map_err(to_js)
    }

    /// Drop all content and open scopes.
    pub fn reset(&mut self) {
        self.stack.reset();
    }

    /// Number of scopes currently open.
    #[wasm_bindgen(getter)]
    pub fn level(&self) -> u32 {
        u32::try_from(self.stack.level()).unwrap_or(u32::MAX)
    }

    /// Render the document. Scopes still open are not included.
    pub fn compile(&self) -> Result<String, JsValue> {
        serializer::compile(self.stack.root(), &self.options).map_err(to_js)
    }
}

/// Re-render JSON text, compact or pretty. Blank text compiles to `{}`.
#[wasm_bindgen(js_name = "compileJson")]
pub fn compile_json(text: &str, pretty: bool) -> Result<String, JsValue> {
    let root = if text.trim().is_empty() {
        None
    } else {
        Some(jsonify::parse(text).map_err(to_js)?)
    };
    let options = BuilderOptions::default().pretty(pretty);
    serializer::compile(root.as_ref(), &options).map_err(to_js)
}
