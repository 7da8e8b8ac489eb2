//! The scope stack driven directly through its open/close operations, the
//! way host bindings without closures use it.

use jsonify::{BuildError, ContainerKind, ScopeStack, Value};

fn compact(stack: &ScopeStack) -> String {
    stack.root().map(Value::to_json).unwrap_or_default()
}

#[test]
fn fresh_stack_is_at_root_with_nothing() {
    let stack = ScopeStack::new();
    assert_eq!(stack.level(), 0);
    assert_eq!(stack.root(), None);
    assert_eq!(stack.current(), None);
}

#[test]
fn keyed_scope_splices_into_parent_on_close() {
    let mut stack = ScopeStack::new();
    stack.open_keyed("foo").unwrap();
    assert_eq!(stack.level(), 1);
    stack.open_keyed("bar").unwrap();
    stack.store("baz", Value::from("goo")).unwrap();
    assert_eq!(stack.root(), None, "nothing reaches the root before close");
    stack.close_keyed().unwrap();
    stack.close_keyed().unwrap();
    assert_eq!(stack.level(), 0);
    assert_eq!(compact(&stack), r#"{"foo":{"bar":{"baz":"goo"}}}"#);
}

#[test]
fn keyed_array_scope_closes_as_empty_array() {
    let mut stack = ScopeStack::new();
    stack.open_keyed_array("items").unwrap();
    stack.close_keyed().unwrap();
    assert_eq!(compact(&stack), r#"{"items":[]}"#);
}

#[test]
fn keyed_scope_closes_as_null_when_empty() {
    let mut stack = ScopeStack::new();
    stack.open_keyed("nothing").unwrap();
    stack.close_keyed().unwrap();
    assert_eq!(compact(&stack), r#"{"nothing":null}"#);
}

#[test]
fn anonymous_scope_hands_back_its_container() {
    let mut stack = ScopeStack::new();
    stack.open_anonymous(ContainerKind::Object);
    stack.store("a", Value::from(1)).unwrap();
    let object = stack.close_anonymous().unwrap();
    assert_eq!(object.to_json(), r#"{"a":1}"#);
    assert_eq!(stack.root(), None);
}

#[test]
fn closing_at_root_is_argument_error() {
    let mut stack = ScopeStack::new();
    assert!(matches!(stack.close_keyed(), Err(BuildError::Argument(_))));
    assert!(matches!(stack.close_anonymous(), Err(BuildError::Argument(_))));
}

#[test]
fn mismatched_close_keeps_the_scope_open() {
    let mut stack = ScopeStack::new();
    stack.open_anonymous(ContainerKind::Array);
    stack.append(Value::from(1)).unwrap();
    assert!(matches!(stack.close_keyed(), Err(BuildError::Argument(_))));
    assert_eq!(stack.level(), 1);
    assert_eq!(stack.close_anonymous().unwrap().to_json(), "[1]");

    stack.open_keyed("k").unwrap();
    assert!(matches!(stack.close_anonymous(), Err(BuildError::Argument(_))));
    assert_eq!(stack.level(), 1);
    stack.close_keyed().unwrap();
    assert_eq!(compact(&stack), r#"{"k":null}"#);
}

#[test]
fn abandon_discards_the_top_scope_only() {
    let mut stack = ScopeStack::new();
    stack.store("kept", Value::from(true)).unwrap();
    stack.open_keyed("dropped").unwrap();
    stack.store("x", Value::from(1)).unwrap();
    assert!(stack.abandon());
    assert!(!stack.abandon());
    assert_eq!(compact(&stack), r#"{"kept":true}"#);
}

#[test]
fn open_keyed_inside_scalar_is_type_error() {
    let mut stack = ScopeStack::new();
    stack.ingest(Value::from(5)).unwrap();
    assert!(matches!(stack.open_keyed("k"), Err(BuildError::Type(_))));
    assert_eq!(stack.level(), 0);
}

#[test]
fn append_into_object_is_type_error() {
    let mut stack = ScopeStack::new();
    stack.open_anonymous(ContainerKind::Object);
    let err = stack.append(Value::from(1)).unwrap_err();
    assert!(matches!(err, BuildError::Type(_)), "got {err:?}");
    assert_eq!(stack.current(), Some(&Value::object()));
}

#[test]
fn collapse_singleton_unwraps_one_element_arrays() {
    let mut stack = ScopeStack::new();
    stack.open_keyed_array("one").unwrap();
    stack.append(Value::from("only")).unwrap();
    stack.collapse_singleton();
    stack.close_keyed().unwrap();

    stack.open_keyed_array("two").unwrap();
    stack.append(Value::from(1)).unwrap();
    stack.append(Value::from(2)).unwrap();
    stack.collapse_singleton();
    stack.close_keyed().unwrap();

    assert_eq!(compact(&stack), r#"{"one":"only","two":[1,2]}"#);
}

#[test]
fn collapse_singleton_ignores_plain_keyed_scopes() {
    let mut stack = ScopeStack::new();
    stack.open_keyed("plain").unwrap();
    stack.append(Value::from(1)).unwrap();
    stack.collapse_singleton();
    stack.close_keyed().unwrap();
    assert_eq!(compact(&stack), r#"{"plain":[1]}"#);
}

#[test]
fn collapse_singleton_ignores_root_and_anonymous_scopes() {
    let mut stack = ScopeStack::new();
    stack.append(Value::from(1)).unwrap();
    stack.collapse_singleton();
    assert_eq!(compact(&stack), "[1]");

    stack.open_anonymous(ContainerKind::Array);
    stack.append(Value::from(2)).unwrap();
    stack.collapse_singleton();
    assert_eq!(stack.close_anonymous().unwrap().to_json(), "[2]");
}

#[test]
fn ingest_wraps_a_pair_into_an_empty_scope() {
    let mut stack = ScopeStack::new();
    stack.ingest(Value::from(("k", "v"))).unwrap();
    assert_eq!(stack.root(), Some(&Value::from_iter([("k", "v")])));
}

#[test]
fn reset_clears_content_and_scopes() {
    let mut stack = ScopeStack::new();
    stack.store("a", Value::from(1)).unwrap();
    stack.open_keyed("b").unwrap();
    stack.reset();
    assert_eq!(stack.level(), 0);
    assert_eq!(stack.root(), None);
}

#[test]
fn into_root_moves_the_document_out() {
    let mut stack = ScopeStack::new();
    stack.append(Value::from(1)).unwrap();
    assert_eq!(stack.into_root(), Some(Value::from(vec![1])));
}
