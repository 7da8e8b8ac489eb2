//! Value model: container operations, coercion and compact serialization.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use jsonify::{BuildError, Pair, Value};
use serde_json::json;

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn literals() {
    assert_eq!(Value::Null.to_json(), "null");
    assert_eq!(Value::from(true).to_json(), "true");
    assert_eq!(Value::from(false).to_json(), "false");
    assert_eq!(Value::from(()).to_json(), "null");
    assert_eq!(Value::from(None::<i32>).to_json(), "null");
    assert_eq!(Value::from(Some(4)).to_json(), "4");
}

#[test]
fn numbers() {
    assert_eq!(Value::from(42u8).to_json(), "42");
    assert_eq!(Value::from(-7i64).to_json(), "-7");
    assert_eq!(Value::from(u64::MAX).to_json(), "18446744073709551615");
    assert_eq!(Value::from(2.75).to_json(), "2.75");
    assert_eq!(Value::from(1.0).to_json(), "1.0");
    assert_eq!(Value::from(0.1f32).to_json(), "0.1");
}

#[test]
fn strings_are_quoted() {
    assert_eq!(Value::from("foo").to_json(), r#""foo""#);
    assert_eq!(Value::from(String::from("foo")).to_json(), r#""foo""#);
    assert_eq!(Value::from('x').to_json(), r#""x""#);
}

#[test]
fn string_escaping() {
    assert_eq!(
        Value::from("say \"hi\"").to_json(),
        r#""say \"hi\"""#
    );
    assert_eq!(Value::from("path\\to").to_json(), r#""path\\to""#);
    assert_eq!(Value::from("a\nb\tc\rd").to_json(), r#""a\nb\tc\rd""#);
    assert_eq!(Value::from("\u{08}\u{0c}").to_json(), r#""\b\f""#);
}

#[test]
fn control_characters_use_unicode_escape() {
    assert_eq!(Value::from("goober\u{10}").to_json(), r#""goober\u0010""#);
    assert_eq!(Value::from("\u{0}").to_json(), r#""\u0000""#);
    assert_eq!(Value::from("\u{1f}").to_json(), r#""\u001f""#);
}

#[test]
fn non_ascii_text_is_written_as_is() {
    assert_eq!(Value::from("café 你好").to_json(), "\"café 你好\"");
}

#[test]
fn display_fallback_uses_text_rendering() {
    let addr: std::net::Ipv4Addr = "127.0.0.1".parse().unwrap();
    assert_eq!(Value::display(&addr), Value::String("127.0.0.1".into()));
}

#[test]
fn display_trait_renders_compact_json() {
    let value = Value::from(vec![1, 2]);
    assert_eq!(format!("{value}"), "[1,2]");
}

// ============================================================================
// Pairs
// ============================================================================

#[test]
fn pair_is_built_from_key_and_value() {
    let pair = Pair::new("key", "value");
    assert_eq!(pair.key, "key");
    assert_eq!(pair.value, Value::from("value"));
}

#[test]
fn pair_serializes_as_key_colon_value() {
    let pair = Value::from(("key", "value"));
    assert_eq!(pair.to_json(), r#""key":"value""#);
}

#[test]
fn pair_as_pair_value_becomes_object() {
    let pair = Pair::new("outer", Pair::new("inner", 1));
    assert_eq!(Value::from(pair).to_json(), r#""outer":{"inner":1}"#);
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn array_add_appends() {
    let mut array = Value::array();
    array.add(Value::from(1)).unwrap();
    array.add(Value::from("two")).unwrap();
    assert_eq!(array.to_json(), r#"[1,"two"]"#);
}

#[test]
fn array_add_wraps_pairs() {
    let mut array = Value::array();
    array.add(Value::from(("a", 1))).unwrap();
    assert_eq!(array.to_json(), r#"[{"a":1}]"#);
}

#[test]
fn object_add_takes_pairs_in_order() {
    let mut object = Value::object();
    object.add(Value::from(("b", 1))).unwrap();
    object.add(Value::from(("a", 2))).unwrap();
    assert_eq!(object.to_json(), r#"{"b":1,"a":2}"#);
}

#[test]
fn object_add_overwrites_in_place() {
    let mut object = Value::object();
    object.add(Value::from(("a", 1))).unwrap();
    object.add(Value::from(("b", 2))).unwrap();
    object.add(Value::from(("a", 3))).unwrap();
    assert_eq!(object.to_json(), r#"{"a":3,"b":2}"#);
}

#[test]
fn object_add_rejects_non_pairs() {
    let mut object = Value::object();
    object.add(Value::from(("a", 1))).unwrap();
    let err = object.add(Value::from(5)).unwrap_err();
    assert!(matches!(err, BuildError::Type(_)), "got {err:?}");
    assert_eq!(object.to_json(), r#"{"a":1}"#);
}

#[test]
fn scalar_add_is_a_type_error() {
    let mut scalar = Value::from("text");
    let err = scalar.add(Value::from(1)).unwrap_err();
    assert!(matches!(err, BuildError::Type(_)), "got {err:?}");
    assert_eq!(scalar, Value::from("text"));
}

#[test]
fn merge_objects() {
    let mut base = Value::from_iter([("my boy", "Monday"), ("my girl", "Sunday")]);
    let incoming = Value::from_iter([("my girl", "Friday"), ("my daughter", "Wednesday")]);
    base.merge(incoming).unwrap();
    assert_eq!(
        base.to_json(),
        r#"{"my boy":"Monday","my girl":"Friday","my daughter":"Wednesday"}"#
    );
}

#[test]
fn merge_array_into_object_is_argument_error() {
    let mut base = Value::object();
    let err = base.merge(Value::from(vec![1])).unwrap_err();
    assert!(matches!(err, BuildError::Argument(_)), "got {err:?}");
    assert_eq!(err.to_string(), "argument error: cannot merge array into object");
}

#[test]
fn empty_containers() {
    assert_eq!(Value::object().to_json(), "{}");
    assert_eq!(Value::array().to_json(), "[]");
}

#[test]
fn accessors() {
    let value = Value::from_iter([("a", 1)]);
    assert!(value.is_object());
    assert_eq!(value.get("a"), Some(&Value::from(1)));
    assert_eq!(value.get("missing"), None);
    assert_eq!(value.container_len(), Some(1));
    assert_eq!(Value::from(1).container_len(), None);
    assert_eq!(Value::from("s").as_str(), Some("s"));
    assert_eq!(Value::from(vec![1]).as_array().map(<[Value]>::len), Some(1));
}

// ============================================================================
// Coercion of collections
// ============================================================================

#[test]
fn vectors_slices_and_arrays_become_arrays() {
    assert_eq!(Value::from(vec![1, 2, 3]).to_json(), "[1,2,3]");
    assert_eq!(Value::from(&[true, false][..]).to_json(), "[true,false]");
    assert_eq!(Value::from(["a", "b"]).to_json(), r#"["a","b"]"#);
}

#[test]
fn nested_collections() {
    let value = Value::from(vec![vec![1], vec![], vec![2, 3]]);
    assert_eq!(value.to_json(), "[[1],[],[2,3]]");
}

#[test]
fn btreemap_becomes_sorted_object() {
    let mut map = BTreeMap::new();
    map.insert("b", 2);
    map.insert("a", 1);
    assert_eq!(Value::from(map).to_json(), r#"{"a":1,"b":2}"#);
}

#[test]
fn indexmap_keeps_insertion_order() {
    let mut map = IndexMap::new();
    map.insert("z", vec![1]);
    map.insert("a", vec![]);
    assert_eq!(Value::from(map).to_json(), r#"{"z":[1],"a":[]}"#);
}

#[test]
fn vector_of_couples_becomes_array_of_objects() {
    let value = Value::from(vec![("rel", "foo"), ("href", "goo")]);
    assert_eq!(value.to_json(), r#"[{"rel":"foo"},{"href":"goo"}]"#);
}

#[test]
fn collected_couples_become_object() {
    let links = vec![
        [("rel", "foo"), ("href", "goo")].into_iter().collect::<Value>(),
        [("rel", "bar"), ("href", "baz")].into_iter().collect::<Value>(),
    ];
    let value = Value::from_iter([("links", Value::from(links))]);
    assert_eq!(
        value.to_json(),
        r#"{"links":[{"rel":"foo","href":"goo"},{"rel":"bar","href":"baz"}]}"#
    );
}

#[test]
fn serde_json_values_convert_structurally() {
    let value = Value::from(json!({"b": [1, 2.5, null], "a": {"c": true}}));
    assert_eq!(value.to_json(), r#"{"b":[1,2.5,null],"a":{"c":true}}"#);
}

#[test]
fn value_passes_through_unchanged() {
    let original = Value::from(vec![1, 2]);
    let coerced: Value = original.clone().into();
    assert_eq!(coerced, original);
}

#[test]
fn raw_fragment_is_written_verbatim() {
    let value = Value::from(vec![Value::raw(r#"{"cached":true}"#), Value::from(1)]);
    assert_eq!(value.to_json(), r#"[{"cached":true},1]"#);
}
