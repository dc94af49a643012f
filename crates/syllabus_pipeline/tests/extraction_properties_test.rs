// Any JSON object survives being wrapped in a fence and surrounded by prose.

use proptest::prelude::*;
use serde_json::{Map, Value};
use syllabus_pipeline::extract_json;

/// Scalars whose text form parses back to the same value.
///
/// Strings never contain a backtick: a literal fence marker inside a string
/// is stripped like any other fence. Floats are multiples of 1/8 so their
/// decimal form is exact.
fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-100_000i32..100_000).prop_map(|n| Value::from(f64::from(n) / 8.0)),
        "[^`]{0,24}".prop_map(Value::String),
    ]
}

fn object_of(values: impl Strategy<Value = Value>) -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-zA-Z_][a-zA-Z0-9_ ]{0,10}", values, 0..6)
        .prop_map(|fields| Value::Object(fields.into_iter().collect::<Map<_, _>>()))
}

fn nested() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            object_of(inner),
        ]
    })
}

proptest! {
    #[test]
    fn fenced_object_with_prose_round_trips(
        value in object_of(nested()),
        opener in prop_oneof![Just("```json"), Just("```JSON"), Just("```Json"), Just("```")],
        before in "[a-zA-Z ,.!:\n]{0,40}",
        after in "[a-zA-Z ,.!:\n]{0,40}",
        pretty in any::<bool>(),
    ) {
        let body = if pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        }
        .unwrap();
        let reply = format!("{before}\n{opener}\n{body}\n```\n{after}");

        prop_assert_eq!(extract_json(&reply), Some(value));
    }

    #[test]
    fn bare_object_round_trips(value in object_of(nested())) {
        let body = serde_json::to_string(&value).unwrap();
        prop_assert_eq!(extract_json(&body), Some(value));
    }
}
