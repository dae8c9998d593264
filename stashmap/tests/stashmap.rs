use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use stashmap::{stashmap, Key, LoadWarning, Stashmap};

fn abcd_without_c() -> Stashmap<i32> {
    let mut stash = Stashmap::new();
    stash.set("a", 1);
    stash.set("b", 2);
    stash.set("c", 3);
    stash.set("d", 4);
    stash.remove("c");
    stash
}

fn from_object(object: Value) -> Stashmap<Value> {
    Stashmap::<Value>::from_object(object).into_value().unwrap()
}

#[test]
fn constructor_copies_an_existing_object() {
    let stash = from_object(json!({ "a": 1, "b": 2 }));
    assert_eq!(stash.get("b"), Some(&json!(2)));
    assert_eq!(stash.len(), 2);
    assert_eq!(stash.get_keys(), ["a", "b"]);
}

#[test]
fn constructor_copies_a_nested_object() {
    let stash = from_object(json!({
        "a": { "one": "one" },
        "b": { "two": "two" },
    }));
    let value = stash.get("b").unwrap();
    assert!(value.is_object());
    assert_eq!(value["two"], json!("two"));
}

#[test]
fn constructor_ignores_a_primitive() {
    let result = Stashmap::<Value>::from_object(json!(42));
    assert_eq!(
        result.non_fatal(),
        &[LoadWarning::NotAnObject { found: "a number" }]
    );
    assert!(result.into_value().unwrap().is_empty());
}

#[test]
fn length_after_remove() {
    assert_eq!(abcd_without_c().len(), 3);
}

#[test]
fn get_after_remove() {
    assert_eq!(abcd_without_c().get("b"), Some(&2));
}

#[test]
fn get_at_after_remove() {
    let stash = abcd_without_c();
    assert_eq!(stash.get_at(2), Some(&4));
    assert_eq!(stash.get_at(3), None);
}

#[test]
fn has_after_remove() {
    let stash = abcd_without_c();
    assert!(!stash.has("c"));
    assert!(stash.has("d"));
}

#[test]
fn for_each_visits_every_entry() {
    let stash = from_object(json!({ "a": 1, "b": 2 }));
    let mut calls = 0;
    stash.for_each(|_, _| calls += 1);
    assert_eq!(calls, 2);
}

#[test]
fn for_each_straight_off_construction() {
    let mut calls = 0;
    stashmap([("a", 1), ("b", 2)]).for_each(|_, _| calls += 1);
    assert_eq!(calls, 2);
}

#[test]
fn for_each_stops_on_false() {
    let stash = stashmap([("a", 1), ("b", 2), ("c", 3)]);
    let mut calls = 0;
    let visited = stash.for_each(|value, _| {
        if *value > 2 {
            return false;
        }
        calls += 1;
        true
    });
    assert_eq!(calls, 2);
    assert_eq!(visited, 3);
}

#[test]
fn for_each_passes_value_then_key() {
    let stash = stashmap([("a", 1), ("b", 2)]);
    let mut seen = Vec::new();
    stash.for_each(|value, key| seen.push(format!("{key}={value}")));
    assert_eq!(seen, ["a=1", "b=2"]);
}

#[test]
fn map_filters_falsy_results() {
    let stash = stashmap([("a", 1), ("b", 2), ("c", 1), ("d", 2)]);
    let ones = stash.map(|value, _| (*value == 1).then_some(*value));
    assert_eq!(ones, [1, 1]);
}

#[test]
fn map_drops_literal_false() {
    let stash = from_object(json!({ "a": 1, "b": 2, "c": 1, "d": 2 }));
    let ones = stash.map(|value, _| {
        if *value == json!(1) {
            value.clone()
        } else {
            json!(false)
        }
    });
    assert_eq!(ones, [json!(1), json!(1)]);
}

#[test]
fn merge_without_function_overwrites() {
    let mut left = stashmap([("a", 1), ("b", 2)]);
    let right = stashmap([("b", 20), ("c", 30)]);
    left.merge(&right);
    for (key, value) in &right {
        assert_eq!(left.get(key), Some(value));
    }
    assert_eq!(left.get_keys(), ["a", "b", "c"]);
}

#[test]
fn merge_with_function_concatenates() {
    let mut left = stashmap([("a", vec![1]), ("b", vec![2])]);
    let right = stashmap([("a", vec![2]), ("b", vec![3])]);
    left.merge_with(&right, |current, incoming, _| {
        let mut combined = current.cloned().unwrap_or_default();
        combined.extend(incoming);
        combined
    });
    assert_eq!(left.get("a"), Some(&vec![1, 2]));
    assert_eq!(left.get("b"), Some(&vec![2, 3]));
    assert_eq!(left.len(), 2);
}

#[test]
fn order_survives_overwrites() {
    let mut stash = Stashmap::new();
    for (i, key) in ["k1", "k2", "k3", "k4"].into_iter().enumerate() {
        stash.set(key, i);
    }
    stash.set("k2", 100).set("k4", 200);
    assert_eq!(stash.get_keys(), ["k1", "k2", "k3", "k4"]);
}

#[test]
fn count_matches_keys_after_mixed_edits() {
    let mut stash = Stashmap::new();
    for i in 0..20 {
        stash.set(i, i * 10);
    }
    for i in (0..20).step_by(3) {
        assert!(stash.remove(&Key::from(i)));
        assert!(!stash.has(&Key::from(i)));
        assert!(!stash.remove(&Key::from(i)));
    }
    stash.set(3, 0).set(5, 0);

    let keys = stash.get_keys();
    assert_eq!(stash.len(), keys.len());
    assert_eq!(keys.iter().filter(|key| stash.has(*key)).count(), stash.len());
    for (position, key) in keys.iter().enumerate() {
        assert_eq!(stash.get_at(position), stash.get(key));
    }
}

#[test]
fn to_string_summarises() {
    let stash = abcd_without_c();
    assert_eq!(stash.to_string(), "Stashmap (3) [a, b, d]");
}

#[test]
fn typed_json_round_trip() {
    let stash = Stashmap::<u8>::from_json(r#"{"x": 1, "a": 2}"#)
        .into_value()
        .unwrap();
    let text = serde_json::to_string(&stash).unwrap();
    assert_eq!(text, r#"{"x":1,"a":2}"#);
}
