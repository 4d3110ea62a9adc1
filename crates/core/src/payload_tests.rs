// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::json;

use super::*;

// ---------------------------------------------------------------------------
// parse_json
// ---------------------------------------------------------------------------

#[test]
fn malformed_json_degrades_to_none() {
    assert_eq!(parse_json("{not json"), None);
    assert_eq!(parse_json(""), None);
    assert_eq!(parse_json("NAME  SYNC  HEALTH"), None);
}

#[test]
fn round_trip_is_idempotent() {
    let payload = parse_json(r#"{"items":[{"a":1},{"b":[true,null]}]}"#).unwrap();
    let reencoded = serde_json::to_string(&payload).unwrap();
    assert_eq!(parse_json(&reencoded), Some(payload));
}

// ---------------------------------------------------------------------------
// Records normalization
// ---------------------------------------------------------------------------

#[yare::parameterized(
    items_object = { r#"{"items":[{"a":1}]}"# },
    bare_array = { r#"[{"a":1}]"# },
    single_record = { r#"{"a":1}"# },
)]
fn all_shapes_normalize_to_one_record(text: &str) {
    let records = Records::from_payload(parse_json(text));
    assert_eq!(records.len(), 1);
    let record = records.iter().next().unwrap();
    assert_eq!(record.get("a"), Some(&json!(1)));
}

#[test]
fn absent_payload_is_empty() {
    let records = Records::from_payload(None);
    assert!(records.is_empty());
    assert_eq!(records.iter().count(), 0);
}

#[test]
fn scalars_and_null_carry_no_records() {
    assert_eq!(Records::from_value(json!(null)), Records::Empty);
    assert_eq!(Records::from_value(json!(42)), Records::Empty);
    assert_eq!(Records::from_value(json!("Synced")), Records::Empty);
}

#[test]
fn non_array_items_key_keeps_whole_object_as_single() {
    let records = Records::from_value(json!({"items": 3, "name": "x"}));
    match records {
        Records::Single(value) => {
            assert_eq!(value.get("name"), Some(&json!("x")));
            assert_eq!(value.get("items"), Some(&json!(3)));
        }
        other => panic!("expected Single, got {other:?}"),
    }
}

#[test]
fn empty_items_array_is_an_empty_sequence() {
    let records = Records::from_value(json!({"items": []}));
    assert_eq!(records, Records::Sequence(Vec::new()));
    assert!(records.is_empty());
}

#[test]
fn into_vec_flattens_every_variant() {
    assert_eq!(Records::from_value(json!([{"a":1},{"a":2}])).into_vec().len(), 2);
    assert_eq!(Records::from_value(json!({"a":1})).into_vec().len(), 1);
    assert!(Records::Empty.into_vec().is_empty());
}

// ---------------------------------------------------------------------------
// Colon-delimited tables
// ---------------------------------------------------------------------------

#[test]
fn table_lines_split_on_first_colon_and_trim() {
    let text = "redis_version:7.2.4\n  role : master \nuptime_in_seconds:100:200";
    let pairs = parse_table_lines(text);
    assert_eq!(
        pairs,
        vec![
            ("redis_version".to_string(), "7.2.4".to_string()),
            ("role".to_string(), "master".to_string()),
            ("uptime_in_seconds".to_string(), "100:200".to_string()),
        ]
    );
}

#[test]
fn lines_without_a_colon_are_skipped() {
    let text = "# Clients\nconnected_clients:3\n\nPONG";
    let pairs = parse_table_lines(text);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0, "connected_clients");
}

#[test]
fn fold_pairs_is_last_wins_with_first_position() {
    let folded = fold_pairs(vec![
        ("a".to_string(), "1".to_string()),
        ("b".to_string(), "2".to_string()),
        ("a".to_string(), "3".to_string()),
    ]);
    assert_eq!(folded.len(), 2);
    assert_eq!(folded.get("a").map(String::as_str), Some("3"));
    let keys: Vec<&str> = folded.keys().map(String::as_str).collect();
    assert_eq!(keys, ["a", "b"]);
}
