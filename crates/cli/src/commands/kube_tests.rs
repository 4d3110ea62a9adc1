// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use rounds_core::Records;
use serde_json::json;

use super::*;

fn pod(namespace: &str, name: &str, restart_counts: &[u64]) -> Value {
    let statuses: Vec<Value> = restart_counts
        .iter()
        .map(|count| json!({"restartCount": count}))
        .collect();
    json!({
        "metadata": {"namespace": namespace, "name": name},
        "status": {"containerStatuses": statuses},
    })
}

#[test]
fn restarts_sorted_descending_and_zero_skipped() {
    let records = Records::from_value(json!({"items": [
        pod("default", "quiet", &[0]),
        pod("default", "flappy", &[7]),
        pod("kube-system", "bouncy", &[2]),
    ]}));
    let restarts = pod_restarts(&records);
    assert_eq!(
        restarts,
        vec![
            ("default".to_string(), "flappy".to_string(), 7),
            ("kube-system".to_string(), "bouncy".to_string(), 2),
        ]
    );
}

#[test]
fn each_container_counts_separately() {
    let records = Records::from_value(json!({"items": [
        pod("ns", "multi", &[3, 0, 5]),
    ]}));
    let restarts = pod_restarts(&records);
    assert_eq!(restarts.len(), 2);
    assert_eq!(restarts[0].2, 5);
    assert_eq!(restarts[1].2, 3);
}

#[test]
fn pods_without_container_statuses_are_skipped() {
    let records = Records::from_value(json!({"items": [
        {"metadata": {"namespace": "ns", "name": "pending"}, "status": {}},
    ]}));
    assert!(pod_restarts(&records).is_empty());
}

#[test]
fn last_lines_keeps_the_tail() {
    let text = "a\nb\nc\nd";
    assert_eq!(last_lines(text, 2), ["c", "d"]);
    assert_eq!(last_lines(text, 10), ["a", "b", "c", "d"]);
}
