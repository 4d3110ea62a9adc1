// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tolerant interpretation of captured command output.
//!
//! Parsing failure is a first-class, silently-degraded case: callers fall
//! back to the raw text instead of aborting the run.

use indexmap::IndexMap;
use serde_json::Value;

// ---------------------------------------------------------------------------
// JSON payloads
// ---------------------------------------------------------------------------

/// Strict JSON decode. `None` on any failure; never an error.
pub fn parse_json(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

/// Top-level shape of a JSON payload, resolved once.
///
/// Upstream tools answer list queries with either a bare array of records
/// or an object carrying a nested `items` array; a handful return a single
/// bare record. All three collapse here to a uniform record sequence
/// instead of being shape-probed at every call site.
#[derive(Debug, Clone, PartialEq)]
pub enum Records {
    /// An array of records (bare, or lifted out of `items`).
    Sequence(Vec<Value>),
    /// A single bare record.
    Single(Value),
    /// No payload, or a shape that carries no records (scalars, null).
    Empty,
}

impl Records {
    /// Normalize an optional payload, e.g. straight from [`parse_json`].
    pub fn from_payload(payload: Option<Value>) -> Self {
        match payload {
            Some(value) => Self::from_value(value),
            None => Records::Empty,
        }
    }

    /// Normalize a JSON value.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => Records::Sequence(items),
            Value::Object(mut map) => {
                if matches!(map.get("items"), Some(Value::Array(_))) {
                    if let Some(Value::Array(items)) = map.remove("items") {
                        return Records::Sequence(items);
                    }
                }
                Records::Single(Value::Object(map))
            }
            _ => Records::Empty,
        }
    }

    /// Iterate the records as a uniform sequence.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        const NONE: &[Value] = &[];
        match self {
            Records::Sequence(items) => items.iter(),
            Records::Single(value) => std::slice::from_ref(value).iter(),
            Records::Empty => NONE.iter(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Records::Sequence(items) => items.len(),
            Records::Single(_) => 1,
            Records::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume into a plain vector of records.
    pub fn into_vec(self) -> Vec<Value> {
        match self {
            Records::Sequence(items) => items,
            Records::Single(value) => vec![value],
            Records::Empty => Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Colon-delimited table output
// ---------------------------------------------------------------------------

/// Split colon-delimited status output (`key:value` per line, as in service
/// INFO dumps) into pairs.
///
/// Each line splits on its first colon with both sides trimmed; lines
/// without a colon are skipped. First-occurrence order is preserved.
pub fn parse_table_lines(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            Some((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Fold pairs into an ordered map. A repeated key keeps its first position
/// and takes its last value; the source tools do not repeat keys
/// meaningfully.
pub fn fold_pairs(pairs: Vec<(String, String)>) -> IndexMap<String, String> {
    let mut map = IndexMap::with_capacity(pairs.len());
    for (key, value) in pairs {
        map.insert(key, value);
    }
    map
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
