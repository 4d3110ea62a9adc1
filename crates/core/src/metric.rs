// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named, unit-qualified values with derived warning flags.

use std::fmt;

use serde::Serialize;

/// A metric's displayable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{n}"),
            MetricValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(n: f64) -> Self {
        MetricValue::Number(n)
    }
}

impl From<i64> for MetricValue {
    fn from(n: i64) -> Self {
        MetricValue::Number(n as f64)
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        MetricValue::Text(s.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(s: String) -> Self {
        MetricValue::Text(s)
    }
}

/// Warning bounds for a metric. Upper and lower bounds are evaluated
/// independently; either crossing sets the flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thresholds {
    pub warn_above: Option<f64>,
    pub warn_below: Option<f64>,
    /// Flag the line when the value is absent.
    pub warn_if_absent: bool,
}

impl Thresholds {
    /// Warn when the value exceeds `bound`.
    pub fn above(bound: f64) -> Self {
        Self {
            warn_above: Some(bound),
            ..Self::default()
        }
    }

    /// Warn when the value falls under `bound`.
    pub fn below(bound: f64) -> Self {
        Self {
            warn_below: Some(bound),
            ..Self::default()
        }
    }
}

/// A single named, unit-qualified value prepared for display.
///
/// The warning flag is a pure function of (value, thresholds), fixed at
/// construction. Presentation (color vs bracketed tags) belongs to the
/// rendering layer; this type only carries the flag and the display value.
#[derive(Debug, Clone, Serialize)]
pub struct MetricLine {
    pub name: String,
    pub value: Option<MetricValue>,
    pub unit: String,
    pub warn: bool,
}

impl MetricLine {
    /// Build a line with the flag derived from `thresholds`. Textual values
    /// never trip numeric bounds.
    pub fn new(
        name: impl Into<String>,
        value: Option<MetricValue>,
        unit: impl Into<String>,
        thresholds: Thresholds,
    ) -> Self {
        let warn = match &value {
            None => thresholds.warn_if_absent,
            Some(MetricValue::Number(n)) => {
                thresholds.warn_above.is_some_and(|bound| *n > bound)
                    || thresholds.warn_below.is_some_and(|bound| *n < bound)
            }
            Some(MetricValue::Text(_)) => false,
        };
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
            warn,
        }
    }

    /// Informational line with no thresholds and no flag.
    pub fn plain(
        name: impl Into<String>,
        value: impl Into<MetricValue>,
        unit: impl Into<String>,
    ) -> Self {
        Self::new(name, Some(value.into()), unit, Thresholds::default())
    }

    /// Line whose flag the caller decided itself (non-numeric conditions).
    pub fn with_warn(
        name: impl Into<String>,
        value: impl Into<MetricValue>,
        unit: impl Into<String>,
        warn: bool,
    ) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            unit: unit.into(),
            warn,
        }
    }

    /// The value (or a `?` placeholder) with the unit appended.
    pub fn display_value(&self) -> String {
        let value = match &self.value {
            Some(value) => value.to_string(),
            None => "?".to_string(),
        };
        if self.unit.is_empty() {
            value
        } else {
            format!("{} {}", value, self.unit)
        }
    }
}

/// Percentage of `limit` used, rounded to one decimal. `None` when the
/// limit is not positive.
pub fn percent_of(current: f64, limit: f64) -> Option<f64> {
    if limit <= 0.0 {
        return None;
    }
    Some((1000.0 * current / limit).round() / 10.0)
}

#[cfg(test)]
#[path = "metric_tests.rs"]
mod tests;
