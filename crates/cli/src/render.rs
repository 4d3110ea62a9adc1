// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rendering of sections, lines, and flagged metrics.
//!
//! Color is an explicit construction-time decision; formatting calls never
//! consult the environment. Without color, flagged lines fall back to a
//! bracketed `[WARN]` tag.

use std::fmt;

use rounds_core::MetricLine;

use crate::color::codes;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

/// Writes operator-facing check output.
#[derive(Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// `=== title ===` section header.
    pub fn section(&self, title: &str) {
        if self.color {
            println!("\n{}=== {} ==={}\n", BOLD, title, RESET);
        } else {
            println!("\n=== {} ===\n", title);
        }
    }

    /// Format text with the header color (steel blue). Used for table
    /// headings.
    pub fn header(&self, text: &str) -> String {
        if self.color {
            format!("{}{}{}", fg256(codes::HEADER), text, RESET)
        } else {
            text.to_string()
        }
    }

    /// Indented informational line.
    pub fn line(&self, name: &str, value: impl fmt::Display) {
        println!("  {}: {}", name, value);
    }

    /// A metric line, visually distinguished when flagged.
    pub fn metric(&self, line: &MetricLine) {
        println!("{}", self.format_metric(line));
    }

    fn format_metric(&self, line: &MetricLine) -> String {
        let body = format!("  {}: {}", line.name, line.display_value());
        if !line.warn {
            return body;
        }
        if self.color {
            format!("{}[WARN]{} {}", fg256(codes::WARN), RESET, body)
        } else {
            format!("[WARN] {}", body)
        }
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
