// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured command outcomes.

use serde::{Deserialize, Serialize};

/// Exit status standing in for "no real exit code was obtained": spawn
/// failure, timeout, or death by signal. Distinct from every exit code a
/// process can legitimately return.
pub const SENTINEL_EXIT: i32 = -1;

/// Outcome of executing a [`CommandSpec`](crate::CommandSpec).
///
/// Owned exclusively by the caller that issued the command. Failures travel
/// as data: the sentinel path always carries a diagnostic, so zero-output
/// success and "could not run" are never confusable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResult {
    /// Exit code, or [`SENTINEL_EXIT`].
    pub exit_code: i32,
    /// Captured stdout, trimmed of trailing whitespace. Empty on the
    /// sentinel path.
    pub stdout: String,
    /// Captured stderr, when the process produced any.
    pub stderr: Option<String>,
    /// Why the sentinel was produced. `None` for real exit codes.
    pub diagnostic: Option<String>,
}

impl CommandResult {
    /// A result for a process that ran to completion.
    pub(crate) fn finished(exit_code: i32, stdout: String, stderr: Option<String>) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            diagnostic: None,
        }
    }

    /// A result for a command that never produced a real exit code.
    pub(crate) fn sentinel(diagnostic: impl Into<String>) -> Self {
        Self {
            exit_code: SENTINEL_EXIT,
            stdout: String::new(),
            stderr: None,
            diagnostic: Some(diagnostic.into()),
        }
    }

    /// True when the command ran and exited zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// True when no real exit code was obtained.
    pub fn is_sentinel(&self) -> bool {
        self.exit_code == SENTINEL_EXIT
    }

    /// Stdout, if the command succeeded and printed anything.
    pub fn output(&self) -> Option<&str> {
        (self.success() && !self.stdout.is_empty()).then_some(self.stdout.as_str())
    }

    /// Best available failure description: the diagnostic, then stderr,
    /// then stdout, then a fixed fallback.
    pub fn failure_detail(&self) -> &str {
        if let Some(diagnostic) = self.diagnostic.as_deref() {
            return diagnostic;
        }
        if let Some(stderr) = self.stderr.as_deref() {
            return stderr;
        }
        if !self.stdout.is_empty() {
            return &self.stdout;
        }
        "no output"
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
