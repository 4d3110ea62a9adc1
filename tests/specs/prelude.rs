// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for CLI specs: a small fluent wrapper over assert_cmd.

use assert_cmd::cargo::CommandCargoExt;
use std::process::Command;

/// Start building a `rounds` invocation.
pub fn cli() -> Spec {
    let cmd = Command::cargo_bin("rounds").expect("rounds binary builds");
    Spec { cmd }
}

pub struct Spec {
    cmd: Command,
}

impl Spec {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and require a zero exit.
    pub fn passes(self) -> Verdict {
        let verdict = self.run();
        assert!(
            verdict.success,
            "expected success\nstdout:\n{}\nstderr:\n{}",
            verdict.stdout, verdict.stderr
        );
        verdict
    }

    /// Run and require a nonzero exit.
    pub fn fails(self) -> Verdict {
        let verdict = self.run();
        assert!(
            !verdict.success,
            "expected failure\nstdout:\n{}\nstderr:\n{}",
            verdict.stdout, verdict.stderr
        );
        verdict
    }

    fn run(mut self) -> Verdict {
        let output = self.cmd.output().expect("spawn rounds");
        Verdict {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

pub struct Verdict {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl Verdict {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout.contains(needle),
            "stdout missing {needle:?}:\n{}",
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr.contains(needle),
            "stderr missing {needle:?}:\n{}",
            self.stderr
        );
        self
    }
}
