// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawn-and-capture execution of a [`CommandSpec`].

use std::process::Stdio;
use std::time::Instant;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::result::{CommandResult, SENTINEL_EXIT};
use crate::spec::CommandSpec;

/// Run a command to completion and return a uniform result.
///
/// The call resolves when the child exits, is killed by timeout, or fails
/// to start. Spawn failures and timeouts surface as [`SENTINEL_EXIT`] with
/// a diagnostic; this function never returns an error and never panics.
/// Exactly one attempt is made.
pub async fn run(spec: &CommandSpec) -> CommandResult {
    let start = Instant::now();
    let cmd_span = tracing::info_span!(
        "rounds.cmd",
        cmd = %spec.executable(),
        args = ?spec.args(),
        exit_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    );

    let mut process = Command::new(spec.executable());
    process.args(spec.args());
    // Ambient environment stays the base; overrides win on collision.
    for (key, value) in spec.env() {
        process.env(key, value);
    }
    process.stdin(if spec.stdin().is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    process.stdout(Stdio::piped());
    process.stderr(Stdio::piped());
    // On the timeout path the child handle is dropped mid-wait; this makes
    // the drop kill the process instead of leaking it.
    process.kill_on_drop(true);

    let mut child = match process.spawn() {
        Ok(child) => child,
        Err(source) => {
            return CommandResult::sentinel(format!(
                "failed to spawn `{}`: {}",
                spec.executable(),
                source
            ));
        }
    };

    if let Some(data) = spec.stdin() {
        if let Some(mut stdin) = child.stdin.take() {
            let write_result = stdin.write_all(data.as_bytes()).await;
            drop(stdin); // close pipe to signal EOF
            if let Err(source) = write_result {
                return CommandResult::sentinel(format!(
                    "failed to write stdin for `{}`: {}",
                    spec.executable(),
                    source
                ));
            }
        }
    }

    let output = match tokio::time::timeout(spec.timeout(), child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(source)) => {
            return CommandResult::sentinel(format!(
                "failed to run `{}`: {}",
                spec.executable(),
                source
            ));
        }
        Err(_) => {
            return CommandResult::sentinel(format!(
                "`{}` timed out after {:.1}s",
                spec.executable(),
                spec.timeout().as_secs_f64()
            ));
        }
    };

    // A signal death has no exit code either; it takes the sentinel path.
    let exit_code = output.status.code().unwrap_or(SENTINEL_EXIT);
    cmd_span.record("exit_code", exit_code);
    cmd_span.record("duration_ms", start.elapsed().as_millis() as u64);

    let stdout = String::from_utf8_lossy(&output.stdout)
        .trim_end()
        .to_string();
    let stderr = String::from_utf8_lossy(&output.stderr)
        .trim_end()
        .to_string();
    let stderr = (!stderr.is_empty()).then_some(stderr);

    let mut result = CommandResult::finished(exit_code, stdout, stderr);
    if result.is_sentinel() {
        result.diagnostic = Some(format!("`{}` was terminated by a signal", spec.executable()));
    }
    result
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
