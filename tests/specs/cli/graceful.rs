// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for graceful degradation when the underlying tool is missing.
//!
//! A check against an absent external tool must exit nonzero with a
//! diagnostic, not crash. `KUBECTL` points kubectl checks at a binary
//! that cannot exist, so these run without a cluster.

use crate::prelude::*;

#[test]
fn kube_health_with_missing_kubectl_exits_one_with_diagnostic() {
    cli()
        .args(&["kube", "health"])
        .env("KUBECTL", "rounds-specs-no-such-kubectl")
        .fails()
        .stdout_has("rounds-specs-no-such-kubectl");
}

#[test]
fn kube_health_missing_tool_does_not_panic() {
    let verdict = cli()
        .args(&["kube", "health"])
        .env("KUBECTL", "rounds-specs-no-such-kubectl")
        .fails();
    assert!(
        !verdict.stderr.contains("panicked"),
        "stderr shows a panic:\n{}",
        verdict.stderr
    );
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    cli().args(&["frobnicate"]).fails().stderr_has("Usage");
}
