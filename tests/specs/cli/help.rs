// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs
//!
//! Verify help text displays for all commands.

use crate::prelude::*;

#[test]
fn rounds_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn rounds_help_lists_check_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("argocd")
        .stdout_has("kube")
        .stdout_has("postgres")
        .stdout_has("redis")
        .stdout_has("service");
}

#[test]
fn argocd_help_shows_subcommands() {
    cli()
        .args(&["argocd", "--help"])
        .passes()
        .stdout_has("list")
        .stdout_has("problems");
}

#[test]
fn argocd_problems_help_shows_filters() {
    cli()
        .args(&["argocd", "problems", "--help"])
        .passes()
        .stdout_has("--sync-only")
        .stdout_has("--health-only")
        .stdout_has("--include-suspended");
}

#[test]
fn kube_help_shows_health() {
    cli().args(&["kube", "--help"]).passes().stdout_has("health");
}

#[test]
fn service_help_shows_selectors() {
    cli()
        .args(&["service", "--help"])
        .passes()
        .stdout_has("--failed")
        .stdout_has("--restarts")
        .stdout_has("--unit");
}

#[test]
fn rounds_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}
