// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn finished(exit_code: i32, stdout: &str) -> CommandResult {
    CommandResult {
        exit_code,
        stdout: stdout.to_string(),
        stderr: None,
        diagnostic: None,
    }
}

#[test]
fn parse_count_reads_bare_psql_values() {
    assert_eq!(parse_count(&finished(0, "42")), Some(42));
    assert_eq!(parse_count(&finished(0, " 42 ")), Some(42));
}

#[test]
fn parse_count_rejects_failures_and_garbage() {
    assert_eq!(parse_count(&finished(1, "42")), None);
    assert_eq!(parse_count(&finished(0, "forty-two")), None);
    assert_eq!(parse_count(&finished(0, "")), None);
}

#[test]
fn first_line_takes_the_head() {
    assert_eq!(
        first_line("PostgreSQL 16.2 on x86_64\ncompiled by gcc"),
        "PostgreSQL 16.2 on x86_64"
    );
    assert_eq!(first_line("single"), "single");
}

#[test]
fn truncate_is_character_safe() {
    assert_eq!(truncate("abcdef", 3), "abc");
    assert_eq!(truncate("héllo", 2), "hé");
    assert_eq!(truncate("short", 80), "short");
}
