// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! PostgreSQL health checks over psql.
//!
//! Connection settings come from the usual libpq environment (PGHOST,
//! PGPORT, PGPASSWORD); queries run with `-t -A -w` so output is bare
//! values and the command never prompts for a password.

use std::time::Duration;

use anyhow::Result;
use clap::Args;

use rounds_core::{percent_of, run, CommandResult, CommandSpec, MetricLine, Thresholds};

use crate::exit_error::ExitError;
use crate::render::Renderer;

const PSQL_TIMEOUT: Duration = Duration::from_secs(10);
const CONN_USAGE_WARN_PCT: f64 = 80.0;
const REPLICA_LAG_WARN_SECS: f64 = 60.0;

#[derive(Args)]
pub struct PostgresArgs {
    /// Database to connect to (defaults to $PGDATABASE, then "postgres")
    #[arg(long, short = 'd')]
    pub database: Option<String>,
}

pub async fn handle(args: PostgresArgs, renderer: &Renderer) -> Result<()> {
    let database = args
        .database
        .or_else(|| std::env::var("PGDATABASE").ok())
        .unwrap_or_else(|| "postgres".to_string());

    let probe = query(&database, "SELECT 1").await?;
    if !probe.success() {
        println!(
            "PostgreSQL is not reachable (check PGHOST, PGPORT, PGPASSWORD, and that the server is running)."
        );
        return Err(ExitError::silent(1).into());
    }

    renderer.section("PostgreSQL: status and parameters");

    let version = query(&database, "SELECT version();").await?;
    if let Some(output) = version.output() {
        renderer.line("Version", truncate(first_line(output), 80));
    }

    connection_usage(&database, renderer).await?;

    for param in ["shared_buffers", "work_mem", "maintenance_work_mem"] {
        let result = query(&database, &format!("SHOW {param};")).await?;
        if let Some(output) = result.output() {
            renderer.line(&format!("  {param}"), output.trim());
        }
    }

    replication(&database, renderer).await?;

    let long_queries = query(
        &database,
        "SELECT count(*) FROM pg_stat_activity \
         WHERE state = 'active' AND query_start < now() - interval '60 seconds' \
         AND pid != pg_backend_pid();",
    )
    .await?;
    if let Some(count) = parse_count(&long_queries) {
        renderer.metric(&MetricLine::new(
            "Long-running queries (>60s)",
            Some(count.into()),
            "",
            Thresholds::above(0.0),
        ));
    }

    let lock_waiters = query(
        &database,
        "SELECT count(*) FROM pg_stat_activity WHERE wait_event_type = 'Lock';",
    )
    .await?;
    if let Some(count) = parse_count(&lock_waiters) {
        renderer.metric(&MetricLine::new(
            "Sessions waiting on locks",
            Some(count.into()),
            "",
            Thresholds::above(0.0),
        ));
    }

    let size = query(&database, "SELECT pg_database_size(current_database());").await?;
    if let Some(bytes) = parse_count(&size) {
        renderer.line(
            "Current database size",
            format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0)),
        );
    }

    println!();
    Ok(())
}

async fn connection_usage(database: &str, renderer: &Renderer) -> Result<()> {
    let max_conn = query(database, "SHOW max_connections;").await?;
    let current = query(database, "SELECT count(*) FROM pg_stat_activity;").await?;

    match (parse_count(&max_conn), parse_count(&current)) {
        (Some(max), Some(current)) => {
            renderer.line("Connections", format!("{current} / {max}"));
            if let Some(pct) = percent_of(current as f64, max as f64) {
                renderer.metric(&MetricLine::new(
                    "  connection limit used",
                    Some(pct.into()),
                    "%",
                    Thresholds::above(CONN_USAGE_WARN_PCT),
                ));
            }
        }
        _ => {
            // Leave the raw values visible rather than dropping the line.
            renderer.line(
                "Connections",
                format!(
                    "{} / {}",
                    current.output().unwrap_or("?"),
                    max_conn.output().unwrap_or("?")
                ),
            );
        }
    }
    Ok(())
}

async fn replication(database: &str, renderer: &Renderer) -> Result<()> {
    let in_recovery = query(database, "SELECT pg_is_in_recovery();").await?;
    let is_replica = in_recovery
        .output()
        .is_some_and(|out| out.trim().eq_ignore_ascii_case("t"));

    if !is_replica {
        renderer.line("Role", "primary (master)");
        return Ok(());
    }

    renderer.line("Role", "replica");
    let lag = query(
        database,
        "SELECT coalesce(extract(epoch from (now() - pg_last_xact_replay_timestamp()))::int, 0);",
    )
    .await?;
    match parse_count(&lag) {
        Some(secs) => renderer.metric(&MetricLine::new(
            "  replication lag",
            Some(secs.into()),
            "s",
            Thresholds::above(REPLICA_LAG_WARN_SECS),
        )),
        None => renderer.line("  replication lag", lag.output().unwrap_or("?")),
    }
    Ok(())
}

async fn query(database: &str, sql: &str) -> Result<CommandResult> {
    let mut builder = CommandSpec::new("psql").args(["-t", "-A", "-w", "-d", database]);
    if let Ok(host) = std::env::var("PGHOST") {
        if !host.is_empty() {
            builder = builder.args(["-h".to_string(), host]);
        }
    }
    if let Ok(port) = std::env::var("PGPORT") {
        if !port.is_empty() {
            builder = builder.args(["-p".to_string(), port]);
        }
    }
    let spec = builder.args(["-c", sql]).timeout(PSQL_TIMEOUT).build()?;
    Ok(run(&spec).await)
}

fn parse_count(result: &CommandResult) -> Option<i64> {
    result.output()?.trim().parse().ok()
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or(text)
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
#[path = "postgres_tests.rs"]
mod tests;
