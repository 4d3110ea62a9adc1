// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Redis health checks over redis-cli.
//!
//! INFO sections are colon-delimited key:value dumps; they flow through
//! the shared table parser rather than ad hoc string matching.

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use indexmap::IndexMap;

use rounds_core::{
    fold_pairs, parse_table_lines, percent_of, run, CommandResult, CommandSpec, MetricLine,
    Thresholds,
};

use crate::exit_error::ExitError;
use crate::render::Renderer;

const REDIS_TIMEOUT: Duration = Duration::from_secs(5);
const CLIENT_USAGE_WARN_PCT: f64 = 80.0;
const MEMORY_USAGE_WARN_PCT: f64 = 90.0;
const REPLICA_IO_LAG_WARN_SECS: f64 = 10.0;
const DEFAULT_MAXCLIENTS: i64 = 10_000;

#[derive(Args)]
pub struct RedisArgs {
    /// Redis host (defaults to $REDIS_HOST)
    #[arg(long)]
    pub host: Option<String>,
    /// Redis port (defaults to $REDIS_PORT)
    #[arg(long)]
    pub port: Option<String>,
}

pub async fn handle(args: RedisArgs, renderer: &Renderer) -> Result<()> {
    let conn = Connection::new(&args);

    let probe = conn.command(["PING"]).await?;
    let pong = probe
        .output()
        .is_some_and(|out| out.trim().eq_ignore_ascii_case("pong"));
    if !pong {
        println!(
            "Redis is not reachable (check REDIS_HOST, REDIS_PORT, and that redis-server is running)."
        );
        return Err(ExitError::silent(1).into());
    }

    renderer.section("Redis: status and parameters");

    let server = info_map(&conn.command(["INFO", "server"]).await?);
    if let Some(version) = server.get("redis_version") {
        renderer.line("Version", version);
    }

    clients(&conn, renderer).await?;
    memory(&conn, renderer).await?;
    persistence(&conn, renderer).await?;
    replication(&conn, renderer).await?;

    let client_list = conn.command(["CLIENT", "LIST"]).await?;
    if let Some(output) = client_list.output() {
        let count = output.lines().filter(|line| !line.trim().is_empty()).count();
        renderer.line("Connections (CLIENT LIST)", count);
    }

    println!();
    Ok(())
}

async fn clients(conn: &Connection, renderer: &Renderer) -> Result<()> {
    let info = info_map(&conn.command(["INFO", "clients"]).await?);
    let maxclients = conn.command(["CONFIG", "GET", "maxclients"]).await?;

    let current: Option<i64> = info.get("connected_clients").and_then(|v| v.parse().ok());
    let max = config_get_value(&maxclients).unwrap_or(DEFAULT_MAXCLIENTS);

    match current {
        Some(current) => {
            renderer.line("Clients", format!("{current} / {max}"));
            if let Some(pct) = percent_of(current as f64, max as f64) {
                renderer.metric(&MetricLine::new(
                    "  client limit used",
                    Some(pct.into()),
                    "%",
                    Thresholds::above(CLIENT_USAGE_WARN_PCT),
                ));
            }
        }
        None => renderer.line("Clients", "?"),
    }
    Ok(())
}

async fn memory(conn: &Connection, renderer: &Renderer) -> Result<()> {
    let info = info_map(&conn.command(["INFO", "memory"]).await?);

    if let Some(human) = info.get("used_memory_human") {
        renderer.line("  used_memory", human);
    }

    let used: Option<i64> = info.get("used_memory").and_then(|v| v.parse().ok());
    let max: Option<i64> = info.get("maxmemory").and_then(|v| v.parse().ok());
    match (used, max) {
        (Some(used), Some(max)) if max > 0 => {
            if let Some(pct) = percent_of(used as f64, max as f64) {
                renderer.metric(&MetricLine::new(
                    "  maxmemory used",
                    Some(pct.into()),
                    "%",
                    Thresholds::above(MEMORY_USAGE_WARN_PCT),
                ));
            }
        }
        (_, Some(0)) => renderer.line("  maxmemory", "not set (unlimited)"),
        _ => {}
    }
    Ok(())
}

async fn persistence(conn: &Connection, renderer: &Renderer) -> Result<()> {
    let info = info_map(&conn.command(["INFO", "persistence"]).await?);
    if let Some(last_save) = info.get("rdb_last_save_time") {
        renderer.line("  rdb_last_save_time", format!("{last_save} (unixtime)"));
    }
    if let Some(aof) = info.get("aof_enabled") {
        renderer.line("  aof_enabled", aof);
    }
    Ok(())
}

async fn replication(conn: &Connection, renderer: &Renderer) -> Result<()> {
    let info = info_map(&conn.command(["INFO", "replication"]).await?);
    let Some(role) = info.get("role") else {
        return Ok(());
    };
    renderer.line("Role", role);
    if role != "slave" {
        return Ok(());
    }

    let link = info
        .get("master_link_status")
        .map(String::as_str)
        .unwrap_or("unknown");
    if link != "up" {
        renderer.metric(&MetricLine::with_warn("  master_link_status", link, "", true));
    }
    if let Some(lag) = info
        .get("master_last_io_seconds_ago")
        .and_then(|v| v.parse::<i64>().ok())
    {
        renderer.metric(&MetricLine::new(
            "  master_last_io_seconds_ago",
            Some(lag.into()),
            "s",
            Thresholds::above(REPLICA_IO_LAG_WARN_SECS),
        ));
    }
    Ok(())
}

/// redis-cli invocations with shared connection flags.
struct Connection {
    host: Option<String>,
    port: Option<String>,
}

impl Connection {
    fn new(args: &RedisArgs) -> Self {
        Self {
            host: args
                .host
                .clone()
                .or_else(|| std::env::var("REDIS_HOST").ok()),
            port: args
                .port
                .clone()
                .or_else(|| std::env::var("REDIS_PORT").ok()),
        }
    }

    async fn command<I, S>(&self, args: I) -> Result<CommandResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = CommandSpec::new("redis-cli").timeout(REDIS_TIMEOUT);
        if let Some(host) = &self.host {
            builder = builder.args(["-h", host.as_str()]);
        }
        if let Some(port) = &self.port {
            builder = builder.args(["-p", port.as_str()]);
        }
        let spec = builder.args(args).build()?;
        Ok(run(&spec).await)
    }
}

/// Fold an INFO section into an ordered key/value map. Failed commands
/// yield an empty map; every caller degrades per-key.
fn info_map(result: &CommandResult) -> IndexMap<String, String> {
    match result.output() {
        Some(output) => fold_pairs(parse_table_lines(output)),
        None => IndexMap::new(),
    }
}

/// `CONFIG GET key` answers with two lines: the key, then the value.
fn config_get_value(result: &CommandResult) -> Option<i64> {
    let output = result.output()?;
    output.lines().nth(1)?.trim().parse().ok()
}

#[cfg(test)]
#[path = "redis_tests.rs"]
mod tests;
