// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! systemd service checks over systemctl (read-only).

use std::time::Duration;

use anyhow::Result;
use clap::Args;

use rounds_core::{run, CommandResult, CommandSpec};

use crate::render::Renderer;

const SYSTEMCTL_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Args)]
pub struct ServiceArgs {
    /// Show failed and inactive units
    #[arg(long)]
    pub failed: bool,
    /// Show units with nonzero restart counters
    #[arg(long)]
    pub restarts: bool,
    /// List loaded service units
    #[arg(long)]
    pub list: bool,
    /// Status and dependencies for a single unit
    #[arg(long, value_name = "NAME")]
    pub unit: Option<String>,
}

pub async fn handle(mut args: ServiceArgs, renderer: &Renderer) -> Result<()> {
    // With no selection, the failed-units sweep is the default check.
    if !args.failed && !args.restarts && !args.list && args.unit.is_none() {
        args.failed = true;
    }

    if let Some(unit) = &args.unit {
        return unit_status(unit, renderer).await;
    }

    if args.failed {
        renderer.section("Failed and inactive units (systemctl --failed)");
        let result = systemctl(["--failed"]).await?;
        match result.output() {
            Some(output) => println!("{}", output),
            None => println!("(empty, no failed units)"),
        }
    }

    if args.restarts {
        renderer.section("Units with restarts (active services, NRestarts)");
        restart_sweep().await?;
    }

    if args.list {
        renderer.section("Loaded services (list-units type=service)");
        let result = systemctl(["list-units", "type=service", "--plain"]).await?;
        println!("{}", result.output().unwrap_or("(no output)"));
    }

    Ok(())
}

async fn unit_status(unit: &str, renderer: &Renderer) -> Result<()> {
    renderer.section(&format!("Status and dependencies: {unit}"));
    let result = systemctl([
        "show",
        unit,
        "--property=LoadState,ActiveState,SubState,UnitFileState",
    ])
    .await?;
    if result.success() {
        println!("{}", result.stdout);
    } else {
        println!("{}", result.failure_detail());
    }

    println!("\n--- Dependencies (Requires) ---");
    let deps = systemctl(["list-dependencies", unit, "--plain"]).await?;
    println!("{}", deps.output().unwrap_or("(no output)"));
    Ok(())
}

async fn restart_sweep() -> Result<()> {
    let listing = systemctl(["list-units", "type=service", "state=active", "--plain"]).await?;
    let Some(output) = listing.output() else {
        println!("(no active services, or the query failed)");
        return Ok(());
    };

    for unit in service_units(output) {
        let info = systemctl(["show", unit.as_str(), "--property=NRestarts,ActiveState"]).await?;
        if let Some(restarts) = property(&info.stdout, "NRestarts") {
            if restarts != "0" {
                println!("  {}: restarts = {}", unit, restarts);
            }
        }
    }
    Ok(())
}

async fn systemctl<I, S>(args: I) -> Result<CommandResult>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let spec = CommandSpec::new("systemctl")
        .args(["--no-pager", "--no-legend"])
        .args(args)
        .timeout(SYSTEMCTL_TIMEOUT)
        .build()?;
    Ok(run(&spec).await)
}

/// First column of each listing line, kept only for `.service` units.
fn service_units(listing: &str) -> Vec<String> {
    listing
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter(|unit| unit.ends_with(".service"))
        .map(str::to_string)
        .collect()
}

/// Value of `KEY=value` in `systemctl show` output.
fn property<'a>(show_output: &'a str, key: &str) -> Option<&'a str> {
    show_output.lines().find_map(|line| {
        let (k, v) = line.split_once('=')?;
        (k == key).then_some(v.trim())
    })
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
