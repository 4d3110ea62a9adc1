// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kubernetes cluster diagnostics (read-only kubectl).

use std::time::Duration;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::Value;

use rounds_core::{parse_json, run, CommandSpec, Records, SpecError};

use crate::exit_error::ExitError;
use crate::render::Renderer;

const KUBECTL_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_RESTART_ROWS: usize = 30;
const MAX_EVENT_LINES: usize = 25;

#[derive(Subcommand)]
pub enum KubeCommand {
    /// Nodes, pod status, restart counts, and recent events
    Health(HealthArgs),
}

#[derive(Args)]
pub struct HealthArgs {
    /// kubectl context
    #[arg(long, short = 'c')]
    pub context: Option<String>,
    /// Path to a kubeconfig file
    #[arg(long)]
    pub kubeconfig: Option<String>,
    /// Restrict pod listing to one namespace (default: all)
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,
    /// Skip the events section
    #[arg(long)]
    pub no_events: bool,
}

/// Builds kubectl invocations with the shared connection flags applied.
/// The binary can be overridden via `KUBECTL`.
struct Kubectl {
    program: String,
    kubeconfig: Option<String>,
    context: Option<String>,
}

impl Kubectl {
    fn new(args: &HealthArgs) -> Self {
        Self {
            program: std::env::var("KUBECTL").unwrap_or_else(|_| "kubectl".to_string()),
            kubeconfig: args.kubeconfig.clone(),
            context: args.context.clone(),
        }
    }

    fn spec<I, S>(&self, args: I) -> Result<CommandSpec, SpecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = CommandSpec::new(self.program.as_str()).timeout(KUBECTL_TIMEOUT);
        if let Some(kubeconfig) = &self.kubeconfig {
            builder = builder.args(["--kubeconfig", kubeconfig.as_str()]);
        }
        if let Some(context) = &self.context {
            builder = builder.args(["--context", context.as_str()]);
        }
        builder.args(args).build()
    }
}

pub async fn handle(cmd: KubeCommand, renderer: &Renderer) -> Result<()> {
    match cmd {
        KubeCommand::Health(args) => health(args, renderer).await,
    }
}

async fn health(args: HealthArgs, renderer: &Renderer) -> Result<()> {
    let kubectl = Kubectl::new(&args);

    renderer.section("Nodes");
    let result = run(&kubectl.spec(["get", "nodes", "-o", "wide"])?).await;
    if !result.success() {
        println!("{}", result.failure_detail());
        return Err(ExitError::silent(1).into());
    }
    println!("{}", result.stdout);

    renderer.section("Pods (status)");
    let pod_args: Vec<&str> = match &args.namespace {
        Some(namespace) => vec!["get", "pods", "-n", namespace.as_str(), "-o", "wide"],
        None => vec!["get", "pods", "-A", "-o", "wide"],
    };
    let result = run(&kubectl.spec(pod_args)?).await;
    if result.success() {
        println!("{}", result.stdout);
    } else {
        println!("{}", result.failure_detail());
    }

    restart_section(&kubectl, renderer).await?;

    if !args.no_events {
        renderer.section("Events (most recent)");
        let result = run(&kubectl.spec([
            "get",
            "events",
            "-A",
            "--sort-by=.lastTimestamp",
            "-o",
            "wide",
        ])?)
        .await;
        match result.output() {
            Some(output) => {
                for line in last_lines(output, MAX_EVENT_LINES) {
                    println!("{}", line);
                }
            }
            None => println!("(no events, or the query failed)"),
        }
    }

    Ok(())
}

async fn restart_section(kubectl: &Kubectl, renderer: &Renderer) -> Result<()> {
    let result = run(&kubectl.spec(["get", "pods", "-A", "-o", "json"])?).await;
    let payload = result.output().and_then(parse_json);
    if !result.success() || payload.is_none() {
        renderer.section("Restarts: data not available");
        return Ok(());
    }

    let restarts = pod_restarts(&Records::from_payload(payload));
    if restarts.is_empty() {
        renderer.section("Pods with restarts: none");
        return Ok(());
    }

    renderer.section("Pods with restarts (> 0)");
    for (namespace, name, count) in restarts.iter().take(MAX_RESTART_ROWS) {
        println!("  {:<20} {:<50} restarts={}", namespace, name, count);
    }
    if restarts.len() > MAX_RESTART_ROWS {
        println!("  ... and {} more", restarts.len() - MAX_RESTART_ROWS);
    }
    Ok(())
}

/// Collect (namespace, pod, restart count) for every container with at
/// least one restart, highest counts first.
fn pod_restarts(records: &Records) -> Vec<(String, String, u64)> {
    let mut restarts = Vec::new();
    for record in records.iter() {
        let namespace = record
            .pointer("/metadata/namespace")
            .and_then(Value::as_str)
            .unwrap_or("");
        let name = record
            .pointer("/metadata/name")
            .and_then(Value::as_str)
            .unwrap_or("");
        let Some(statuses) = record
            .pointer("/status/containerStatuses")
            .and_then(Value::as_array)
        else {
            continue;
        };
        for status in statuses {
            let count = status
                .get("restartCount")
                .and_then(Value::as_u64)
                .unwrap_or(0);
            if count > 0 {
                restarts.push((namespace.to_string(), name.to_string(), count));
            }
        }
    }
    restarts.sort_by(|a, b| b.2.cmp(&a.2));
    restarts
}

fn last_lines(text: &str, n: usize) -> Vec<&str> {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].to_vec()
}

#[cfg(test)]
#[path = "kube_tests.rs"]
mod tests;
