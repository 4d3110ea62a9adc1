// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Argo CD application status (read-only `argocd app list`).

use std::time::Duration;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;

use rounds_core::{parse_json, run, CommandSpec, Records, StatusPolicy};

use crate::exit_error::ExitError;
use crate::output::{handle_list, OutputFormat};
use crate::render::Renderer;

const ARGOCD_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Subcommand)]
pub enum ArgocdCommand {
    /// List applications with Sync and Health status
    List(ListArgs),
    /// Show applications that are OutOfSync or unhealthy
    Problems(ProblemsArgs),
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub server: ServerArgs,
}

#[derive(Args)]
pub struct ProblemsArgs {
    #[command(flatten)]
    pub server: ServerArgs,
    /// Show only OutOfSync applications
    #[arg(long)]
    pub sync_only: bool,
    /// Show only unhealthy applications
    #[arg(long)]
    pub health_only: bool,
    /// Count Suspended applications as unhealthy
    #[arg(long)]
    pub include_suspended: bool,
}

#[derive(Args)]
pub struct ServerArgs {
    /// Argo CD server URL (defaults to $ARGOCD_SERVER)
    #[arg(long, short = 's')]
    pub server: Option<String>,
    /// Auth token (defaults to $ARGOCD_AUTH_TOKEN)
    #[arg(long)]
    pub auth_token: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

impl ServerArgs {
    fn server(&self) -> Option<String> {
        self.server
            .clone()
            .or_else(|| std::env::var("ARGOCD_SERVER").ok())
    }

    fn auth_token(&self) -> Option<String> {
        self.auth_token
            .clone()
            .or_else(|| std::env::var("ARGOCD_AUTH_TOKEN").ok())
    }
}

/// One application row extracted from the `argocd app list` payload.
#[derive(Debug, Serialize)]
pub struct AppStatus {
    pub name: String,
    pub namespace: String,
    pub sync: String,
    pub health: String,
}

pub async fn handle(cmd: ArgocdCommand, renderer: &Renderer) -> Result<()> {
    match cmd {
        ArgocdCommand::List(args) => list(args, renderer).await,
        ArgocdCommand::Problems(args) => problems(args, renderer).await,
    }
}

async fn list(args: ListArgs, renderer: &Renderer) -> Result<()> {
    let result = run(&list_spec(&args.server)?).await;
    if !result.success() {
        return Err(ExitError::new(1, format!("argocd failed: {}", result.failure_detail())).into());
    }
    if result.stdout.is_empty() {
        println!("No applications found.");
        return Ok(());
    }

    let Some(payload) = parse_json(&result.stdout) else {
        // Not JSON after all; show the raw output rather than failing.
        println!("{}", result.stdout);
        return Ok(());
    };

    let apps = extract_apps(&Records::from_payload(Some(payload)));
    handle_list(args.server.output, &apps, "No applications found.", |apps| {
        renderer.section("Argo CD applications (Sync / Health)");
        render_table(renderer, apps);
    })
}

async fn problems(args: ProblemsArgs, renderer: &Renderer) -> Result<()> {
    let result = run(&list_spec(&args.server)?).await;
    if !result.success() {
        return Err(ExitError::new(1, format!("argocd failed: {}", result.failure_detail())).into());
    }
    if result.stdout.is_empty() {
        println!("No applications found.");
        return Ok(());
    }

    let Some(payload) = parse_json(&result.stdout) else {
        return Err(ExitError::new(1, "could not parse argocd output").into());
    };

    let mut policy = StatusPolicy::default();
    if args.include_suspended {
        policy = policy.include_suspended();
    }
    let apps = extract_apps(&Records::from_payload(Some(payload)));
    let problems = filter_problems(apps, args.sync_only, args.health_only, &policy);

    handle_list(
        args.server.output,
        &problems,
        "No applications with drift or health problems found.",
        |problems| {
            renderer.section("Applications with problems (OutOfSync or unhealthy)");
            render_table(renderer, problems);
            println!("\n  Total: {}", problems.len());
        },
    )
}

fn list_spec(args: &ServerArgs) -> Result<CommandSpec, rounds_core::SpecError> {
    let mut builder = CommandSpec::new("argocd")
        .args(["app", "list", "-o", "json"])
        .timeout(ARGOCD_TIMEOUT);
    if let Some(server) = args.server() {
        builder = builder.args(["--server".to_string(), server]);
    }
    if let Some(token) = args.auth_token() {
        builder = builder.args(["--auth-token".to_string(), token]);
    }
    builder.build()
}

fn extract_apps(records: &Records) -> Vec<AppStatus> {
    records.iter().filter_map(app_status).collect()
}

/// Pull the display fields out of one application record. Tolerates both
/// the full CRD shape (`metadata`/`spec`/`status`) and a flat top-level
/// `name`; non-object records yield nothing.
fn app_status(record: &Value) -> Option<AppStatus> {
    if !record.is_object() {
        return None;
    }
    let name = record
        .pointer("/metadata/name")
        .or_else(|| record.get("name"))
        .and_then(Value::as_str)
        .unwrap_or("?")
        .to_string();
    let namespace = record
        .pointer("/spec/destination/namespace")
        .or_else(|| record.pointer("/metadata/namespace"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    let sync = status_field(record, "/status/sync/status");
    let health = status_field(record, "/status/health/status");
    Some(AppStatus {
        name,
        namespace,
        sync,
        health,
    })
}

fn status_field(record: &Value, pointer: &str) -> String {
    record
        .pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("Unknown")
        .to_string()
}

fn filter_problems(
    apps: Vec<AppStatus>,
    sync_only: bool,
    health_only: bool,
    policy: &StatusPolicy,
) -> Vec<AppStatus> {
    apps.into_iter()
        .filter(|app| {
            let out_of_sync = policy.is_out_of_sync(&app.sync);
            let unhealthy = policy.is_unhealthy(&app.health);
            match (sync_only, health_only) {
                (true, true) => out_of_sync && unhealthy,
                (true, false) => out_of_sync,
                (false, true) => unhealthy,
                (false, false) => out_of_sync || unhealthy,
            }
        })
        .collect()
}

fn render_table(renderer: &Renderer, apps: &[AppStatus]) {
    let heading = format!(
        "  {:<40} {:<12} {:<12} {:<24}",
        "NAME", "SYNC", "HEALTH", "NAMESPACE"
    );
    println!("{}", renderer.header(&heading));
    println!("  {}", "-".repeat(90));
    for app in apps {
        println!(
            "  {:<40} {:<12} {:<12} {:<24}",
            app.name, app.sync, app.health, app.namespace
        );
    }
}

#[cfg(test)]
#[path = "argocd_tests.rs"]
mod tests;
